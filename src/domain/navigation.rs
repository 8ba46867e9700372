use serde::Serialize;
use std::fmt;

/// Marker whose presence in a terminal URL classifies it as a success.
pub const SUCCESS_MARKER: &str = "success";

/// Final result of a payment session, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    Success,
    Failure,
}

impl fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// What the surface should do with one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "outcome", rename_all = "lowercase")]
pub enum NavigationDecision {
    /// Load the URL in the surface.
    Allow,
    /// Close the session with this outcome. The URL is not loaded.
    Terminate(PaymentOutcome),
    /// Hand the URL to an external handler. The URL is not loaded.
    Delegate,
    /// Block the URL without any handoff.
    Suppress,
}

impl NavigationDecision {
    /// Whether the surface must not load the URL itself.
    pub fn blocks_surface(&self) -> bool {
        !matches!(self, Self::Allow)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Terminate(_) => "terminate",
            Self::Delegate => "delegate",
            Self::Suppress => "suppress",
        }
    }

    pub fn outcome(&self) -> Option<PaymentOutcome> {
        match self {
            Self::Terminate(outcome) => Some(*outcome),
            _ => None,
        }
    }
}

/// A navigation attempt as the surface reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest<'a> {
    pub url: Option<&'a str>,
    /// Sub-frame navigations are never intercepted.
    pub is_main_frame: bool,
}

impl<'a> NavigationRequest<'a> {
    pub fn main_frame(url: &'a str) -> Self {
        Self {
            url: Some(url),
            is_main_frame: true,
        }
    }

    pub fn sub_frame(url: &'a str) -> Self {
        Self {
            url: Some(url),
            is_main_frame: false,
        }
    }
}

/// URLs that end a session: the configured success/fail URLs and anything
/// under the private deep-link scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalRules {
    deep_link_prefix: Option<String>,
    success_url: String,
    fail_url: String,
}

impl TerminalRules {
    pub fn new(success_url: impl Into<String>, fail_url: impl Into<String>) -> Self {
        Self {
            deep_link_prefix: None,
            success_url: success_url.into(),
            fail_url: fail_url.into(),
        }
    }

    /// Enables deep-link termination for `scheme` (given without `://`).
    /// An empty scheme leaves deep-link handling off.
    pub fn with_deep_link_scheme(mut self, scheme: &str) -> Self {
        let scheme = scheme.trim().trim_end_matches("://");
        self.deep_link_prefix = (!scheme.is_empty()).then(|| format!("{scheme}://"));
        self
    }

    pub fn success_url(&self) -> &str {
        &self.success_url
    }

    pub fn fail_url(&self) -> &str {
        &self.fail_url
    }

    /// Whether `url` signals the end of the payment flow.
    pub fn is_terminal(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }
        self.deep_link_prefix
            .as_deref()
            .is_some_and(|prefix| url.starts_with(prefix))
            || url == self.success_url
            || url == self.fail_url
    }

    /// Outcome of a URL already known to be terminal. Any URL mentioning the
    /// success marker counts as a success, even under a failure path.
    pub fn classify(&self, url: &str) -> PaymentOutcome {
        if url.contains(SUCCESS_MARKER) || (!self.success_url.is_empty() && url == self.success_url)
        {
            PaymentOutcome::Success
        } else {
            PaymentOutcome::Failure
        }
    }
}

/// Static configuration applied to the surface before the form loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub zoom_controls: bool,
    pub overview_mode: bool,
    pub wide_viewport: bool,
    pub initial_scale: u32,
    /// Secondary surfaces (popups, `window.open`) are never permitted.
    pub secondary_surfaces: bool,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            zoom_controls: true,
            overview_mode: true,
            wide_viewport: true,
            initial_scale: 1,
            secondary_surfaces: false,
        }
    }
}
