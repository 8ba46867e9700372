use super::config::ConfigMap;
use super::navigation::{NavigationDecision, NavigationRequest, PaymentOutcome, SurfaceSettings};
use crate::error::{OpenError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of the layered key/value configuration read at session start.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn load(&self) -> Result<ConfigMap>;
}

/// Launches URLs with non-http(s) schemes in an external application.
pub trait ExternalOpener: Send + Sync {
    fn open(&self, url: &str) -> std::result::Result<(), OpenError>;
}

/// Hook the surface consults before acting on a navigation.
pub trait NavigationHandler: Send + Sync {
    /// Decides the navigation and performs whatever side effects the
    /// decision implies.
    fn decide_navigation(&self, request: &NavigationRequest<'_>) -> NavigationDecision;

    /// Returns `true` when the surface must NOT load the URL itself.
    fn should_override(&self, request: &NavigationRequest<'_>) -> bool {
        self.decide_navigation(request).blocks_surface()
    }

    /// Whether the page may open a secondary surface (popup, new window).
    fn allow_secondary_surface(&self) -> bool {
        false
    }
}

/// The embeddable view that displays the provider's form.
pub trait RenderingSurface {
    fn apply_settings(&mut self, settings: &SurfaceSettings);
    fn set_navigation_handler(&mut self, handler: NavigationHandlerRef);
    fn load_url(&mut self, url: &str);
}

pub type ConfigSourceBox = Box<dyn ConfigSource>;
pub type ExternalOpenerRef = Arc<dyn ExternalOpener>;
pub type NavigationHandlerRef = Arc<dyn NavigationHandler>;
/// Receives the session outcome. Called at most once.
pub type OutcomeCallback = Box<dyn FnOnce(PaymentOutcome) + Send>;
