use crate::domain::navigation::{NavigationDecision, NavigationRequest, PaymentOutcome, TerminalRules};
use crate::domain::ports::{ExternalOpenerRef, NavigationHandler, OutcomeCallback};
use crate::domain::session::Session;
use crate::error::OpenError;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

const NETWORK_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Whether the surface may load `url` itself. Only the scheme prefix is
/// checked, case-insensitively; the rest of the URL is not validated.
pub fn is_network_url(url: &str) -> bool {
    NETWORK_PREFIXES.iter().any(|prefix| {
        url.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Decides what to do with one navigation attempt.
///
/// Pure: no logging, no I/O. Checks run in this order:
/// 1. missing or empty URL is allowed;
/// 2. terminal URLs (deep link, success URL, fail URL) terminate the session;
/// 3. http(s) URLs are allowed;
/// 4. anything else (custom schemes, malformed or schemeless strings) is
///    delegated, or suppressed while the session is finishing.
pub fn decide(url: Option<&str>, rules: &TerminalRules, finishing: bool) -> NavigationDecision {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return NavigationDecision::Allow;
    };

    if rules.is_terminal(url) {
        return NavigationDecision::Terminate(rules.classify(url));
    }

    if is_network_url(url) {
        return NavigationDecision::Allow;
    }

    if finishing {
        NavigationDecision::Suppress
    } else {
        NavigationDecision::Delegate
    }
}

/// Per-session navigation hook.
///
/// Wraps [`decide`] with the side effects a decision implies: reporting the
/// outcome to the host on `Terminate` (exactly once) and handing delegated
/// URLs to the external opener. Once terminated, every further navigation is
/// suppressed.
pub struct NavigationInterceptor {
    session: Session,
    opener: ExternalOpenerRef,
    on_outcome: Mutex<Option<OutcomeCallback>>,
    terminated: AtomicBool,
}

impl NavigationInterceptor {
    pub fn new(session: Session, opener: ExternalOpenerRef, on_outcome: OutcomeCallback) -> Self {
        Self {
            session,
            opener,
            on_outcome: Mutex::new(Some(on_outcome)),
            terminated: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    /// Decides a navigation and performs its side effects.
    pub fn handle(&self, url: Option<&str>) -> NavigationDecision {
        if self.is_terminated() {
            tracing::debug!(
                order_id = %self.session.order_id,
                url = url.unwrap_or_default(),
                "Navigation after session end ignored"
            );
            return NavigationDecision::Suppress;
        }

        let decision = decide(url, &self.session.rules, self.session.is_finishing());
        tracing::debug!(
            order_id = %self.session.order_id,
            url = url.unwrap_or_default(),
            decision = decision.label(),
            "Navigation decided"
        );

        match (decision, url) {
            (NavigationDecision::Terminate(outcome), _) => self.finish(outcome),
            (NavigationDecision::Delegate, Some(url)) => self.delegate(url),
            _ => {}
        }
        decision
    }

    /// Host-initiated teardown (back button, navigate up). Marks the session
    /// as finishing and reports `Failure` unless an outcome was already
    /// reported.
    pub fn cancel(&self) {
        self.session.teardown_signal().begin();
        self.finish(PaymentOutcome::Failure);
    }

    fn finish(&self, outcome: PaymentOutcome) {
        if self.terminated.swap(true, Ordering::SeqCst) {
            return;
        }
        self.session.teardown_signal().begin();

        let callback = self
            .on_outcome
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        tracing::info!(order_id = %self.session.order_id, %outcome, "Payment session finished");
        if let Some(callback) = callback {
            callback(outcome);
        }
    }

    // Delegated URLs may carry payment tokens: full URL at debug only.
    fn delegate(&self, url: &str) {
        let order_id = &self.session.order_id;
        tracing::debug!(url, "Delegating URL");
        match self.opener.open(url) {
            Ok(()) => tracing::info!(%order_id, "Handed off to external application"),
            Err(OpenError::NoHandler(scheme)) => {
                tracing::warn!(%order_id, %scheme, "No app to handle URL")
            }
            Err(e) => tracing::warn!(%order_id, error = %e, "External handoff failed"),
        }
    }
}

impl NavigationHandler for NavigationInterceptor {
    fn decide_navigation(&self, request: &NavigationRequest<'_>) -> NavigationDecision {
        if !request.is_main_frame {
            return NavigationDecision::Allow;
        }
        self.handle(request.url)
    }
}
