use crate::domain::config::ConfigMap;
use crate::domain::navigation::{NavigationDecision, NavigationRequest, SurfaceSettings};
use crate::domain::ports::{ConfigSource, ExternalOpener, NavigationHandlerRef, RenderingSurface};
use crate::error::{OpenError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Configuration source backed by a map held in memory.
///
/// Useful for tests and for hosts that assemble configuration themselves.
#[derive(Debug, Default, Clone)]
pub struct InMemoryConfigSource {
    map: ConfigMap,
}

impl InMemoryConfigSource {
    pub fn new(map: ConfigMap) -> Self {
        Self { map }
    }
}

#[async_trait]
impl ConfigSource for InMemoryConfigSource {
    async fn load(&self) -> Result<ConfigMap> {
        Ok(self.map.clone())
    }
}

/// External opener that knows a fixed set of schemes and records what it
/// launched instead of launching anything.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    schemes: HashSet<String>,
    launched: Mutex<Vec<String>>,
    attempts: AtomicUsize,
}

impl RecordingOpener {
    /// An opener with no registered handlers; every handoff reports
    /// [`OpenError::NoHandler`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schemes<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemes: schemes
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
            ..Self::default()
        }
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of handoffs attempted, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ExternalOpener for RecordingOpener {
    fn open(&self, url: &str) -> std::result::Result<(), OpenError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();
        if !self.schemes.contains(&scheme) {
            return Err(OpenError::NoHandler(scheme));
        }
        self.launched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
        Ok(())
    }
}

/// Headless rendering surface that records what it was asked to do.
///
/// `dispatch` and `navigate` simulate the page attempting a navigation: the
/// installed handler is consulted first, exactly as a real surface would.
#[derive(Default)]
pub struct RecordingSurface {
    settings: Option<SurfaceSettings>,
    handler: Option<NavigationHandlerRef>,
    loaded: Vec<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> Option<SurfaceSettings> {
        self.settings
    }

    /// URLs that were actually rendered, in order.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }

    /// Runs a navigation through the handler and renders the URL unless the
    /// decision blocks the surface. Without a handler everything is allowed.
    pub fn dispatch(&mut self, request: NavigationRequest<'_>) -> NavigationDecision {
        let decision = self
            .handler
            .as_ref()
            .map_or(NavigationDecision::Allow, |handler| {
                handler.decide_navigation(&request)
            });
        if !decision.blocks_surface()
            && let Some(url) = request.url.filter(|url| !url.is_empty())
        {
            self.loaded.push(url.to_string());
        }
        decision
    }

    /// Returns `true` when the surface rendered the URL.
    pub fn navigate(&mut self, request: NavigationRequest<'_>) -> bool {
        let before = self.loaded.len();
        self.dispatch(request);
        self.loaded.len() > before
    }

    /// Simulates `window.open`. Returns `true` if a second surface was created.
    pub fn open_secondary(&self) -> bool {
        let allowed_by_settings = self.settings.is_some_and(|s| s.secondary_surfaces);
        let allowed_by_handler = self
            .handler
            .as_ref()
            .is_none_or(|handler| handler.allow_secondary_surface());
        allowed_by_settings && allowed_by_handler
    }
}

impl RenderingSurface for RecordingSurface {
    fn apply_settings(&mut self, settings: &SurfaceSettings) {
        self.settings = Some(*settings);
    }

    fn set_navigation_handler(&mut self, handler: NavigationHandlerRef) {
        self.handler = Some(handler);
    }

    fn load_url(&mut self, url: &str) {
        self.loaded.push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::NavigationHandler;
    use std::sync::Arc;

    struct BlockEverything;

    impl NavigationHandler for BlockEverything {
        fn decide_navigation(&self, _request: &NavigationRequest<'_>) -> NavigationDecision {
            NavigationDecision::Suppress
        }
    }

    #[tokio::test]
    async fn test_in_memory_config_source() {
        let map: ConfigMap = [("a", "1")].into_iter().collect();
        let source = InMemoryConfigSource::new(map.clone());
        assert_eq!(source.load().await.unwrap(), map);
    }

    #[test]
    fn test_recording_opener_without_handler() {
        let opener = RecordingOpener::new();
        assert_eq!(
            opener.open("sbp://pay"),
            Err(OpenError::NoHandler("sbp".to_string()))
        );
        assert!(opener.launched().is_empty());
        assert_eq!(opener.attempts(), 1);
    }

    #[test]
    fn test_recording_opener_scheme_is_case_insensitive() {
        let opener = RecordingOpener::with_schemes(["SBP"]);
        assert!(opener.open("sbp://pay").is_ok());
        assert!(opener.open("Sbp://again").is_ok());
        assert_eq!(opener.launched().len(), 2);
    }

    #[test]
    fn test_surface_consults_handler() {
        let mut surface = RecordingSurface::new();
        assert!(surface.navigate(NavigationRequest::main_frame("https://a.example")));

        surface.set_navigation_handler(Arc::new(BlockEverything));
        assert!(!surface.navigate(NavigationRequest::main_frame("https://b.example")));
        assert_eq!(
            surface.dispatch(NavigationRequest::main_frame("https://c.example")),
            NavigationDecision::Suppress
        );
        assert_eq!(surface.loaded(), ["https://a.example".to_string()]);
    }

    #[test]
    fn test_dispatch_without_handler_allows() {
        let mut surface = RecordingSurface::new();
        assert_eq!(
            surface.dispatch(NavigationRequest::sub_frame("https://a.example")),
            NavigationDecision::Allow
        );
        assert_eq!(
            surface.dispatch(NavigationRequest { url: None, is_main_frame: true }),
            NavigationDecision::Allow
        );
        assert_eq!(surface.loaded(), ["https://a.example".to_string()]);
    }

    #[test]
    fn test_secondary_surface_needs_settings_and_handler() {
        let mut surface = RecordingSurface::new();
        assert!(!surface.open_secondary());

        surface.apply_settings(&SurfaceSettings {
            secondary_surfaces: true,
            ..SurfaceSettings::default()
        });
        assert!(surface.open_secondary());

        surface.set_navigation_handler(Arc::new(BlockEverything));
        assert!(!surface.open_secondary());
    }
}
