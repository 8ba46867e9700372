use super::interceptor::NavigationInterceptor;
use super::order_id::generate_order_id;
use super::request_builder::build_payment_url;
use crate::domain::config::WidgetConfig;
use crate::domain::navigation::{PaymentOutcome, SurfaceSettings, TerminalRules};
use crate::domain::payment::PaymentRequest;
use crate::domain::ports::{
    ConfigSourceBox, ExternalOpenerRef, NavigationHandlerRef, OutcomeCallback, RenderingSurface,
};
use crate::domain::session::{Session, TeardownSignal};
use crate::error::Result;
use std::sync::Arc;

/// Host-side collaborators of one payment session.
pub struct SessionContext {
    pub opener: ExternalOpenerRef,
    pub on_outcome: OutcomeCallback,
    pub teardown: TeardownSignal,
}

impl SessionContext {
    pub fn new(
        opener: ExternalOpenerRef,
        on_outcome: impl FnOnce(PaymentOutcome) + Send + 'static,
    ) -> Self {
        Self {
            opener,
            on_outcome: Box::new(on_outcome),
            teardown: TeardownSignal::new(),
        }
    }

    /// Uses an existing teardown flag instead of a fresh one.
    pub fn with_teardown(mut self, teardown: TeardownSignal) -> Self {
        self.teardown = teardown;
        self
    }
}

/// Entry point that shows the hosted payment form in a surface.
///
/// Holds no global state: each caller constructs its own `PaymentForm` with
/// the configuration source it wants, and every call to
/// [`show_payment_form`](Self::show_payment_form) creates an independent
/// session.
pub struct PaymentForm {
    config_source: ConfigSourceBox,
}

impl PaymentForm {
    pub fn new(config_source: ConfigSourceBox) -> Self {
        Self { config_source }
    }

    /// Loads configuration and builds the signed form URL without touching
    /// any surface. A missing or empty order id is generated.
    pub async fn payment_url(&self, request: &PaymentRequest) -> Result<String> {
        Ok(self.prepare(request).await?.url)
    }

    /// Loads configuration, builds the form URL, wires a fresh
    /// [`NavigationInterceptor`] into `surface`, and starts loading.
    ///
    /// A configuration failure is returned before the surface is touched.
    pub async fn show_payment_form(
        &self,
        request: PaymentRequest,
        surface: &mut dyn RenderingSurface,
        context: SessionContext,
    ) -> Result<Arc<NavigationInterceptor>> {
        let PreparedForm {
            config,
            order_id,
            url,
        } = self.prepare(&request).await?;

        let rules = TerminalRules::new(config.success_url.clone(), config.fail_url.clone())
            .with_deep_link_scheme(&config.deep_link_scheme);
        let session = Session::new(
            order_id,
            request.amount,
            request.currency,
            rules,
            context.teardown,
        );
        tracing::info!(
            order_id = %session.order_id,
            amount = %session.amount,
            currency = %session.currency,
            method = %request.method,
            demo = config.demo_mode,
            "Starting payment session"
        );

        let interceptor = Arc::new(NavigationInterceptor::new(
            session,
            context.opener,
            context.on_outcome,
        ));
        surface.apply_settings(&SurfaceSettings::default());
        surface.set_navigation_handler(interceptor.clone() as NavigationHandlerRef);
        surface.load_url(&url);

        Ok(interceptor)
    }

    async fn prepare(&self, request: &PaymentRequest) -> Result<PreparedForm> {
        let map = self.config_source.load().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to load payment form configuration");
        })?;
        let config = WidgetConfig::from_map(map);

        let order_id = request
            .order_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(generate_order_id);

        let url = build_payment_url(
            &order_id,
            &request.amount,
            &request.currency,
            &request.method,
            &config,
        )?;

        Ok(PreparedForm {
            config,
            order_id,
            url,
        })
    }
}

struct PreparedForm {
    config: WidgetConfig,
    order_id: String,
    url: String,
}
