//! Application layer: builds the provider form URL and owns the navigation
//! state machine that decides when a payment session is over.
//!
//! [`checkout::PaymentForm`] is the entry point. It loads configuration through
//! a [`ConfigSource`](crate::domain::ports::ConfigSource), builds the URL with
//! [`request_builder`], and installs an [`interceptor::NavigationInterceptor`]
//! on the rendering surface.

pub mod checkout;
pub mod interceptor;
pub mod order_id;
pub mod request_builder;
pub mod signature;
