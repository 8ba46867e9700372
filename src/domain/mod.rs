//! Domain layer: value types of a payment attempt and the ports through which
//! the crate talks to its host (configuration, rendering surface, external
//! URL opener).

pub mod amount;
pub mod config;
pub mod navigation;
pub mod payment;
pub mod ports;
pub mod session;
