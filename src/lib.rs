//! Embeds a hosted payment form in a rendering surface and decides, from the
//! navigations the form attempts, when the payment flow is over.
//!
//! The crate is split the usual way:
//! - [`domain`] holds value types and the ports to the host environment.
//! - [`application`] builds the form URL and owns the navigation state machine.
//! - [`infrastructure`] provides file and in-memory adapters for the ports.
//! - [`interfaces`] reads and writes navigation traces for the CLI.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
