//! Adapters for the domain ports: file-backed configuration and in-memory
//! stand-ins for the host's surface and external opener.

pub mod in_memory;
pub mod properties;
