//! Outer interfaces: CSV/JSON formats used by the `payform` CLI to replay
//! recorded navigation traces.

pub mod csv;
