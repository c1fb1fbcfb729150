//! Structured logging vocabulary shared by the streamer crates.
//!
//! Events are emitted with `tracing`; `event` and `component` are always present so logs
//! can be filtered per module without parsing messages.

pub mod events;
pub mod fields;
