//! Feed bridge layer.
//!
//! Converts a periodically polled search feed into pushed messages for one topic. The
//! bridge owns the watermark; the poll cadence itself is driven by `runtime`.

pub(crate) mod poll_health;
pub(crate) mod polling_bridge;
