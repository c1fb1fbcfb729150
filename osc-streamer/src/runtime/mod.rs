//! Runtime integration layer.
//!
//! Owns the background task that drives the feed bridge cadence so timing and
//! cancellation stay out of the bridge itself.

pub(crate) mod poll_runtime;
