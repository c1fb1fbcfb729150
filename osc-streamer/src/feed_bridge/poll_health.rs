//! Public health metadata for feed poll attempts.

use crate::feed::FeedError;
use std::time::SystemTime;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeedPollHealth {
    pub last_attempt_at: Option<SystemTime>,
    pub last_success_at: Option<SystemTime>,
    pub last_attempt_succeeded: Option<bool>,
    pub last_error: Option<FeedError>,
    pub watermark: u64,
    pub delivered_total: u64,
}
