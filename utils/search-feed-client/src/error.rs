/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Search feed client error types.

use osc_streamer::FeedError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchFeedError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<SearchFeedError> for FeedError {
    fn from(err: SearchFeedError) -> Self {
        match err {
            SearchFeedError::Auth(reason) => FeedError::Unauthenticated(reason),
            SearchFeedError::Timeout(after) => FeedError::Timeout(after),
            SearchFeedError::Parse(reason) => FeedError::Decode(reason),
            other => FeedError::Request(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SearchFeedError;
    use osc_streamer::FeedError;
    use std::time::Duration;

    #[test]
    fn converts_into_feed_error_by_kind() {
        assert_eq!(
            FeedError::from(SearchFeedError::Auth("bad key".to_string())),
            FeedError::Unauthenticated("bad key".to_string())
        );
        assert_eq!(
            FeedError::from(SearchFeedError::Timeout(Duration::from_secs(3))),
            FeedError::Timeout(Duration::from_secs(3))
        );
        assert_eq!(
            FeedError::from(SearchFeedError::Api {
                status: 503,
                body: "over capacity".to_string()
            }),
            FeedError::Request("API error: HTTP 503: over capacity".to_string())
        );
    }
}
