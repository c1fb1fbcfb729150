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

//! External search-feed boundary polled by the feed bridge.

use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Result ordering requested from the feed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SearchOrder {
    #[default]
    MostRecent,
    Popular,
    Mixed,
}

impl SearchOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOrder::MostRecent => "recent",
            SearchOrder::Popular => "popular",
            SearchOrder::Mixed => "mixed",
        }
    }
}

/// One search request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeedQuery {
    pub query: String,
    /// Only results with an identifier above this value are requested.
    pub since_id: u64,
    pub max_results: usize,
    pub order: SearchOrder,
}

/// One item returned by the feed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeedResult {
    pub id: u64,
    pub text: String,
    pub source_label: String,
    pub created_at: Option<String>,
}

/// Failures from the feed or from reaching it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FeedError {
    /// No usable credentials; the client never authenticated.
    Unauthenticated(String),
    /// The request could not be completed.
    Request(String),
    /// The feed answered with something that is not a result list.
    Decode(String),
    /// No answer within the fetch timeout.
    Timeout(Duration),
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Unauthenticated(reason) => {
                write!(f, "feed client is not authenticated: {reason}")
            }
            FeedError::Request(reason) => write!(f, "feed request failed: {reason}"),
            FeedError::Decode(reason) => write!(f, "unable to decode feed response: {reason}"),
            FeedError::Timeout(after) => write!(f, "feed request timed out after {after:?}"),
        }
    }
}

impl Error for FeedError {}

#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn search(&self, query: &FeedQuery) -> Result<Vec<FeedResult>, FeedError>;
}
