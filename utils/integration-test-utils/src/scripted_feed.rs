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

use async_trait::async_trait;
use osc_streamer::{FeedClient, FeedError, FeedQuery, FeedResult};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Feed that answers searches from a queue of canned responses, then with empty results.
#[derive(Default)]
pub struct ScriptedFeed {
    responses: Mutex<VecDeque<Result<Vec<FeedResult>, FeedError>>>,
    queries: Mutex<Vec<FeedQuery>>,
}

impl ScriptedFeed {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn push(&self, response: Result<Vec<FeedResult>, FeedError>) {
        self.responses.lock().await.push_back(response);
    }

    /// Every query received so far, in order.
    pub async fn queries(&self) -> Vec<FeedQuery> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl FeedClient for ScriptedFeed {
    async fn search(&self, query: &FeedQuery) -> Result<Vec<FeedResult>, FeedError> {
        self.queries.lock().await.push(query.clone());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
