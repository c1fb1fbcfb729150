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

//! HTTP implementation of [`osc_streamer::FeedClient`] for a tweet-search style API.

mod client;
pub use client::{Credentials, SearchFeedClient, SearchFeedConfig};

mod error;
pub use error::SearchFeedError;

mod types;
