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

//! Search feed HTTP client.

use crate::error::SearchFeedError;
use crate::types::{SearchResponse, TokenResponse};
use async_trait::async_trait;
use osc_streamer::{FeedClient, FeedError, FeedQuery, FeedResult};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

const COMPONENT: &str = "search_feed_client";

const TOKEN_PATH: &str = "/oauth2/token";
const SEARCH_PATH: &str = "/search/tweets.json";

/// How the client obtains its bearer token.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Credentials {
    #[default]
    None,
    /// Pre-issued app-only bearer token, used as-is.
    BearerToken(String),
    /// Consumer key and secret exchanged for a bearer token at startup.
    ConsumerKey { key: String, secret: String },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchFeedConfig {
    pub base_url: String,
    pub credentials: Credentials,
    /// Bound on every HTTP request, including the token exchange.
    pub request_timeout: Duration,
}

/// Authenticated client for `GET {base_url}/search/tweets.json`.
pub struct SearchFeedClient {
    client: Client,
    base_url: String,
    bearer_token: String,
    request_timeout: Duration,
}

impl SearchFeedClient {
    /// Builds the HTTP client and obtains a bearer token.
    ///
    /// Missing credentials or a rejected token exchange fail with
    /// [`SearchFeedError::Auth`].
    pub async fn authenticate(config: SearchFeedConfig) -> Result<Self, SearchFeedError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SearchFeedError::InvalidConfig(
                "base_url must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| SearchFeedError::InvalidConfig(err.to_string()))?;

        let bearer_token = match config.credentials {
            Credentials::None => {
                return Err(SearchFeedError::Auth("no credentials configured".to_string()))
            }
            Credentials::BearerToken(token) => token,
            Credentials::ConsumerKey { key, secret } => {
                exchange_bearer_token(&client, &base_url, &key, &secret, config.request_timeout)
                    .await?
            }
        };

        info!(
            component = COMPONENT,
            base_url = base_url.as_str(),
            "search feed client authenticated"
        );

        Ok(Self {
            client,
            base_url,
            bearer_token,
            request_timeout: config.request_timeout,
        })
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<FeedResult>, SearchFeedError> {
        let url = format!("{}{SEARCH_PATH}", self.base_url);
        let count = query.max_results.to_string();
        let since_id = query.since_id.to_string();

        debug!(
            component = COMPONENT,
            q = query.query.as_str(),
            since_id = query.since_id,
            count = query.max_results,
            "searching feed"
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("q", query.query.as_str()),
                ("count", count.as_str()),
                ("result_type", query.order.as_str()),
                ("since_id", since_id.as_str()),
                ("include_entities", "false"),
            ])
            .send()
            .await
            .map_err(|err| classify(err, self.request_timeout))?;

        let response = check_response(response).await?;
        let body: SearchResponse = response
            .json()
            .await
            .map_err(|err| SearchFeedError::Parse(err.to_string()))?;

        Ok(body.statuses.into_iter().map(FeedResult::from).collect())
    }
}

#[async_trait]
impl FeedClient for SearchFeedClient {
    async fn search(&self, query: &FeedQuery) -> Result<Vec<FeedResult>, FeedError> {
        self.fetch(query).await.map_err(FeedError::from)
    }
}

async fn exchange_bearer_token(
    client: &Client,
    base_url: &str,
    key: &str,
    secret: &str,
    request_timeout: Duration,
) -> Result<String, SearchFeedError> {
    let response = client
        .post(format!("{base_url}{TOKEN_PATH}"))
        .basic_auth(key, Some(secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|err| classify(err, request_timeout))?;

    let status = response.status();
    if status.is_client_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(SearchFeedError::Auth(format!(
            "token exchange rejected with HTTP {}: {body}",
            status.as_u16()
        )));
    }

    let response = check_response(response).await?;
    let token: TokenResponse = response
        .json()
        .await
        .map_err(|err| SearchFeedError::Parse(err.to_string()))?;

    if !token.token_type.eq_ignore_ascii_case("bearer") {
        return Err(SearchFeedError::Auth(format!(
            "unexpected token type {}",
            token.token_type
        )));
    }

    Ok(token.access_token)
}

async fn check_response(response: Response) -> Result<Response, SearchFeedError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status.as_u16() == 401 {
        return Err(SearchFeedError::Auth(format!("HTTP 401: {body}")));
    }
    Err(SearchFeedError::Api {
        status: status.as_u16(),
        body,
    })
}

fn classify(err: reqwest::Error, request_timeout: Duration) -> SearchFeedError {
    if err.is_timeout() {
        SearchFeedError::Timeout(request_timeout)
    } else {
        SearchFeedError::Network(err.to_string())
    }
}
