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

use osc_streamer::{
    FeedSettings, StreamerSettings, DEFAULT_FEED_QUERY, DEFAULT_FEED_TOPIC, DEFAULT_LOCATION,
    DEFAULT_NAMESPACE, DEFAULT_ROUTER_TOPIC,
};
use search_feed_client::{Credentials, SearchFeedConfig};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

const DEFAULT_BIND_PORT: u16 = 8888;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) streamer: StreamerConfig,
    #[serde(default)]
    pub(crate) transport: TransportConfig,
    #[serde(default)]
    pub(crate) search_feed: Option<SearchFeedSection>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct StreamerConfig {
    pub(crate) name: String,
    #[serde(default = "default_namespace")]
    pub(crate) namespace: String,
    #[serde(default = "default_location")]
    pub(crate) location: String,
    #[serde(default = "default_router_topic")]
    pub(crate) router_topic: String,
    #[serde(default)]
    pub(crate) topics: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    pub(crate) bind_address: SocketAddr,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_BIND_PORT),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SearchFeedSection {
    pub(crate) base_url: String,
    #[serde(default = "default_query")]
    pub(crate) query: String,
    #[serde(default = "default_feed_topic")]
    pub(crate) topic: String,
    #[serde(default = "default_poll_period_secs")]
    pub(crate) poll_period_secs: u64,
    #[serde(default = "default_tick_interval_secs")]
    pub(crate) tick_interval_secs: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub(crate) fetch_timeout_secs: u64,
    #[serde(default = "default_max_results")]
    pub(crate) max_results: usize,
    #[serde(default)]
    pub(crate) bearer_token: Option<String>,
    #[serde(default)]
    pub(crate) consumer_key: Option<String>,
    #[serde(default)]
    pub(crate) consumer_secret: Option<String>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_router_topic() -> String {
    DEFAULT_ROUTER_TOPIC.to_string()
}

fn default_query() -> String {
    DEFAULT_FEED_QUERY.to_string()
}

fn default_feed_topic() -> String {
    DEFAULT_FEED_TOPIC.to_string()
}

fn default_poll_period_secs() -> u64 {
    6
}

fn default_tick_interval_secs() -> u64 {
    5
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_results() -> usize {
    50
}

impl Config {
    pub fn from_json5(contents: &str) -> Result<Self, json5::Error> {
        json5::from_str(contents)
    }

    pub fn streamer_settings(&self) -> StreamerSettings {
        let mut settings = StreamerSettings::new(&self.streamer.name);
        settings.namespace = self.streamer.namespace.clone();
        settings.location = self.streamer.location.clone();
        settings.router_topic = self.streamer.router_topic.clone();
        settings.topics = self.streamer.topics.clone();
        if let Some(feed) = &self.search_feed {
            settings.feed = feed.feed_settings();
        }
        settings
    }
}

impl SearchFeedSection {
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            topic: self.topic.clone(),
            query: self.query.clone(),
            poll_period: Duration::from_secs(self.poll_period_secs),
            tick_interval: Duration::from_secs(self.tick_interval_secs.max(1)),
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            max_results: self.max_results,
        }
    }

    /// A bearer token takes precedence over a consumer key pair.
    pub fn credentials(&self) -> Credentials {
        if let Some(token) = &self.bearer_token {
            return Credentials::BearerToken(token.clone());
        }
        match (&self.consumer_key, &self.consumer_secret) {
            (Some(key), Some(secret)) => Credentials::ConsumerKey {
                key: key.clone(),
                secret: secret.clone(),
            },
            _ => Credentials::None,
        }
    }

    pub fn client_config(&self) -> SearchFeedConfig {
        SearchFeedConfig {
            base_url: self.base_url.clone(),
            credentials: self.credentials(),
            request_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use search_feed_client::Credentials;
    use std::time::Duration;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_json5(r#"{ streamer: { name: "minimal" } }"#)
            .expect("minimal config should parse");

        let settings = config.streamer_settings();
        assert_eq!(settings.name, "minimal");
        assert_eq!(settings.namespace, "AEffectLab");
        assert_eq!(settings.location, "here");
        assert_eq!(settings.router_topic, "osc");
        assert_eq!(config.transport.bind_address.to_string(), "127.0.0.1:8888");
        assert!(config.search_feed.is_none());
    }

    #[test]
    fn search_feed_section_maps_to_settings_and_credentials() {
        let config = Config::from_json5(
            r#"{
                streamer: { name: "full", namespace: "AppNS", topics: ["sms"] },
                transport: { bind_address: "0.0.0.0:9999" },
                search_feed: {
                    base_url: "http://localhost:1234",
                    poll_period_secs: 30,
                    fetch_timeout_secs: 4,
                    consumer_key: "key",
                    consumer_secret: "secret",
                },
            }"#,
        )
        .expect("full config should parse");

        let settings = config.streamer_settings();
        assert_eq!(settings.namespace, "AppNS");
        assert_eq!(settings.topics, vec!["sms"]);
        assert_eq!(settings.feed.topic, "Twitter");
        assert_eq!(settings.feed.poll_period, Duration::from_secs(30));
        assert_eq!(settings.feed.tick_interval, Duration::from_secs(5));

        let feed = config.search_feed.expect("feed section should be present");
        let client_config = feed.client_config();
        assert_eq!(client_config.request_timeout, Duration::from_secs(4));
        assert_eq!(
            client_config.credentials,
            Credentials::ConsumerKey {
                key: "key".to_string(),
                secret: "secret".to_string()
            }
        );
    }

    #[test]
    fn bearer_token_wins_and_half_a_key_pair_is_no_credentials() {
        let config = Config::from_json5(
            r#"{
                streamer: { name: "creds" },
                search_feed: { base_url: "http://x", bearer_token: "t", consumer_key: "k" },
            }"#,
        )
        .expect("config should parse");
        let mut feed = config.search_feed.expect("feed section should be present");
        assert_eq!(feed.credentials(), Credentials::BearerToken("t".to_string()));

        feed.bearer_token = None;
        assert_eq!(feed.credentials(), Credentials::None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::from_json5(r#"{ streamer: { name: "x", colour: "red" } }"#).is_err());
    }

    #[test]
    fn shipped_default_config_parses() {
        let contents = include_str!("../DEFAULT_CONFIG.json5");

        let config = Config::from_json5(contents).expect("shipped config should parse");

        assert_eq!(config.streamer.topics, vec!["sms", "http"]);
        assert!(config.search_feed.is_some());
    }
}
