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

//! Per-topic subscriber sets shared by the address router and the feed bridge.

use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::endpoint::Endpoint;
use crate::observability::events;
use crate::routing::topic::Topic;

const COMPONENT: &str = "subscriber_registry";

/// Result of [`SubscriberRegistry::add`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddOutcome {
    Added,
    AlreadySubscribed,
    UnknownTopic,
}

/// Result of [`SubscriberRegistry::remove`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RemoveOutcome {
    Removed,
    NotSubscribed,
    UnknownTopic,
}

struct TopicSubscribers {
    topic: Topic,
    endpoints: RwLock<Vec<Endpoint>>,
}

/// Registry of subscriber endpoints keyed by topic.
///
/// The set of topic names is fixed at construction. Each topic owns its own lock, so
/// subscribe and unsubscribe storms on one topic never block fan-out reads on another.
pub struct SubscriberRegistry {
    topics: BTreeMap<String, TopicSubscribers>,
}

impl SubscriberRegistry {
    /// Creates a registry with an empty subscriber set per topic.
    ///
    /// Topics that differ only by case collapse into the first one given.
    pub fn new(topics: impl IntoIterator<Item = Topic>) -> Self {
        let mut by_key = BTreeMap::new();
        for topic in topics {
            by_key
                .entry(topic.key().to_string())
                .or_insert_with(|| TopicSubscribers {
                    topic,
                    endpoints: RwLock::new(Vec::new()),
                });
        }

        Self { topics: by_key }
    }

    fn entry(&self, topic: &str) -> Option<&TopicSubscribers> {
        self.topics.get(&Topic::normalize(topic))
    }

    /// Adds `endpoint` under `topic` unless it is already there.
    pub async fn add(&self, topic: &str, endpoint: Endpoint) -> AddOutcome {
        let Some(entry) = self.entry(topic) else {
            debug!(
                event = events::SUBSCRIBER_UNKNOWN_TOPIC,
                component = COMPONENT,
                topic,
                endpoint = %endpoint,
                "ignoring subscribe for unknown topic"
            );
            return AddOutcome::UnknownTopic;
        };

        let mut endpoints = entry.endpoints.write().await;
        if endpoints.contains(&endpoint) {
            debug!(
                event = events::SUBSCRIBER_ADD_DUPLICATE,
                component = COMPONENT,
                topic = entry.topic.key(),
                endpoint = %endpoint,
                "endpoint already subscribed"
            );
            return AddOutcome::AlreadySubscribed;
        }

        endpoints.push(endpoint);
        info!(
            event = events::SUBSCRIBER_ADD,
            component = COMPONENT,
            topic = entry.topic.key(),
            endpoint = %endpoint,
            subscribers = endpoints.len(),
            "adding subscriber"
        );
        AddOutcome::Added
    }

    /// Removes `endpoint` from `topic` when present.
    pub async fn remove(&self, topic: &str, endpoint: &Endpoint) -> RemoveOutcome {
        let Some(entry) = self.entry(topic) else {
            debug!(
                event = events::SUBSCRIBER_UNKNOWN_TOPIC,
                component = COMPONENT,
                topic,
                endpoint = %endpoint,
                "ignoring unsubscribe for unknown topic"
            );
            return RemoveOutcome::UnknownTopic;
        };

        let mut endpoints = entry.endpoints.write().await;
        let Some(position) = endpoints.iter().position(|existing| existing == endpoint) else {
            debug!(
                event = events::SUBSCRIBER_REMOVE_ABSENT,
                component = COMPONENT,
                topic = entry.topic.key(),
                endpoint = %endpoint,
                "endpoint was not subscribed"
            );
            return RemoveOutcome::NotSubscribed;
        };

        endpoints.remove(position);
        info!(
            event = events::SUBSCRIBER_REMOVE,
            component = COMPONENT,
            topic = entry.topic.key(),
            endpoint = %endpoint,
            subscribers = endpoints.len(),
            "removing subscriber"
        );
        RemoveOutcome::Removed
    }

    /// Returns the known topic names, lowercase and sorted.
    pub fn list(&self) -> Vec<String> {
        self.topics.keys().cloned().collect()
    }

    /// Returns the configured topic for a case-insensitive name.
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.entry(name).map(|entry| &entry.topic)
    }

    pub fn contains_topic(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Snapshot of the endpoints subscribed under `topic`; empty for unknown topics.
    pub async fn endpoints_of(&self, topic: &str) -> Vec<Endpoint> {
        match self.entry(topic) {
            Some(entry) => entry.endpoints.read().await.clone(),
            None => Vec::new(),
        }
    }

    pub async fn subscriber_count(&self, topic: &str) -> usize {
        match self.entry(topic) {
            Some(entry) => entry.endpoints.read().await.len(),
            None => 0,
        }
    }
}
