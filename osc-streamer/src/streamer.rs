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

//! Public `OscStreamer` facade.

use crate::data_plane::address_router::AddressRouter;
use crate::endpoint::Endpoint;
use crate::feed::FeedClient;
use crate::feed_bridge::poll_health::FeedPollHealth;
use crate::feed_bridge::polling_bridge::{
    PollingBridge, PollingBridgeSettings, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_RESULTS,
    DEFAULT_POLL_PERIOD,
};
use crate::observability::events;
use crate::routing::subscriber_registry::SubscriberRegistry;
use crate::routing::topic::Topic;
use crate::runtime::poll_runtime::spawn_poll_loop;
use crate::transport::{OscListener, OscTransport, TransportError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const COMPONENT: &str = "streamer";

pub const DEFAULT_NAMESPACE: &str = "AEffectLab";
pub const DEFAULT_LOCATION: &str = "here";
pub const DEFAULT_ROUTER_TOPIC: &str = "osc";
pub const DEFAULT_FEED_TOPIC: &str = "Twitter";
pub const DEFAULT_FEED_QUERY: &str = "#ficaadica OR aeLab";
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Feed bridge parameters; the namespace and location come from [`StreamerSettings`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeedSettings {
    pub topic: String,
    pub query: String,
    pub poll_period: Duration,
    /// How often the poll loop wakes to check whether a poll is due.
    pub tick_interval: Duration,
    pub fetch_timeout: Duration,
    pub max_results: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            topic: DEFAULT_FEED_TOPIC.to_string(),
            query: DEFAULT_FEED_QUERY.to_string(),
            poll_period: DEFAULT_POLL_PERIOD,
            tick_interval: DEFAULT_TICK_INTERVAL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamerSettings {
    pub name: String,
    pub namespace: String,
    pub location: String,
    /// Topic served by the address router; forwarded messages go to its subscribers.
    pub router_topic: String,
    /// Additional topic names that accept subscriptions without any producer behind them.
    pub topics: Vec<String>,
    pub feed: FeedSettings,
}

impl StreamerSettings {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            router_topic: DEFAULT_ROUTER_TOPIC.to_string(),
            topics: Vec::new(),
            feed: FeedSettings::default(),
        }
    }
}

/// Where the feed bridge gets its results from.
pub enum FeedSource {
    /// No feed bridge runs and the feed topic is not registered.
    Disabled,
    Client(Arc<dyn FeedClient>),
    /// The feed client could not authenticate; the bridge runs but every poll fails.
    Unauthenticated(String),
}

/// Failures that prevent the streamer from starting.
#[derive(Debug)]
pub enum StreamerError {
    EmptyNamespace,
    /// A feed is configured but its poll loop tick interval is zero.
    ZeroTickInterval,
    FailedToRegisterRouter(TransportError),
}

impl Display for StreamerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamerError::EmptyNamespace => write!(f, "namespace must not be empty"),
            StreamerError::ZeroTickInterval => write!(f, "feed tick interval must be non-zero"),
            StreamerError::FailedToRegisterRouter(err) => {
                write!(f, "failed to register address router on transport: {err}")
            }
        }
    }
}

impl Error for StreamerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StreamerError::FailedToRegisterRouter(err) => Some(err),
            _ => None,
        }
    }
}

struct PollTask {
    shutdown: CancellationToken,
    handle: JoinHandle<PollingBridge>,
    health: watch::Receiver<FeedPollHealth>,
}

/// Wires the subscriber registry, the address router and the feed bridge onto one
/// transport.
pub struct OscStreamer {
    name: String,
    registry: Arc<SubscriberRegistry>,
    router: Arc<AddressRouter>,
    transport: Arc<dyn OscTransport>,
    poll_task: Option<PollTask>,
}

impl OscStreamer {
    /// Builds all components, registers the router on `transport` and starts the feed
    /// poll loop.
    ///
    /// An empty namespace or a zero feed tick interval is rejected before anything is
    /// built. Otherwise only a failure to register the router is fatal. A feed that
    /// cannot be reached during startup leaves the watermark at its initial value.
    pub async fn start(
        settings: StreamerSettings,
        transport: Arc<dyn OscTransport>,
        feed: FeedSource,
    ) -> Result<Self, StreamerError> {
        if settings.namespace.trim_matches('/').is_empty() {
            error!(
                event = events::STREAMER_START_FAILED,
                component = COMPONENT,
                name = settings.name.as_str(),
                "streamer namespace is empty"
            );
            return Err(StreamerError::EmptyNamespace);
        }

        if !matches!(feed, FeedSource::Disabled) && settings.feed.tick_interval.is_zero() {
            error!(
                event = events::STREAMER_START_FAILED,
                component = COMPONENT,
                name = settings.name.as_str(),
                "feed tick interval is zero"
            );
            return Err(StreamerError::ZeroTickInterval);
        }

        let router_topic = Topic::new(settings.router_topic.as_str());
        let feed_topic = match feed {
            FeedSource::Disabled => None,
            _ => Some(Topic::new(settings.feed.topic.as_str())),
        };

        let mut topics = vec![router_topic.clone()];
        topics.extend(feed_topic.clone());
        topics.extend(settings.topics.iter().map(|name| Topic::new(name.as_str())));
        let registry = Arc::new(SubscriberRegistry::new(topics));

        let router = Arc::new(AddressRouter::new(
            &settings.namespace,
            router_topic,
            registry.clone(),
            transport.clone(),
        ));

        let bridge = match (feed_topic, feed) {
            (Some(topic), FeedSource::Client(client)) => Some(PollingBridge::new(
                bridge_settings(&settings, topic),
                registry.clone(),
                transport.clone(),
                client,
            )),
            (Some(topic), FeedSource::Unauthenticated(reason)) => {
                Some(PollingBridge::unauthenticated(
                    bridge_settings(&settings, topic),
                    registry.clone(),
                    transport.clone(),
                    reason,
                ))
            }
            _ => None,
        };

        let listener: Arc<dyn OscListener> = router.clone();
        if let Err(err) = transport.register_listener(listener).await {
            error!(
                event = events::STREAMER_START_FAILED,
                component = COMPONENT,
                name = settings.name.as_str(),
                err = %err,
                "unable to register address router"
            );
            return Err(StreamerError::FailedToRegisterRouter(err));
        }

        let poll_task = match bridge {
            Some(mut bridge) => {
                if !bridge.is_authenticated() {
                    warn!(
                        event = events::STREAMER_START,
                        component = COMPONENT,
                        name = settings.name.as_str(),
                        "feed client is not authenticated; feed polls will fail"
                    );
                }
                bridge.initialize(Instant::now()).await;
                let health = bridge.health();
                let shutdown = CancellationToken::new();
                let handle =
                    spawn_poll_loop(bridge, settings.feed.tick_interval, shutdown.clone());
                Some(PollTask {
                    shutdown,
                    handle,
                    health,
                })
            }
            None => None,
        };

        info!(
            event = events::STREAMER_START,
            component = COMPONENT,
            name = settings.name.as_str(),
            namespace = settings.namespace.as_str(),
            location = settings.location.as_str(),
            topics = registry.list().join(",").as_str(),
            feed_bridge = poll_task.is_some(),
            "streamer started"
        );

        Ok(Self {
            name: settings.name,
            registry,
            router,
            transport,
            poll_task,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> Arc<SubscriberRegistry> {
        self.registry.clone()
    }

    pub fn router(&self) -> Arc<AddressRouter> {
        self.router.clone()
    }

    /// Current subscribers of `topic`; empty for unknown topics.
    pub async fn subscribers(&self, topic: &str) -> Vec<Endpoint> {
        self.registry.endpoints_of(topic).await
    }

    /// Latest feed poll health, or `None` when no feed bridge runs.
    pub fn bridge_health(&self) -> Option<FeedPollHealth> {
        self.poll_task
            .as_ref()
            .map(|task| task.health.borrow().clone())
    }

    /// Stops the poll loop, waits for an in-flight poll to finish and unregisters the
    /// router from the transport.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.poll_task.take() {
            task.shutdown.cancel();
            if let Err(err) = task.handle.await {
                warn!(
                    event = events::STREAMER_SHUTDOWN,
                    component = COMPONENT,
                    name = self.name.as_str(),
                    err = %err,
                    "feed poll loop ended abnormally"
                );
            }
        }

        let listener: Arc<dyn OscListener> = self.router.clone();
        if let Err(err) = self.transport.unregister_listener(listener).await {
            warn!(
                event = events::STREAMER_SHUTDOWN,
                component = COMPONENT,
                name = self.name.as_str(),
                err = %err,
                "unable to unregister address router"
            );
        }

        info!(
            event = events::STREAMER_SHUTDOWN,
            component = COMPONENT,
            name = self.name.as_str(),
            "streamer stopped"
        );
    }
}

fn bridge_settings(settings: &StreamerSettings, topic: Topic) -> PollingBridgeSettings {
    PollingBridgeSettings {
        namespace: settings.namespace.clone(),
        location: settings.location.clone(),
        topic,
        query: settings.feed.query.clone(),
        poll_period: settings.feed.poll_period,
        fetch_timeout: settings.feed.fetch_timeout,
        max_results: settings.feed.max_results,
    }
}

impl Drop for OscStreamer {
    fn drop(&mut self) {
        if let Some(task) = &self.poll_task {
            task.shutdown.cancel();
        }
    }
}
