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

//! Poll-to-push bridge from an external search feed to topic subscribers.

use crate::data_plane::egress_fan_out::EgressFanOut;
use crate::feed::{FeedClient, FeedError, FeedQuery, FeedResult, SearchOrder};
use crate::feed_bridge::poll_health::FeedPollHealth;
use crate::message::OscMessage;
use crate::observability::{events, fields};
use crate::routing::address::application_address;
use crate::routing::subscriber_registry::SubscriberRegistry;
use crate::routing::topic::Topic;
use crate::transport::OscTransport;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

const COMPONENT: &str = "polling_bridge";

pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(6);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Watermark before anything has been seen; also the `since` used for the startup fetch.
pub const INITIAL_WATERMARK: u64 = 1;

/// Fixed parameters of one bridge.
#[derive(Clone, Debug)]
pub struct PollingBridgeSettings {
    pub namespace: String,
    pub location: String,
    /// Topic whose subscribers receive feed items; its label is the address kind.
    pub topic: Topic,
    pub query: String,
    pub poll_period: Duration,
    pub fetch_timeout: Duration,
    pub max_results: usize,
}

impl PollingBridgeSettings {
    pub fn new(namespace: &str, location: &str, topic: Topic, query: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            location: location.to_string(),
            topic,
            query: query.to_string(),
            poll_period: DEFAULT_POLL_PERIOD,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// What one call to [`PollingBridge::tick`] did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// The poll period has not elapsed yet.
    Skipped,
    Polled {
        fetched: usize,
        delivered: usize,
        watermark: u64,
    },
    FeedFailed(FeedError),
}

enum FeedConnection {
    Ready(Arc<dyn FeedClient>),
    Unauthenticated(String),
}

/// Polls the feed on a fixed cadence and pushes each unseen result to the subscribers of
/// its topic.
///
/// Owned by a single poll task; `tick` takes `&mut self`, so two ticks never overlap.
pub struct PollingBridge {
    settings: PollingBridgeSettings,
    registry: Arc<SubscriberRegistry>,
    egress: EgressFanOut,
    feed: FeedConnection,
    watermark: u64,
    last_poll: Option<Instant>,
    health: watch::Sender<FeedPollHealth>,
}

impl PollingBridge {
    pub fn new(
        settings: PollingBridgeSettings,
        registry: Arc<SubscriberRegistry>,
        transport: Arc<dyn OscTransport>,
        feed: Arc<dyn FeedClient>,
    ) -> Self {
        Self::with_connection(settings, registry, transport, FeedConnection::Ready(feed))
    }

    /// Builds a bridge whose feed client never authenticated; every poll reports
    /// [`FeedError::Unauthenticated`].
    pub fn unauthenticated(
        settings: PollingBridgeSettings,
        registry: Arc<SubscriberRegistry>,
        transport: Arc<dyn OscTransport>,
        reason: impl Into<String>,
    ) -> Self {
        Self::with_connection(
            settings,
            registry,
            transport,
            FeedConnection::Unauthenticated(reason.into()),
        )
    }

    fn with_connection(
        settings: PollingBridgeSettings,
        registry: Arc<SubscriberRegistry>,
        transport: Arc<dyn OscTransport>,
        feed: FeedConnection,
    ) -> Self {
        let (health, _) = watch::channel(FeedPollHealth {
            watermark: INITIAL_WATERMARK,
            ..Default::default()
        });

        Self {
            settings,
            registry,
            egress: EgressFanOut::new(transport),
            feed,
            watermark: INITIAL_WATERMARK,
            last_poll: None,
            health,
        }
    }

    pub fn settings(&self) -> &PollingBridgeSettings {
        &self.settings
    }

    pub fn watermark(&self) -> u64 {
        self.watermark
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.feed, FeedConnection::Ready(_))
    }

    /// Subscribes to health updates published after every poll attempt.
    pub fn health(&self) -> watch::Receiver<FeedPollHealth> {
        self.health.subscribe()
    }

    /// Sets the watermark from results that existed before tracking began, without
    /// delivering any of them, and starts the poll cadence at `now`.
    pub async fn initialize(&mut self, now: Instant) -> u64 {
        match self.fetch(INITIAL_WATERMARK).await {
            Ok(results) => {
                for result in &results {
                    debug!(
                        event = events::FEED_INIT_RESULT,
                        component = COMPONENT,
                        id = result.id,
                        source_label = result.source_label.as_str(),
                        created_at = result.created_at.as_deref().unwrap_or(fields::NONE),
                        text = fields::truncate_text(&result.text).as_str(),
                        "skipping pre-existing result"
                    );
                    self.watermark = self.watermark.max(result.id);
                }
                info!(
                    event = events::FEED_INIT_OK,
                    component = COMPONENT,
                    topic = self.settings.topic.key(),
                    existing = results.len(),
                    watermark = self.watermark,
                    "feed watermark initialized"
                );
                self.record_attempt(Ok(0));
            }
            Err(err) => {
                warn!(
                    event = events::FEED_INIT_FAILED,
                    component = COMPONENT,
                    topic = self.settings.topic.key(),
                    watermark = self.watermark,
                    err = %err,
                    "unable to initialize feed watermark"
                );
                self.record_attempt(Err(err));
            }
        }

        self.last_poll = Some(now);
        self.watermark
    }

    /// Runs one poll cycle when the poll period has elapsed since the previous one.
    ///
    /// A bridge that was never initialized initializes instead of polling.
    pub async fn tick(&mut self, now: Instant) -> TickOutcome {
        let Some(last_poll) = self.last_poll else {
            self.initialize(now).await;
            return TickOutcome::Skipped;
        };

        if now.saturating_duration_since(last_poll) < self.settings.poll_period {
            return TickOutcome::Skipped;
        }

        let since = self.watermark;
        debug!(
            event = events::FEED_POLL_START,
            component = COMPONENT,
            topic = self.settings.topic.key(),
            since,
            "polling feed"
        );

        let outcome = match self.fetch(since).await {
            Ok(results) => {
                let fetched = results.len();
                let delivered = self.deliver_unseen(since, results).await;
                info!(
                    event = events::FEED_POLL_OK,
                    component = COMPONENT,
                    topic = self.settings.topic.key(),
                    fetched,
                    delivered,
                    watermark = self.watermark,
                    "feed poll finished"
                );
                self.record_attempt(Ok(delivered));
                TickOutcome::Polled {
                    fetched,
                    delivered,
                    watermark: self.watermark,
                }
            }
            Err(err) => {
                warn!(
                    event = events::FEED_POLL_FAILED,
                    component = COMPONENT,
                    topic = self.settings.topic.key(),
                    watermark = self.watermark,
                    err = %err,
                    "feed poll failed; retrying next period"
                );
                self.record_attempt(Err(err.clone()));
                TickOutcome::FeedFailed(err)
            }
        };

        self.last_poll = Some(now);
        outcome
    }

    /// Pushes results newer than `since` in the order the feed returned them.
    async fn deliver_unseen(&mut self, since: u64, results: Vec<FeedResult>) -> usize {
        let address = application_address(
            &self.settings.namespace,
            &self.settings.location,
            self.settings.topic.label(),
        );

        let mut delivered = 0;
        let mut seen = HashSet::new();
        for result in results {
            if result.id <= since || !seen.insert(result.id) {
                debug!(
                    event = events::FEED_RESULT_SKIPPED,
                    component = COMPONENT,
                    id = result.id,
                    since,
                    "result already delivered"
                );
                continue;
            }

            info!(
                event = events::FEED_RESULT_PUSH,
                component = COMPONENT,
                id = result.id,
                source_label = result.source_label.as_str(),
                text = fields::truncate_text(&result.text).as_str(),
                address = address.as_str(),
                "pushing feed result"
            );

            let subscribers = self
                .registry
                .endpoints_of(self.settings.topic.key())
                .await;
            let message = OscMessage::with_text(address.as_str(), result.text);
            self.egress.broadcast(&subscribers, &message).await;

            self.watermark = self.watermark.max(result.id);
            delivered += 1;
        }

        delivered
    }

    async fn fetch(&self, since_id: u64) -> Result<Vec<FeedResult>, FeedError> {
        let client = match &self.feed {
            FeedConnection::Ready(client) => client,
            FeedConnection::Unauthenticated(reason) => {
                return Err(FeedError::Unauthenticated(reason.clone()))
            }
        };

        let query = FeedQuery {
            query: self.settings.query.clone(),
            since_id,
            max_results: self.settings.max_results,
            order: SearchOrder::MostRecent,
        };

        match tokio::time::timeout(self.settings.fetch_timeout, client.search(&query)).await {
            Ok(result) => result,
            Err(_) => Err(FeedError::Timeout(self.settings.fetch_timeout)),
        }
    }

    fn record_attempt(&self, result: Result<usize, FeedError>) {
        let attempted_at = SystemTime::now();
        let watermark = self.watermark;

        self.health.send_modify(|health| {
            health.last_attempt_at = Some(attempted_at);
            health.watermark = watermark;
            match result {
                Ok(delivered) => {
                    health.last_success_at = Some(attempted_at);
                    health.last_attempt_succeeded = Some(true);
                    health.last_error = None;
                    health.delivered_total += delivered as u64;
                }
                Err(err) => {
                    health.last_attempt_succeeded = Some(false);
                    health.last_error = Some(err);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{PollingBridge, PollingBridgeSettings, TickOutcome, INITIAL_WATERMARK};
    use crate::endpoint::Endpoint;
    use crate::feed::{FeedClient, FeedError, FeedQuery, FeedResult, SearchOrder};
    use crate::message::OscMessage;
    use crate::routing::subscriber_registry::SubscriberRegistry;
    use crate::routing::topic::Topic;
    use crate::transport::{OscListener, OscTransport, TransportError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Default)]
    struct CapturingTransport {
        sent: Mutex<Vec<(Endpoint, OscMessage)>>,
    }

    #[async_trait]
    impl OscTransport for CapturingTransport {
        async fn send(
            &self,
            destination: &Endpoint,
            message: &OscMessage,
        ) -> Result<(), TransportError> {
            self.sent.lock().await.push((*destination, message.clone()));
            Ok(())
        }

        async fn register_listener(
            &self,
            _listener: Arc<dyn OscListener>,
        ) -> Result<(), TransportError> {
            Ok(())
        }

        async fn unregister_listener(
            &self,
            _listener: Arc<dyn OscListener>,
        ) -> Result<(), TransportError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct QueuedFeed {
        responses: Mutex<VecDeque<Result<Vec<FeedResult>, FeedError>>>,
        queries: Mutex<Vec<FeedQuery>>,
    }

    impl QueuedFeed {
        fn with(responses: Vec<Result<Vec<FeedResult>, FeedError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl FeedClient for QueuedFeed {
        async fn search(&self, query: &FeedQuery) -> Result<Vec<FeedResult>, FeedError> {
            self.queries.lock().await.push(query.clone());
            self.responses
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    struct StalledFeed;

    #[async_trait]
    impl FeedClient for StalledFeed {
        async fn search(&self, _query: &FeedQuery) -> Result<Vec<FeedResult>, FeedError> {
            std::future::pending().await
        }
    }

    fn result(id: u64) -> FeedResult {
        FeedResult {
            id,
            text: format!("post {id}"),
            source_label: "someone".to_string(),
            created_at: None,
        }
    }

    fn subscriber() -> Endpoint {
        Endpoint::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)), 9000)
    }

    async fn bridge_with(
        feed: Arc<dyn FeedClient>,
    ) -> (PollingBridge, Arc<CapturingTransport>) {
        let registry = Arc::new(SubscriberRegistry::new(
            ["osc", "Twitter"].map(Topic::from),
        ));
        registry.add("twitter", subscriber()).await;
        let transport = Arc::new(CapturingTransport::default());
        let settings =
            PollingBridgeSettings::new("AEffectLab", "here", Topic::new("Twitter"), "#aelab");
        (
            PollingBridge::new(settings, registry, transport.clone(), feed),
            transport,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_sets_watermark_without_delivering_backlog() {
        let feed = QueuedFeed::with(vec![Ok(vec![result(40), result(55), result(12)])]);
        let (mut bridge, transport) = bridge_with(feed.clone()).await;

        let watermark = bridge.initialize(Instant::now()).await;

        assert_eq!(watermark, 55);
        assert!(transport.sent.lock().await.is_empty());
        let queries = feed.queries.lock().await;
        assert_eq!(queries[0].since_id, INITIAL_WATERMARK);
        assert_eq!(queries[0].max_results, 50);
        assert_eq!(queries[0].order, SearchOrder::MostRecent);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_is_a_no_op_before_poll_period_elapses() {
        let feed = QueuedFeed::with(vec![Ok(Vec::new()), Ok(vec![result(9)])]);
        let (mut bridge, _) = bridge_with(feed.clone()).await;
        let start = Instant::now();
        bridge.initialize(start).await;

        let outcome = bridge.tick(start + Duration::from_secs(5)).await;

        assert_eq!(outcome, TickOutcome::Skipped);
        assert_eq!(feed.queries.lock().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_delivers_only_results_above_watermark_in_feed_order() {
        let w = 100;
        let feed = QueuedFeed::with(vec![
            Ok(vec![result(w)]),
            Ok(vec![result(w), result(w - 1), result(w + 3), result(w + 1)]),
        ]);
        let (mut bridge, transport) = bridge_with(feed.clone()).await;
        let start = Instant::now();
        bridge.initialize(start).await;

        let outcome = bridge.tick(start + Duration::from_secs(6)).await;

        assert_eq!(
            outcome,
            TickOutcome::Polled {
                fetched: 4,
                delivered: 2,
                watermark: w + 3
            }
        );
        let sent = transport.sent.lock().await;
        let texts: Vec<_> = sent.iter().map(|(_, message)| message.clone()).collect();
        assert_eq!(
            texts,
            vec![
                OscMessage::with_text("/AEffectLab/here/Twitter", format!("post {}", w + 3)),
                OscMessage::with_text("/AEffectLab/here/Twitter", format!("post {}", w + 1)),
            ]
        );
        assert!(sent.iter().all(|(endpoint, _)| *endpoint == subscriber()));
        assert_eq!(feed.queries.lock().await[1].since_id, w);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_id_in_one_response_is_pushed_once() {
        let feed = QueuedFeed::with(vec![
            Ok(vec![result(20)]),
            Ok(vec![result(22), result(21), result(22)]),
        ]);
        let (mut bridge, transport) = bridge_with(feed).await;
        let start = Instant::now();
        bridge.initialize(start).await;

        let outcome = bridge.tick(start + Duration::from_secs(6)).await;

        assert_eq!(
            outcome,
            TickOutcome::Polled {
                fetched: 3,
                delivered: 2,
                watermark: 22
            }
        );
        let texts: Vec<_> = transport
            .sent
            .lock()
            .await
            .iter()
            .map(|(_, message)| message.clone())
            .collect();
        assert_eq!(
            texts,
            vec![
                OscMessage::with_text("/AEffectLab/here/Twitter", "post 22"),
                OscMessage::with_text("/AEffectLab/here/Twitter", "post 21"),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn feed_failure_keeps_watermark_and_preserves_cadence() {
        let feed = QueuedFeed::with(vec![
            Ok(vec![result(10)]),
            Err(FeedError::Request("502 bad gateway".to_string())),
            Ok(vec![result(11)]),
        ]);
        let (mut bridge, transport) = bridge_with(feed.clone()).await;
        let start = Instant::now();
        bridge.initialize(start).await;

        let failed_at = start + Duration::from_secs(6);
        let outcome = bridge.tick(failed_at).await;
        assert_eq!(
            outcome,
            TickOutcome::FeedFailed(FeedError::Request("502 bad gateway".to_string()))
        );
        assert_eq!(bridge.watermark(), 10);

        assert_eq!(
            bridge.tick(failed_at + Duration::from_secs(1)).await,
            TickOutcome::Skipped
        );

        let outcome = bridge.tick(failed_at + Duration::from_secs(6)).await;
        assert!(matches!(outcome, TickOutcome::Polled { delivered: 1, .. }));
        assert_eq!(transport.sent.lock().await.len(), 1);

        let health = bridge.health().borrow().clone();
        assert_eq!(health.watermark, 11);
        assert_eq!(health.last_attempt_succeeded, Some(true));
        assert_eq!(health.delivered_total, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_fetch_times_out_as_feed_failure() {
        let (mut bridge, _) = bridge_with(Arc::new(StalledFeed)).await;
        let start = Instant::now();

        assert_eq!(bridge.initialize(start).await, INITIAL_WATERMARK);

        let outcome = bridge.tick(start + Duration::from_secs(6)).await;
        assert_eq!(
            outcome,
            TickOutcome::FeedFailed(FeedError::Timeout(Duration::from_secs(10)))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unauthenticated_bridge_reports_failure_every_poll() {
        let registry = Arc::new(SubscriberRegistry::new([Topic::new("Twitter")]));
        let settings =
            PollingBridgeSettings::new("AEffectLab", "here", Topic::new("Twitter"), "#aelab");
        let mut bridge = PollingBridge::unauthenticated(
            settings,
            registry,
            Arc::new(CapturingTransport::default()),
            "no credentials configured",
        );
        let start = Instant::now();
        bridge.initialize(start).await;

        assert!(!bridge.is_authenticated());
        for round in 1..=3u64 {
            let outcome = bridge.tick(start + Duration::from_secs(6 * round)).await;
            assert_eq!(
                outcome,
                TickOutcome::FeedFailed(FeedError::Unauthenticated(
                    "no credentials configured".to_string()
                ))
            );
        }
        assert_eq!(bridge.health().borrow().last_attempt_succeeded, Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_on_uninitialized_bridge_only_initializes() {
        let feed = QueuedFeed::with(vec![Ok(vec![result(5)])]);
        let (mut bridge, transport) = bridge_with(feed).await;

        assert_eq!(bridge.tick(Instant::now()).await, TickOutcome::Skipped);
        assert_eq!(bridge.watermark(), 5);
        assert!(transport.sent.lock().await.is_empty());
    }
}
