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

//! # osc-streamer
//!
//! `osc-streamer` is a local OSC message-routing bridge. Peers subscribe their UDP
//! endpoints to topics by sending control messages; the streamer forwards application
//! messages to subscribers and pushes results polled from an external search feed.
//!
//! Typical usage is API-first and centered on [`OscStreamer`], wired to any
//! [`OscTransport`] and optionally a [`FeedClient`].
//!
//! ## Address grammar
//!
//! | Inbound address              | Payload  | Effect                                          |
//! |------------------------------|----------|-------------------------------------------------|
//! | `/LocalNet/Add/<topic>`      | `[port]` | subscribe `(sender host, port)` to `<topic>`    |
//! | `/LocalNet/Remove/<topic>`   | `[port]` | unsubscribe `(sender host, port)`               |
//! | `/LocalNet/List...`          | `[port]` | reply `/LocalNet/Receivers ["a,b,c"]`           |
//! | `/<Namespace>/<loc>/<kind>`  | `[value]`| forward `["<value>"]` to router topic subscribers|
//!
//! Anything else is ignored.
//!
//! ## Subscription contract
//!
//! ```
//! use std::net::SocketAddr;
//! use std::sync::Arc;
//! use osc_streamer::{
//!     DispatchOutcome, FeedSource, OscArg, OscMessage, OscStreamer, StreamerSettings,
//! };
//!
//! # pub mod mock_transport {
//! #     use std::sync::Arc;
//! #     use async_trait::async_trait;
//! #     use osc_streamer::{Endpoint, OscListener, OscMessage, OscTransport, TransportError};
//! #
//! #     pub struct MockTransport;
//! #
//! #     #[async_trait]
//! #     impl OscTransport for MockTransport {
//! #         async fn send(
//! #             &self,
//! #             _destination: &Endpoint,
//! #             _message: &OscMessage,
//! #         ) -> Result<(), TransportError> {
//! #             Ok(())
//! #         }
//! #         async fn register_listener(
//! #             &self,
//! #             _listener: Arc<dyn OscListener>,
//! #         ) -> Result<(), TransportError> {
//! #             Ok(())
//! #         }
//! #         async fn unregister_listener(
//! #             &self,
//! #             _listener: Arc<dyn OscListener>,
//! #         ) -> Result<(), TransportError> {
//! #             Ok(())
//! #         }
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let streamer = OscStreamer::start(
//!     StreamerSettings::new("quick-start"),
//!     Arc::new(mock_transport::MockTransport),
//!     FeedSource::Disabled,
//! )
//! .await
//! .unwrap();
//!
//! let peer: SocketAddr = "192.168.1.20:5555".parse().unwrap();
//! let add = OscMessage::new("/LocalNet/Add/osc", vec![OscArg::Int(9000)]);
//! let outcome = streamer.router().dispatch(&add, peer).await;
//! assert!(matches!(outcome, DispatchOutcome::Subscribed { .. }));
//! assert_eq!(streamer.subscribers("OSC").await.len(), 1);
//!
//! let junk = OscMessage::new("/LocalNet/Add", Vec::new());
//! assert!(matches!(
//!     streamer.router().dispatch(&junk, peer).await,
//!     DispatchOutcome::Ignored(_)
//! ));
//!
//! streamer.shutdown().await;
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: outward `OscStreamer` surface and settings
//! - Routing: topic identity, subscriber registry and address parsing
//! - Data plane: ingress address router and egress fan-out
//! - Feed bridge: watermark-deduplicated poll-to-push conversion
//! - Runtime: the cancellable poll loop driving the feed bridge
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod data_plane;
pub use data_plane::address_router::{AddressRouter, DispatchOutcome};
pub use data_plane::egress_fan_out::FanOutReport;

mod endpoint;
pub use endpoint::Endpoint;

mod feed;
pub use feed::{FeedClient, FeedError, FeedQuery, FeedResult, SearchOrder};

mod feed_bridge;
pub use feed_bridge::poll_health::FeedPollHealth;
pub use feed_bridge::polling_bridge::{
    PollingBridge, PollingBridgeSettings, TickOutcome, DEFAULT_FETCH_TIMEOUT,
    DEFAULT_MAX_RESULTS, DEFAULT_POLL_PERIOD, INITIAL_WATERMARK,
};

mod message;
pub use message::{OscArg, OscMessage};

#[doc(hidden)]
pub mod benchmark_support;
#[doc(hidden)]
pub mod observability;

mod routing;
pub use routing::address::{
    application_address, parse, AddressOperation, UnrecognizedReason, TOPIC_LIST_REPLY_ADDRESS,
};
pub use routing::subscriber_registry::{AddOutcome, RemoveOutcome, SubscriberRegistry};
pub use routing::topic::Topic;

mod runtime;

mod streamer;
pub use streamer::{
    FeedSettings, FeedSource, OscStreamer, StreamerError, StreamerSettings, DEFAULT_FEED_QUERY,
    DEFAULT_FEED_TOPIC, DEFAULT_LOCATION, DEFAULT_NAMESPACE, DEFAULT_ROUTER_TOPIC,
    DEFAULT_TICK_INTERVAL,
};

mod transport;
pub use transport::{OscListener, OscTransport, TransportError};
