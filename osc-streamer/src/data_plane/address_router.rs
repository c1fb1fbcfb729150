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

//! Ingress listener that dispatches inbound messages by address.

use crate::data_plane::egress_fan_out::{EgressFanOut, FanOutReport};
use crate::endpoint::Endpoint;
use crate::message::{OscArg, OscMessage};
use crate::observability::{events, fields};
use crate::routing::address::{
    application_address, parse, AddressOperation, UnrecognizedReason, TOPIC_LIST_REPLY_ADDRESS,
};
use crate::routing::subscriber_registry::{AddOutcome, RemoveOutcome, SubscriberRegistry};
use crate::routing::topic::Topic;
use crate::transport::{OscListener, OscTransport};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, Level};

const COMPONENT: &str = "address_router";

/// What a single dispatch did.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchOutcome {
    Subscribed {
        topic: String,
        endpoint: Endpoint,
        outcome: AddOutcome,
    },
    Unsubscribed {
        topic: String,
        endpoint: Endpoint,
        outcome: RemoveOutcome,
    },
    TopicsListed {
        reply_to: Endpoint,
        report: FanOutReport,
    },
    Forwarded {
        address: String,
        report: FanOutReport,
    },
    Ignored(UnrecognizedReason),
}

/// Dispatches control requests against the registry and forwards application messages
/// to the subscribers of the router's own topic.
pub struct AddressRouter {
    namespace: String,
    own_topic: Topic,
    registry: Arc<SubscriberRegistry>,
    egress: EgressFanOut,
}

impl AddressRouter {
    /// `own_topic` is the topic forwarded messages are broadcast to; it should be one of the
    /// registry's topics, otherwise forwards reach nobody.
    pub fn new(
        namespace: &str,
        own_topic: Topic,
        registry: Arc<SubscriberRegistry>,
        transport: Arc<dyn OscTransport>,
    ) -> Self {
        Self {
            namespace: namespace.to_string(),
            own_topic,
            registry,
            egress: EgressFanOut::new(transport),
        }
    }

    pub fn own_topic(&self) -> &Topic {
        &self.own_topic
    }

    /// Handles one inbound message from `source`.
    pub async fn dispatch(&self, message: &OscMessage, source: SocketAddr) -> DispatchOutcome {
        if tracing::enabled!(Level::DEBUG) {
            debug!(
                event = events::DISPATCH_RECEIVE,
                component = COMPONENT,
                address = message.address.as_str(),
                payload = fields::format_payload(message).as_str(),
                source = %source,
                "received message"
            );
        }

        match parse(message, &self.namespace) {
            AddressOperation::Subscribe { topic, port } => {
                let endpoint = Endpoint::new(source.ip(), port);
                let outcome = self.registry.add(&topic, endpoint).await;
                DispatchOutcome::Subscribed {
                    topic,
                    endpoint,
                    outcome,
                }
            }
            AddressOperation::Unsubscribe { topic, port } => {
                let endpoint = Endpoint::new(source.ip(), port);
                let outcome = self.registry.remove(&topic, &endpoint).await;
                DispatchOutcome::Unsubscribed {
                    topic,
                    endpoint,
                    outcome,
                }
            }
            AddressOperation::ListTopics { reply_port } => {
                self.reply_with_topics(Endpoint::new(source.ip(), reply_port))
                    .await
            }
            AddressOperation::Forward {
                destination,
                kind,
                value,
            } => self.forward(&destination, &kind, &value).await,
            AddressOperation::Unrecognized(reason) => {
                debug!(
                    event = events::DISPATCH_IGNORED,
                    component = COMPONENT,
                    address = message.address.as_str(),
                    source = %source,
                    reason = reason.as_str(),
                    "ignoring message"
                );
                DispatchOutcome::Ignored(reason)
            }
        }
    }

    async fn reply_with_topics(&self, reply_to: Endpoint) -> DispatchOutcome {
        let topics = self.registry.list().join(",");
        info!(
            event = events::TOPIC_LIST_REPLY,
            component = COMPONENT,
            destination = %reply_to,
            topics = topics.as_str(),
            "sending topic list"
        );

        let reply = OscMessage::with_text(TOPIC_LIST_REPLY_ADDRESS, topics);
        let report = self.egress.unicast(&reply_to, &reply).await;
        DispatchOutcome::TopicsListed { reply_to, report }
    }

    async fn forward(&self, destination: &str, kind: &str, value: &OscArg) -> DispatchOutcome {
        let address = application_address(&self.namespace, destination, kind);
        let message = OscMessage::with_text(address.as_str(), value.to_string());
        let subscribers = self.registry.endpoints_of(self.own_topic.key()).await;

        info!(
            event = events::FORWARD_BROADCAST,
            component = COMPONENT,
            address = address.as_str(),
            payload = fields::truncate_text(&value.to_string()).as_str(),
            topic = self.own_topic.key(),
            subscribers = subscribers.len(),
            "forwarding to subscribers"
        );

        let report = self.egress.broadcast(&subscribers, &message).await;
        DispatchOutcome::Forwarded { address, report }
    }
}

#[async_trait]
impl OscListener for AddressRouter {
    async fn on_receive(&self, message: OscMessage, source: SocketAddr) {
        self.dispatch(&message, source).await;
    }
}
