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

//! Deterministic benchmark fixtures for the Criterion harness.

use crate::data_plane::address_router::AddressRouter;
use crate::endpoint::Endpoint;
use crate::message::{OscArg, OscMessage};
use crate::routing::address::{parse, AddressOperation};
use crate::routing::subscriber_registry::SubscriberRegistry;
use crate::routing::topic::Topic;
use crate::transport::{OscListener, OscTransport, TransportError};
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const NAMESPACE: &str = "AEffectLab";

fn subscriber_endpoint(index: usize) -> Endpoint {
    let octet = (index % 250) as u8 + 1;
    let port = 10_000 + (index % 50_000) as u16;
    Endpoint::new(IpAddr::V4(Ipv4Addr::new(10, 0, 1, octet)), port)
}

/// Fixed address corpus for `address_parse/*` benchmark IDs.
pub struct AddressParseFixture {
    messages: Vec<OscMessage>,
}

impl AddressParseFixture {
    pub fn new() -> Self {
        let messages = vec![
            OscMessage::new("/LocalNet/Add/osc", vec![OscArg::Int(9000)]),
            OscMessage::new("/LocalNet/Remove/Twitter", vec![OscArg::from("9001")]),
            OscMessage::new("/LocalNet/ListReceivers", vec![OscArg::Int(9002)]),
            OscMessage::new("/AEffectLab/here/kindA", vec![OscArg::Float(0.5)]),
            OscMessage::new("/Elsewhere/here/kindA", vec![OscArg::Int(1)]),
            OscMessage::new("/LocalNet/Add", Vec::new()),
        ];
        Self { messages }
    }

    /// Parses the whole corpus and returns how many messages were recognized.
    pub fn parse_recognized_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| {
                !matches!(parse(message, NAMESPACE), AddressOperation::Unrecognized(_))
            })
            .count()
    }
}

impl Default for AddressParseFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed fixture for `registry_lookup/*` benchmark IDs.
pub struct RegistryLookupFixture {
    registry: SubscriberRegistry,
}

impl RegistryLookupFixture {
    pub async fn new(rows: usize) -> Self {
        let registry = SubscriberRegistry::new(["osc", "Twitter"].map(Topic::from));
        for index in 0..rows.max(1) {
            registry.add("osc", subscriber_endpoint(index)).await;
        }
        Self { registry }
    }

    pub async fn lookup_count(&self) -> usize {
        self.registry.endpoints_of("osc").await.len()
    }
}

#[derive(Default)]
struct CountingTransport {
    send_count: AtomicUsize,
}

#[async_trait]
impl OscTransport for CountingTransport {
    async fn send(
        &self,
        _destination: &Endpoint,
        _message: &OscMessage,
    ) -> Result<(), TransportError> {
        self.send_count.fetch_add(1, Ordering::Relaxed);
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

/// Fixed fixture for `forward_fan_out/*` benchmark IDs.
pub struct ForwardFanOutFixture {
    router: AddressRouter,
    transport: Arc<CountingTransport>,
    message: OscMessage,
    source: SocketAddr,
}

impl ForwardFanOutFixture {
    pub async fn new(subscribers: usize) -> Self {
        let registry = Arc::new(SubscriberRegistry::new([Topic::new("osc")]));
        for index in 0..subscribers.max(1) {
            registry.add("osc", subscriber_endpoint(index)).await;
        }
        let transport = Arc::new(CountingTransport::default());
        let router = AddressRouter::new(
            NAMESPACE,
            Topic::new("osc"),
            registry,
            transport.clone(),
        );

        Self {
            router,
            transport,
            message: OscMessage::new("/AEffectLab/here/kindA", vec![OscArg::Int(42)]),
            source: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5555),
        }
    }

    /// Dispatches one forward and returns the running send count.
    pub async fn forward_once(&self) -> usize {
        self.router.dispatch(&self.message, self.source).await;
        self.transport.send_count.load(Ordering::Relaxed)
    }
}
