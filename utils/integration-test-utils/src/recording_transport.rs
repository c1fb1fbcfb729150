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
use osc_streamer::{Endpoint, OscListener, OscMessage, OscTransport, TransportError};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory transport that records every send and hands injected inbound messages to
/// its registered listeners.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(Endpoint, OscMessage)>>,
    failing: Mutex<HashSet<Endpoint>>,
    listeners: Mutex<Vec<Arc<dyn OscListener>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every later send to `endpoint` fail with `TransportError::Unreachable`.
    pub async fn fail_sends_to(&self, endpoint: Endpoint) {
        self.failing.lock().await.insert(endpoint);
    }

    /// Every successful send, in order.
    pub async fn sent(&self) -> Vec<(Endpoint, OscMessage)> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_to(&self, endpoint: &Endpoint) -> Vec<OscMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(destination, _)| destination == endpoint)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub async fn listener_count(&self) -> usize {
        self.listeners.lock().await.len()
    }

    /// Delivers `message` as if it arrived from `source`, awaiting every listener.
    pub async fn deliver(&self, message: OscMessage, source: SocketAddr) {
        let listeners = self.listeners.lock().await.clone();
        debug!(
            "delivering {} from {source} to {} listener(s)",
            message.address,
            listeners.len()
        );
        for listener in listeners {
            listener.on_receive(message.clone(), source).await;
        }
    }
}

fn same_listener(left: &Arc<dyn OscListener>, right: &Arc<dyn OscListener>) -> bool {
    Arc::as_ptr(left) as *const () == Arc::as_ptr(right) as *const ()
}

#[async_trait]
impl OscTransport for RecordingTransport {
    async fn send(&self, destination: &Endpoint, message: &OscMessage) -> Result<(), TransportError> {
        if self.failing.lock().await.contains(destination) {
            return Err(TransportError::Unreachable(format!(
                "{destination} is configured to fail"
            )));
        }
        self.sent.lock().await.push((*destination, message.clone()));
        Ok(())
    }

    async fn register_listener(&self, listener: Arc<dyn OscListener>) -> Result<(), TransportError> {
        self.listeners.lock().await.push(listener);
        Ok(())
    }

    async fn unregister_listener(
        &self,
        listener: Arc<dyn OscListener>,
    ) -> Result<(), TransportError> {
        let mut listeners = self.listeners.lock().await;
        let before = listeners.len();
        listeners.retain(|registered| !same_listener(registered, &listener));
        if listeners.len() == before {
            return Err(TransportError::ListenerNotFound);
        }
        Ok(())
    }
}
