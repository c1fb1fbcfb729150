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

use crate::codec::{decode_datagram, encode_message};
use async_trait::async_trait;
use osc_streamer::observability::{events, fields};
use osc_streamer::{Endpoint, OscListener, OscMessage, OscTransport, TransportError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Level};

const COMPONENT: &str = "udp_osc_transport";

/// Largest payload a UDP datagram can carry.
const MAX_DATAGRAM_SIZE: usize = 65_507;

type Listeners = Arc<RwLock<Vec<Arc<dyn OscListener>>>>;

/// OSC transport over one bound UDP socket, used for both receiving and sending.
pub struct UdpOscTransport {
    socket: Arc<UdpSocket>,
    local_addr: SocketAddr,
    listeners: Listeners,
    shutdown: CancellationToken,
    receive_task: Mutex<Option<JoinHandle<()>>>,
}

impl UdpOscTransport {
    /// Binds `address` and starts the receive loop.
    pub async fn bind(address: SocketAddr) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(address)
            .await
            .map_err(|err| TransportError::Bind(format!("{address}: {err}")))?;
        let local_addr = socket
            .local_addr()
            .map_err(|err| TransportError::Bind(format!("{address}: {err}")))?;

        let socket = Arc::new(socket);
        let listeners: Listeners = Arc::new(RwLock::new(Vec::new()));
        let shutdown = CancellationToken::new();
        let receive_task = tokio::spawn(receive_loop(
            socket.clone(),
            listeners.clone(),
            shutdown.clone(),
        ));

        info!(
            event = events::TRANSPORT_BIND_OK,
            component = COMPONENT,
            local_addr = %local_addr,
            "bound OSC UDP socket"
        );

        Ok(Self {
            socket,
            local_addr,
            listeners,
            shutdown,
            receive_task: Mutex::new(Some(receive_task)),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops the receive loop and waits for it to exit. Dispatches already spawned keep
    /// running to completion.
    pub async fn close(&self) {
        self.shutdown.cancel();
        if let Some(task) = self.receive_task.lock().await.take() {
            if let Err(err) = task.await {
                warn!(
                    event = events::TRANSPORT_CLOSED,
                    component = COMPONENT,
                    err = %err,
                    "receive loop ended abnormally"
                );
            }
        }
    }
}

impl Drop for UdpOscTransport {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn receive_loop(socket: Arc<UdpSocket>, listeners: Listeners, shutdown: CancellationToken) {
    let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];

    loop {
        let received = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut buffer) => received,
        };

        match received {
            Ok((len, source)) => dispatch_datagram(&buffer[..len], source, &listeners).await,
            Err(err) => {
                warn!(
                    event = events::TRANSPORT_RECV_FAILED,
                    component = COMPONENT,
                    err = %err,
                    "unable to receive datagram"
                );
            }
        }
    }

    info!(
        event = events::TRANSPORT_CLOSED,
        component = COMPONENT,
        reason = fields::REASON_CANCELLED,
        "receive loop stopped"
    );
}

async fn dispatch_datagram(datagram: &[u8], source: SocketAddr, listeners: &Listeners) {
    let messages = match decode_datagram(datagram) {
        Ok(messages) => messages,
        Err(err) => {
            warn!(
                event = events::TRANSPORT_DECODE_FAILED,
                component = COMPONENT,
                source = %source,
                len = datagram.len(),
                err = err.as_str(),
                "dropping undecodable datagram"
            );
            return;
        }
    };

    let listeners = listeners.read().await.clone();
    for message in messages {
        if tracing::enabled!(Level::DEBUG) {
            debug!(
                component = COMPONENT,
                source = %source,
                address = message.address.as_str(),
                payload = fields::format_payload(&message).as_str(),
                listeners = listeners.len(),
                "received OSC message"
            );
        }
        for listener in &listeners {
            let listener = listener.clone();
            let message = message.clone();
            tokio::spawn(async move {
                listener.on_receive(message, source).await;
            });
        }
    }
}

fn same_listener(left: &Arc<dyn OscListener>, right: &Arc<dyn OscListener>) -> bool {
    Arc::as_ptr(left) as *const () == Arc::as_ptr(right) as *const ()
}

#[async_trait]
impl OscTransport for UdpOscTransport {
    async fn send(&self, destination: &Endpoint, message: &OscMessage) -> Result<(), TransportError> {
        if self.shutdown.is_cancelled() {
            return Err(TransportError::Closed);
        }

        let datagram = encode_message(message)?;
        self.socket
            .send_to(&datagram, destination.socket_addr())
            .await
            .map_err(|err| TransportError::Unreachable(format!("{destination}: {err}")))?;
        Ok(())
    }

    async fn register_listener(&self, listener: Arc<dyn OscListener>) -> Result<(), TransportError> {
        if self.shutdown.is_cancelled() {
            return Err(TransportError::Closed);
        }
        self.listeners.write().await.push(listener);
        Ok(())
    }

    async fn unregister_listener(
        &self,
        listener: Arc<dyn OscListener>,
    ) -> Result<(), TransportError> {
        let mut listeners = self.listeners.write().await;
        let before = listeners.len();
        listeners.retain(|registered| !same_listener(registered, &listener));
        if listeners.len() == before {
            return Err(TransportError::ListenerNotFound);
        }
        Ok(())
    }
}
