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

//! Transport boundary consumed by the streamer.
//!
//! The streamer never touches sockets itself. It sends through an [`OscTransport`] and
//! receives by registering an [`OscListener`] on it.

use crate::endpoint::Endpoint;
use crate::message::OscMessage;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::sync::Arc;

/// Failures reported by a transport implementation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransportError {
    /// The listening socket could not be acquired.
    Bind(String),
    /// The message could not be serialized for the wire.
    Encode(String),
    /// The destination refused or could not be reached.
    Unreachable(String),
    /// The transport was closed before the operation.
    Closed,
    /// The listener was never registered.
    ListenerNotFound,
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Bind(reason) => write!(f, "unable to bind listener: {reason}"),
            TransportError::Encode(reason) => write!(f, "unable to encode message: {reason}"),
            TransportError::Unreachable(reason) => write!(f, "destination unreachable: {reason}"),
            TransportError::Closed => write!(f, "transport closed"),
            TransportError::ListenerNotFound => write!(f, "listener not registered"),
        }
    }
}

impl Error for TransportError {}

/// Inbound message callback.
#[async_trait]
pub trait OscListener: Send + Sync {
    async fn on_receive(&self, message: OscMessage, source: SocketAddr);
}

/// Send primitive plus listener registration for one addressed-message transport.
#[async_trait]
pub trait OscTransport: Send + Sync {
    async fn send(&self, destination: &Endpoint, message: &OscMessage)
        -> Result<(), TransportError>;

    async fn register_listener(&self, listener: Arc<dyn OscListener>)
        -> Result<(), TransportError>;

    async fn unregister_listener(
        &self,
        listener: Arc<dyn OscListener>,
    ) -> Result<(), TransportError>;
}
