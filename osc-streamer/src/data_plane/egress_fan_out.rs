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

//! Egress fan-out that sends one message to a set of subscriber endpoints.

use crate::endpoint::Endpoint;
use crate::message::OscMessage;
use crate::observability::{events, fields};
use crate::transport::OscTransport;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn, Level};

const COMPONENT: &str = "egress_fan_out";

/// Delivery counts for one fan-out.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FanOutReport {
    pub delivered: usize,
    pub failed: usize,
}

impl FanOutReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Sends over the shared transport; one failing endpoint never stops the others.
#[derive(Clone)]
pub(crate) struct EgressFanOut {
    transport: Arc<dyn OscTransport>,
}

impl EgressFanOut {
    pub(crate) fn new(transport: Arc<dyn OscTransport>) -> Self {
        Self { transport }
    }

    /// Sends `message` to every endpoint concurrently and reports the outcome.
    pub(crate) async fn broadcast(
        &self,
        endpoints: &[Endpoint],
        message: &OscMessage,
    ) -> FanOutReport {
        let sends = endpoints.iter().map(|endpoint| async move {
            (endpoint, self.transport.send(endpoint, message).await)
        });

        let mut report = FanOutReport::default();
        for (endpoint, result) in join_all(sends).await {
            match result {
                Ok(()) => {
                    report.delivered += 1;
                    debug!(
                        event = events::EGRESS_SEND_OK,
                        component = COMPONENT,
                        destination = %endpoint,
                        address = message.address.as_str(),
                        "egress send succeeded"
                    );
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(
                        event = events::EGRESS_SEND_FAILED,
                        component = COMPONENT,
                        destination = %endpoint,
                        address = message.address.as_str(),
                        err = %err,
                        "egress send failed"
                    );
                }
            }
        }

        if tracing::enabled!(Level::DEBUG) {
            debug!(
                event = events::FAN_OUT_SUMMARY,
                component = COMPONENT,
                address = message.address.as_str(),
                payload = fields::format_payload(message).as_str(),
                delivered = report.delivered,
                failed = report.failed,
                "fan-out finished"
            );
        }

        report
    }

    pub(crate) async fn unicast(&self, endpoint: &Endpoint, message: &OscMessage) -> FanOutReport {
        self.broadcast(std::slice::from_ref(endpoint), message)
            .await
    }
}
