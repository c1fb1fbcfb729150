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

//! OSC over UDP implementation of [`osc_streamer::OscTransport`].
//!
//! Datagrams are decoded with `rosc`; bundles are flattened into their messages and
//! every message is handed to every registered listener on its own task.

mod codec;
pub use codec::{decode_datagram, encode_message};

mod udp_transport;
pub use udp_transport::UdpOscTransport;
