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

use osc_streamer::{OscArg, OscMessage, TransportError};
use rosc::{OscPacket, OscType};

/// Decodes one datagram into the messages it carries, flattening nested bundles in
/// order.
pub fn decode_datagram(datagram: &[u8]) -> Result<Vec<OscMessage>, String> {
    if datagram.is_empty() {
        return Err("empty datagram".to_string());
    }
    let (_, packet) = rosc::decoder::decode_udp(datagram).map_err(|err| format!("{err:?}"))?;

    let mut messages = Vec::new();
    flatten(packet, &mut messages);
    Ok(messages)
}

fn flatten(packet: OscPacket, messages: &mut Vec<OscMessage>) {
    match packet {
        OscPacket::Message(message) => messages.push(OscMessage::new(
            message.addr,
            message.args.into_iter().map(from_osc_type).collect(),
        )),
        OscPacket::Bundle(bundle) => {
            for packet in bundle.content {
                flatten(packet, messages);
            }
        }
    }
}

// Types without a routing meaning keep their position as `Nil`.
fn from_osc_type(arg: OscType) -> OscArg {
    match arg {
        OscType::Int(value) => OscArg::Int(value),
        OscType::Long(value) => OscArg::Long(value),
        OscType::Float(value) => OscArg::Float(value),
        OscType::Double(value) => OscArg::Double(value),
        OscType::String(value) => OscArg::String(value),
        OscType::Char(value) => OscArg::String(value.to_string()),
        OscType::Bool(value) => OscArg::Bool(value),
        OscType::Blob(value) => OscArg::Blob(value),
        _ => OscArg::Nil,
    }
}

fn to_osc_type(arg: &OscArg) -> OscType {
    match arg {
        OscArg::Int(value) => OscType::Int(*value),
        OscArg::Long(value) => OscType::Long(*value),
        OscArg::Float(value) => OscType::Float(*value),
        OscArg::Double(value) => OscType::Double(*value),
        OscArg::String(value) => OscType::String(value.clone()),
        OscArg::Bool(value) => OscType::Bool(*value),
        OscArg::Blob(value) => OscType::Blob(value.clone()),
        OscArg::Nil => OscType::Nil,
    }
}

/// Encodes a single message as an OSC packet.
pub fn encode_message(message: &OscMessage) -> Result<Vec<u8>, TransportError> {
    let packet = OscPacket::Message(rosc::OscMessage {
        addr: message.address.clone(),
        args: message.args.iter().map(to_osc_type).collect(),
    });

    rosc::encoder::encode(&packet).map_err(|err| TransportError::Encode(format!("{err:?}")))
}
