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

//! Address grammar for inbound control and application messages.
//!
//! ```text
//! /LocalNet/Add/<topic>            [port]   subscribe sender host at port
//! /LocalNet/Remove/<topic>         [port]   unsubscribe
//! /LocalNet/List...                [port]   reply /LocalNet/Receivers ["a,b"]
//! /<Namespace>/<location>/<kind>   [value]  forward to router subscribers
//! ```
//!
//! Family and command segments match case-insensitively. Every segment and payload
//! access is bounds-checked; anything that does not fit yields
//! [`AddressOperation::Unrecognized`].

use crate::message::{OscArg, OscMessage};

const LOCALNET_FAMILY: &str = "localnet";
const ADD_COMMAND: &str = "add";
const REMOVE_COMMAND: &str = "remove";
const LIST_COMMAND_PREFIX: &str = "list";

/// Address of the unicast reply to a topic-list request.
pub const TOPIC_LIST_REPLY_ADDRESS: &str = "/LocalNet/Receivers";

/// Why an inbound message did not map to an operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnrecognizedReason {
    EmptyAddress,
    UnknownFamily,
    UnknownLocalNetCommand,
    MissingSegment,
    MissingPort,
    MissingValue,
}

impl UnrecognizedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnrecognizedReason::EmptyAddress => "empty_address",
            UnrecognizedReason::UnknownFamily => "unknown_family",
            UnrecognizedReason::UnknownLocalNetCommand => "unknown_localnet_command",
            UnrecognizedReason::MissingSegment => "missing_segment",
            UnrecognizedReason::MissingPort => "missing_or_invalid_port",
            UnrecognizedReason::MissingValue => "missing_value",
        }
    }
}

/// Typed form of one inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum AddressOperation {
    Subscribe {
        topic: String,
        port: u16,
    },
    Unsubscribe {
        topic: String,
        port: u16,
    },
    ListTopics {
        reply_port: u16,
    },
    /// `destination` and `kind` keep the spelling used by the sender.
    Forward {
        destination: String,
        kind: String,
        value: OscArg,
    },
    Unrecognized(UnrecognizedReason),
}

struct Segments<'a> {
    raw: Vec<&'a str>,
}

impl<'a> Segments<'a> {
    fn split(address: &'a str) -> Self {
        Self {
            raw: address.trim_start_matches('/').split('/').collect(),
        }
    }

    fn get(&self, index: usize) -> Option<&'a str> {
        self.raw
            .get(index)
            .copied()
            .filter(|segment| !segment.is_empty())
    }

    fn lowercase(&self, index: usize) -> Option<String> {
        self.get(index).map(str::to_lowercase)
    }
}

/// Maps a message onto an operation, given this system's application namespace.
pub fn parse(message: &OscMessage, namespace: &str) -> AddressOperation {
    let segments = Segments::split(&message.address);

    let Some(family) = segments.lowercase(0) else {
        return AddressOperation::Unrecognized(UnrecognizedReason::EmptyAddress);
    };

    if family == LOCALNET_FAMILY {
        parse_localnet(&segments, message)
    } else if family == namespace.to_lowercase() {
        parse_forward(&segments, message)
    } else {
        AddressOperation::Unrecognized(UnrecognizedReason::UnknownFamily)
    }
}

fn parse_localnet(segments: &Segments<'_>, message: &OscMessage) -> AddressOperation {
    let Some(command) = segments.lowercase(1) else {
        return AddressOperation::Unrecognized(UnrecognizedReason::MissingSegment);
    };

    let port = message.first_arg().and_then(OscArg::as_port);

    if command == ADD_COMMAND || command == REMOVE_COMMAND {
        let Some(topic) = segments.lowercase(2) else {
            return AddressOperation::Unrecognized(UnrecognizedReason::MissingSegment);
        };
        let Some(port) = port else {
            return AddressOperation::Unrecognized(UnrecognizedReason::MissingPort);
        };

        if command == ADD_COMMAND {
            AddressOperation::Subscribe { topic, port }
        } else {
            AddressOperation::Unsubscribe { topic, port }
        }
    } else if command.starts_with(LIST_COMMAND_PREFIX) {
        match port {
            Some(reply_port) => AddressOperation::ListTopics { reply_port },
            None => AddressOperation::Unrecognized(UnrecognizedReason::MissingPort),
        }
    } else {
        AddressOperation::Unrecognized(UnrecognizedReason::UnknownLocalNetCommand)
    }
}

fn parse_forward(segments: &Segments<'_>, message: &OscMessage) -> AddressOperation {
    let (Some(destination), Some(kind)) = (segments.get(1), segments.get(2)) else {
        return AddressOperation::Unrecognized(UnrecognizedReason::MissingSegment);
    };
    let Some(value) = message.first_arg() else {
        return AddressOperation::Unrecognized(UnrecognizedReason::MissingValue);
    };

    AddressOperation::Forward {
        destination: destination.to_string(),
        kind: kind.to_string(),
        value: value.clone(),
    }
}

/// Builds `/<namespace>/<location>/<kind>`.
pub fn application_address(namespace: &str, location: &str, kind: &str) -> String {
    format!("/{namespace}/{location}/{kind}")
}

#[cfg(test)]
mod tests {
    use super::{application_address, parse, AddressOperation, UnrecognizedReason};
    use crate::message::{OscArg, OscMessage};

    const NAMESPACE: &str = "AEffectLab";

    fn parse_with(address: &str, args: Vec<OscArg>) -> AddressOperation {
        parse(&OscMessage::new(address, args), NAMESPACE)
    }

    #[test]
    fn add_and_remove_lowercase_topic_and_read_port() {
        assert_eq!(
            parse_with("/LocalNet/Add/OSC", vec![OscArg::Int(9000)]),
            AddressOperation::Subscribe {
                topic: "osc".to_string(),
                port: 9000
            }
        );
        assert_eq!(
            parse_with("/localnet/REMOVE/Twitter", vec![OscArg::from("9000")]),
            AddressOperation::Unsubscribe {
                topic: "twitter".to_string(),
                port: 9000
            }
        );
    }

    #[test]
    fn any_command_starting_with_list_requests_topics() {
        for address in ["/LocalNet/List", "/LocalNet/ListReceivers", "/LOCALNET/listall"] {
            assert_eq!(
                parse_with(address, vec![OscArg::Int(7000)]),
                AddressOperation::ListTopics { reply_port: 7000 }
            );
        }
    }

    #[test]
    fn forward_keeps_sender_spelling_of_location_and_kind() {
        assert_eq!(
            parse_with("/aeffectlab/Loc1/KindA", vec![OscArg::Int(42)]),
            AddressOperation::Forward {
                destination: "Loc1".to_string(),
                kind: "KindA".to_string(),
                value: OscArg::Int(42),
            }
        );
    }

    #[test]
    fn extra_trailing_segments_are_ignored() {
        assert_eq!(
            parse_with("/LocalNet/Add/osc/extra", vec![OscArg::Int(9000)]),
            AddressOperation::Subscribe {
                topic: "osc".to_string(),
                port: 9000
            }
        );
    }

    #[test]
    fn short_addresses_are_unrecognized_instead_of_faulting() {
        let cases = [
            ("", UnrecognizedReason::EmptyAddress),
            ("/", UnrecognizedReason::EmptyAddress),
            ("/LocalNet", UnrecognizedReason::MissingSegment),
            ("/LocalNet/Add", UnrecognizedReason::MissingSegment),
            ("/LocalNet/Add/", UnrecognizedReason::MissingSegment),
            ("/LocalNet/Remove", UnrecognizedReason::MissingSegment),
            ("/AEffectLab", UnrecognizedReason::MissingSegment),
            ("/AEffectLab/here", UnrecognizedReason::MissingSegment),
        ];

        for (address, reason) in cases {
            assert_eq!(
                parse_with(address, vec![OscArg::Int(9000)]),
                AddressOperation::Unrecognized(reason),
                "address {address:?}"
            );
        }
    }

    #[test]
    fn missing_payload_is_unrecognized() {
        assert_eq!(
            parse_with("/LocalNet/Add/osc", Vec::new()),
            AddressOperation::Unrecognized(UnrecognizedReason::MissingPort)
        );
        assert_eq!(
            parse_with("/LocalNet/List", vec![OscArg::from("not-a-port")]),
            AddressOperation::Unrecognized(UnrecognizedReason::MissingPort)
        );
        assert_eq!(
            parse_with("/AEffectLab/here/Twitter", Vec::new()),
            AddressOperation::Unrecognized(UnrecognizedReason::MissingValue)
        );
    }

    #[test]
    fn unknown_families_and_commands_are_unrecognized() {
        assert_eq!(
            parse_with("/Other/Add/osc", vec![OscArg::Int(9000)]),
            AddressOperation::Unrecognized(UnrecognizedReason::UnknownFamily)
        );
        assert_eq!(
            parse_with("/LocalNet/Ping", vec![OscArg::Int(9000)]),
            AddressOperation::Unrecognized(UnrecognizedReason::UnknownLocalNetCommand)
        );
    }

    #[test]
    fn application_address_joins_segments() {
        assert_eq!(
            application_address("AppNS", "loc1", "kindA"),
            "/AppNS/loc1/kindA"
        );
    }
}
