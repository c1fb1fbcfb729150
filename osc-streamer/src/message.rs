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

//! Transport-neutral addressed message model.

use std::fmt::{Display, Formatter};

/// One payload argument of an [`OscMessage`].
#[derive(Clone, Debug, PartialEq)]
pub enum OscArg {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bool(bool),
    Blob(Vec<u8>),
    Nil,
}

impl OscArg {
    /// Interprets the argument as a subscriber port.
    ///
    /// Senders pass the port either as an integer or as a decimal string. Zero and values
    /// outside the `u16` range are rejected.
    pub fn as_port(&self) -> Option<u16> {
        let port = match self {
            OscArg::Int(value) => u16::try_from(*value).ok(),
            OscArg::Long(value) => u16::try_from(*value).ok(),
            OscArg::String(value) => value.trim().parse::<u16>().ok(),
            _ => None,
        }?;

        (port != 0).then_some(port)
    }
}

impl Display for OscArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OscArg::Int(value) => write!(f, "{value}"),
            OscArg::Long(value) => write!(f, "{value}"),
            OscArg::Float(value) => write!(f, "{value}"),
            OscArg::Double(value) => write!(f, "{value}"),
            OscArg::String(value) => f.write_str(value),
            OscArg::Bool(value) => write!(f, "{value}"),
            OscArg::Blob(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            OscArg::Nil => Ok(()),
        }
    }
}

impl From<i32> for OscArg {
    fn from(value: i32) -> Self {
        OscArg::Int(value)
    }
}

impl From<&str> for OscArg {
    fn from(value: &str) -> Self {
        OscArg::String(value.to_string())
    }
}

impl From<String> for OscArg {
    fn from(value: String) -> Self {
        OscArg::String(value)
    }
}

/// An address plus its ordered payload arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct OscMessage {
    pub address: String,
    pub args: Vec<OscArg>,
}

impl OscMessage {
    pub fn new(address: impl Into<String>, args: Vec<OscArg>) -> Self {
        Self {
            address: address.into(),
            args,
        }
    }

    /// Builds a message carrying a single string argument.
    pub fn with_text(address: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(address, vec![OscArg::String(text.into())])
    }

    pub fn first_arg(&self) -> Option<&OscArg> {
        self.args.first()
    }
}

#[cfg(test)]
mod tests {
    use super::{OscArg, OscMessage};

    #[test]
    fn port_accepts_integer_and_numeric_string_arguments() {
        assert_eq!(OscArg::Int(9000).as_port(), Some(9000));
        assert_eq!(OscArg::Long(57120).as_port(), Some(57120));
        assert_eq!(OscArg::from(" 9001 ").as_port(), Some(9001));
    }

    #[test]
    fn port_rejects_out_of_range_and_non_numeric_arguments() {
        assert_eq!(OscArg::Int(0).as_port(), None);
        assert_eq!(OscArg::Int(-1).as_port(), None);
        assert_eq!(OscArg::Long(70_000).as_port(), None);
        assert_eq!(OscArg::from("ninety").as_port(), None);
        assert_eq!(OscArg::Float(9000.0).as_port(), None);
        assert_eq!(OscArg::Nil.as_port(), None);
    }

    #[test]
    fn display_stringifies_payload_values() {
        assert_eq!(OscArg::Int(42).to_string(), "42");
        assert_eq!(OscArg::Float(0.5).to_string(), "0.5");
        assert_eq!(OscArg::from("hello").to_string(), "hello");
        assert_eq!(OscArg::Bool(true).to_string(), "true");
        assert_eq!(OscArg::Blob(b"raw".to_vec()).to_string(), "raw");
        assert_eq!(OscArg::Nil.to_string(), "");
    }

    #[test]
    fn with_text_builds_single_string_payload() {
        let message = OscMessage::with_text("/AEffectLab/here/Twitter", "hi");

        assert_eq!(message.args, vec![OscArg::String("hi".to_string())]);
        assert_eq!(message.first_arg(), Some(&OscArg::String("hi".to_string())));
    }
}
