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

//! Canonical structured field keys and value-format helpers.

use crate::message::{OscArg, OscMessage};

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const ADDRESS: &str = "address";
pub const PAYLOAD: &str = "payload";
pub const SOURCE: &str = "source";
pub const DESTINATION: &str = "destination";
pub const TOPIC: &str = "topic";
pub const WATERMARK: &str = "watermark";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const REASON_CANCELLED: &str = "cancelled";

/// Upper bound on payload text copied into a single log field.
pub const MAX_LOGGED_TEXT_LEN: usize = 120;

pub fn format_payload(message: &OscMessage) -> String {
    format_args_list(&message.args)
}

pub fn format_args_list(args: &[OscArg]) -> String {
    if args.is_empty() {
        return NONE.to_string();
    }

    let joined = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(",");
    truncate_text(&joined)
}

/// Shortens text to [`MAX_LOGGED_TEXT_LEN`] characters, respecting char boundaries.
pub fn truncate_text(text: &str) -> String {
    match text.char_indices().nth(MAX_LOGGED_TEXT_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
