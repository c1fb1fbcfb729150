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

//! Case-insensitive topic identity.

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// A receiver-kind name subscribers can register under.
///
/// Identity is the lowercase key; the label keeps the spelling it was configured with so
/// outbound addresses read the same as before (`/AEffectLab/here/Twitter`).
#[derive(Clone, Debug)]
pub struct Topic {
    label: String,
    key: String,
}

impl Topic {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let key = Self::normalize(&label);
        Self { label, key }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn normalize(name: &str) -> String {
        name.to_lowercase()
    }
}

impl PartialEq for Topic {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Topic {}

impl Hash for Topic {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<&str> for Topic {
    fn from(label: &str) -> Self {
        Topic::new(label)
    }
}
