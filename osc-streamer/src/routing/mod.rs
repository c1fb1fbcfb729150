//! Routing layer.
//!
//! Owns topic identity, the subscriber registry, and the address grammar that maps
//! inbound messages onto typed operations. Nothing here performs I/O.
//!
//! ```
//! use std::net::{IpAddr, Ipv4Addr};
//! use osc_streamer::{AddOutcome, Endpoint, SubscriberRegistry, Topic};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let registry = SubscriberRegistry::new([Topic::new("osc"), Topic::new("Twitter")]);
//! let subscriber = Endpoint::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9000);
//!
//! assert_eq!(registry.add("OSC", subscriber).await, AddOutcome::Added);
//! assert_eq!(registry.add("osc", subscriber).await, AddOutcome::AlreadySubscribed);
//! assert_eq!(registry.add("sms", subscriber).await, AddOutcome::UnknownTopic);
//! assert_eq!(registry.list(), vec!["osc", "twitter"]);
//! # });
//! ```

pub(crate) mod address;
pub(crate) mod subscriber_registry;
pub(crate) mod topic;
