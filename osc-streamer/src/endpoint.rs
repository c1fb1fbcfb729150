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

use std::fmt::{Display, Formatter};
use std::net::{IpAddr, SocketAddr};

///
/// [`Endpoint`] is a subscriber address: the host a request came from combined with the
/// port the subscriber asked to be reached on.
///
/// Two endpoints are the same subscriber when both host and port match.
///
/// # Examples
///
/// ```
/// use std::net::{IpAddr, Ipv4Addr, SocketAddr};
/// use osc_streamer::Endpoint;
///
/// let source: SocketAddr = "1.2.3.4:5555".parse().unwrap();
///
/// // The requester listens on a different port than the one it sent from.
/// let endpoint = Endpoint::new(source.ip(), 9000);
///
/// assert_eq!(endpoint.host(), IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)));
/// assert_eq!(endpoint.to_string(), "1.2.3.4:9000");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Endpoint {
    host: IpAddr,
    port: u16,
}

impl Endpoint {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self { host, port }
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip(), addr.port())
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.socket_addr())
    }
}

#[cfg(test)]
mod tests {
    use super::Endpoint;
    use std::collections::HashSet;
    use std::net::{IpAddr, Ipv6Addr, SocketAddr};

    #[test]
    fn endpoints_with_same_host_and_port_are_one_subscriber() {
        let host: IpAddr = "10.0.0.7".parse().expect("valid ip");
        let mut seen = HashSet::new();
        seen.insert(Endpoint::new(host, 9000));
        seen.insert(Endpoint::new(host, 9000));
        seen.insert(Endpoint::new(host, 9001));

        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn display_brackets_ipv6_hosts() {
        let endpoint = Endpoint::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 7000);

        assert_eq!(endpoint.to_string(), "[::1]:7000");
    }

    #[test]
    fn socket_addr_round_trips_through_from() {
        let addr: SocketAddr = "192.168.1.20:57120".parse().expect("valid socket addr");

        assert_eq!(Endpoint::from(addr).socket_addr(), addr);
    }
}
