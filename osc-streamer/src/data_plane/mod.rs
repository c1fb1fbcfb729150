//! Data-plane layer.
//!
//! Owns the ingress dispatcher registered on the transport and the egress fan-out that
//! sends to subscriber endpoints. Routing policy lives in `routing`; this layer only
//! turns parsed operations into registry calls and sends.

pub(crate) mod address_router;
pub(crate) mod egress_fan_out;
