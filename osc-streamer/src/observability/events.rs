//! Canonical structured event names used across `osc-streamer`.

// Subscriber registry events.
pub const SUBSCRIBER_ADD: &str = "subscriber_add";
pub const SUBSCRIBER_ADD_DUPLICATE: &str = "subscriber_add_duplicate";
pub const SUBSCRIBER_REMOVE: &str = "subscriber_remove";
pub const SUBSCRIBER_REMOVE_ABSENT: &str = "subscriber_remove_absent";
pub const SUBSCRIBER_UNKNOWN_TOPIC: &str = "subscriber_unknown_topic";

// Ingress dispatch events.
pub const DISPATCH_RECEIVE: &str = "dispatch_receive";
pub const DISPATCH_IGNORED: &str = "dispatch_ignored";
pub const TOPIC_LIST_REPLY: &str = "topic_list_reply";
pub const FORWARD_BROADCAST: &str = "forward_broadcast";

// Egress fan-out events.
pub const EGRESS_SEND_OK: &str = "egress_send_ok";
pub const EGRESS_SEND_FAILED: &str = "egress_send_failed";
pub const FAN_OUT_SUMMARY: &str = "fan_out_summary";

// Feed bridge events.
pub const FEED_INIT_OK: &str = "feed_init_ok";
pub const FEED_INIT_FAILED: &str = "feed_init_failed";
pub const FEED_INIT_RESULT: &str = "feed_init_result";
pub const FEED_POLL_START: &str = "feed_poll_start";
pub const FEED_POLL_OK: &str = "feed_poll_ok";
pub const FEED_POLL_FAILED: &str = "feed_poll_failed";
pub const FEED_RESULT_PUSH: &str = "feed_result_push";
pub const FEED_RESULT_SKIPPED: &str = "feed_result_skipped";

// Runtime and lifecycle events.
pub const POLL_LOOP_START: &str = "poll_loop_start";
pub const POLL_LOOP_STOP: &str = "poll_loop_stop";
pub const STREAMER_START: &str = "streamer_start";
pub const STREAMER_START_FAILED: &str = "streamer_start_failed";
pub const STREAMER_SHUTDOWN: &str = "streamer_shutdown";

// Transport implementation events.
pub const TRANSPORT_BIND_OK: &str = "transport_bind_ok";
pub const TRANSPORT_RECV_FAILED: &str = "transport_recv_failed";
pub const TRANSPORT_DECODE_FAILED: &str = "transport_decode_failed";
pub const TRANSPORT_CLOSED: &str = "transport_closed";
