use integration_test_utils::{source, RecordingTransport};
use osc_streamer::{FeedSource, OscArg, OscMessage, OscStreamer, StreamerSettings};
use std::sync::Arc;

pub(crate) async fn start_streamer(
    settings: StreamerSettings,
    feed: FeedSource,
) -> (OscStreamer, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let streamer = OscStreamer::start(settings, transport.clone(), feed)
        .await
        .expect("streamer should start");
    (streamer, transport)
}

pub(crate) async fn send_control(
    transport: &RecordingTransport,
    address: &str,
    port: i32,
    from: &str,
) {
    transport
        .deliver(
            OscMessage::new(address, vec![OscArg::Int(port)]),
            source(from),
        )
        .await;
}

#[allow(dead_code)]
pub(crate) async fn subscribe(transport: &RecordingTransport, topic: &str, port: i32, from: &str) {
    send_control(transport, &format!("/LocalNet/Add/{topic}"), port, from).await;
}

#[allow(dead_code)]
pub(crate) async fn unsubscribe(
    transport: &RecordingTransport,
    topic: &str,
    port: i32,
    from: &str,
) {
    send_control(transport, &format!("/LocalNet/Remove/{topic}"), port, from).await;
}
