//! Content-kind dispatch: every inbound message yields exactly one reply.

use voxbrief_core::{ContentKind, InboundMessage};

use crate::relay::MediaRelay;
use crate::transport::MediaTransport;

/// Route `msg` by kind and produce the reply text.
///
/// Text is echoed, the four media kinds go through the relay, anything else
/// gets a generic acknowledgment. Never fails.
pub async fn respond(
    msg: &InboundMessage,
    relay: &MediaRelay,
    transport: &dyn MediaTransport,
) -> String {
    let templates = relay.templates();
    match &msg.kind {
        ContentKind::Text => templates.render_echo(msg.payload_ref.as_deref().unwrap_or("")),
        ContentKind::Voice | ContentKind::Audio | ContentKind::Video | ContentKind::VideoNote => {
            relay.relay_reply(msg, transport).await
        }
        ContentKind::Other(label) => templates.render_acknowledge(label),
    }
}
