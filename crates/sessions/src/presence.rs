//! Presence signaling around outbound actions.
//!
//! Best-effort UX only: failures are logged at debug level and swallowed,
//! never surfaced as a precondition for message delivery.

use wagate_domain::address::CanonicalAddress;
use wagate_network::types::{ChatPresence, ChatPresenceMedia, Presence};

use crate::registry::SessionHandle;

/// Toggle the session's global availability indicator.
pub async fn set_availability(handle: &SessionHandle, available: bool) {
    let presence = if available {
        Presence::Available
    } else {
        Presence::Unavailable
    };

    if let Err(err) = handle.client().send_presence(presence).await {
        tracing::debug!(session = %handle.key(), error = %err, "presence update dropped");
    }
}

/// Toggle the composing (typing / recording) indicator towards `target`.
pub async fn set_composing(
    handle: &SessionHandle,
    target: &CanonicalAddress,
    composing: bool,
    audio: bool,
) {
    let state = if composing {
        ChatPresence::Composing
    } else {
        ChatPresence::Paused
    };
    let media = if audio {
        ChatPresenceMedia::Audio
    } else {
        ChatPresenceMedia::Text
    };

    if let Err(err) = handle.client().send_chat_presence(target, state, media).await {
        tracing::debug!(
            session = %handle.key(),
            target = %target,
            error = %err,
            "chat presence update dropped"
        );
    }
}
