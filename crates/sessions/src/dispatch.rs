//! Outbound message dispatch.
//!
//! Every send runs the same protocol: health gate, registration gate,
//! presence on, submit, presence off.  The presence-off steps run no matter
//! how the submit ended, and their failures never mask the submit error.

use tokio_util::sync::CancellationToken;

use wagate_domain::error::{Error, Result};
use wagate_network::types::MessagePayload;

use crate::manager::SessionManager;
use crate::presence;
use crate::resolve::resolve_address;

/// Outbound content, keyed by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text { body: String },
    Location { latitude: f64, longitude: f64 },
    Contact { name: String, number: String },
}

impl MessageContent {
    /// Whether the composing indicator should show recording instead of
    /// typing.  Reserved for a voice-note kind; every current kind types.
    fn is_audio(&self) -> bool {
        false
    }

    fn into_payload(self) -> MessagePayload {
        match self {
            Self::Text { body } => MessagePayload::Conversation(body),
            Self::Location {
                latitude,
                longitude,
            } => MessagePayload::Location {
                latitude,
                longitude,
            },
            Self::Contact { name, number } => MessagePayload::Contact {
                vcard: contact_vcard(&name, &number),
                display_name: name,
            },
        }
    }
}

fn contact_vcard(name: &str, number: &str) -> String {
    format!(
        "BEGIN:VCARD\nVERSION:3.0\nN:;{name};;;\nFN:{name}\nTEL;type=CELL;waid={number}:+{number}\nEND:VCARD"
    )
}

impl SessionManager {
    /// Send `content` to `raw_target`, returning the generated message ID.
    ///
    /// `cancel` aborts the in-flight submission; the presence cleanup still
    /// runs.  Two concurrent sends on the same key may interleave their
    /// presence toggles — per-call the order is strictly availability →
    /// composing → submit → composing off → availability off.
    pub async fn send(
        &self,
        key: &str,
        raw_target: &str,
        content: MessageContent,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let handle = self.registry.handle(key)?;
        handle.ensure_ready()?;

        let target = resolve_address(&handle, raw_target).await?;
        let audio = content.is_audio();

        presence::set_availability(&handle, true).await;
        presence::set_composing(&handle, &target, true, audio).await;

        let message_id = handle.client().generate_message_id();
        let payload = content.into_payload();

        let submit = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Send("cancelled by caller".into())),
            result = handle.client().send_message(&target, payload, &message_id) => {
                result.map_err(|err| Error::Send(err.to_string()))
            }
        };

        // Cleanup runs regardless of the submit outcome.
        presence::set_composing(&handle, &target, false, audio).await;
        presence::set_availability(&handle, false).await;

        submit?;

        tracing::info!(
            session = %key,
            target = %target,
            message_id = %message_id,
            "message sent"
        );
        Ok(message_id)
    }
}
