//! Device-linking flows: scannable QR code and numeric pairing code, plus
//! the reconnect and logout transitions.
//!
//! Per session key the flow is `NoDevice → Connecting → {AwaitingScan |
//! AwaitingPairingCode} → Linked`; when a device identity already exists
//! the login call short-circuits into a reconnect and reports [`LoginOutcome::Linked`].

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use qrcode::render::svg;
use qrcode::QrCode;

use wagate_domain::error::{Error, Result};
use wagate_network::platform::{host_os_label, PlatformType};
use wagate_network::types::QrEvent;

use crate::manager::SessionManager;
use crate::presence;

/// Pairing codes are displayed on the primary device for a fixed window.
const PAIRING_CODE_TIMEOUT: Duration = Duration::from_secs(160);

/// Result of a login flow.
///
/// A tagged variant, so callers distinguish "already linked, reconnected"
/// from "render this code" without comparing strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A device identity already existed; the session was reconnected.
    Linked,
    /// A fresh code was issued and must be presented to the user within
    /// `timeout`.  For QR logins `payload` is an image data URI; for
    /// pairing logins it is the short numeric code itself.
    CodeIssued { payload: String, timeout: Duration },
}

impl SessionManager {
    /// Start a QR login for `key`.
    ///
    /// With no device identity: tear down any stale socket, open the
    /// code-delivery stream, connect, and wait (bounded by the configured
    /// linking timeout) for the first code event, returned as an SVG image
    /// data URI.  With an existing identity: reconnect and report `Linked`.
    pub async fn start_qr_login(&self, key: &str) -> Result<LoginOutcome> {
        let handle = self.registry.get_or_create(key).await?;
        let client = handle.client();

        client.disconnect().await;

        if client.has_device_identity() {
            self.reconnect(key).await?;
            tracing::info!(session = %key, "device already linked, reconnected");
            return Ok(LoginOutcome::Linked);
        }

        // The stream must exist before the transport comes up, or the first
        // code event can be missed.
        let mut events = client.qr_channel().await?;
        client
            .connect()
            .await
            .map_err(|err| Error::Linking(err.to_string()))?;

        let wait = Duration::from_secs(self.config.linking.qr_wait_secs);
        let code = tokio::time::timeout(wait, async {
            while let Some(event) = events.recv().await {
                match event {
                    QrEvent::Code { code, timeout } => return Ok((code, timeout)),
                    QrEvent::Error(reason) => return Err(Error::Linking(reason)),
                    QrEvent::Timeout | QrEvent::Success => continue,
                }
            }
            Err(Error::Linking(
                "code stream closed before a code was issued".into(),
            ))
        })
        .await;

        let (code, timeout) = match code {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::Linking(format!(
                    "no code event within {}s",
                    wait.as_secs()
                )))
            }
        };

        tracing::info!(session = %key, timeout_secs = timeout.as_secs(), "QR code issued");
        Ok(LoginOutcome::CodeIssued {
            payload: render_qr_data_uri(&code)?,
            timeout,
        })
    }

    /// Start a pairing-code login for `key`.
    ///
    /// The code is requested for the session key's own phone number and
    /// shows up on the primary device labeled as a desktop Chrome client.
    pub async fn start_pairing_login(&self, key: &str) -> Result<LoginOutcome> {
        let handle = self.registry.get_or_create(key).await?;
        let client = handle.client();

        client.disconnect().await;

        if client.has_device_identity() {
            self.reconnect(key).await?;
            tracing::info!(session = %key, "device already linked, reconnected");
            return Ok(LoginOutcome::Linked);
        }

        client
            .connect()
            .await
            .map_err(|err| Error::Linking(err.to_string()))?;

        let display_label = format!("Chrome ({})", host_os_label());
        let code = client
            .pair_phone(key, true, PlatformType::Chrome, &display_label)
            .await
            .map_err(|err| Error::Linking(err.to_string()))?;

        tracing::info!(session = %key, "pairing code issued");
        Ok(LoginOutcome::CodeIssued {
            payload: code,
            timeout: PAIRING_CODE_TIMEOUT,
        })
    }

    /// Force-disconnect and connect again.  Requires an existing device
    /// identity; without one the caller must run a login flow.
    pub async fn reconnect(&self, key: &str) -> Result<()> {
        let handle = self.registry.handle(key)?;
        let client = handle.client();

        client.disconnect().await;

        if !client.has_device_identity() {
            return Err(Error::Linking(
                "no device identity in store, re-link with a new code".into(),
            ));
        }

        client.connect().await?;
        tracing::info!(session = %key, "session reconnected");
        Ok(())
    }

    /// Log the session out of the network and drop its registry entry.
    ///
    /// When the network-side logout fails, fall back to force-disconnecting
    /// and deleting the device record from the store.  The entry is removed
    /// on success or successful fallback; a failed fallback delete returns
    /// `StoreInconsistent` and keeps the handle registered so logout can be
    /// retried.
    pub async fn logout(&self, key: &str) -> Result<()> {
        let handle = self.registry.handle(key)?;
        let client = handle.client();

        presence::set_availability(&handle, false).await;

        if let Err(err) = client.logout().await {
            tracing::warn!(
                session = %key,
                error = %err,
                "network logout failed, deleting device record directly"
            );
            client.disconnect().await;
            if let Err(del) = self.store.delete(key).await {
                return Err(Error::StoreInconsistent(del.to_string()));
            }
        }

        self.registry.remove(key);
        tracing::info!(session = %key, "session logged out");
        Ok(())
    }
}

/// Render a linking code as a scannable SVG image, base64-wrapped into a
/// data URI.
fn render_qr_data_uri(code: &str) -> Result<String> {
    let qr = QrCode::new(code.as_bytes())
        .map_err(|err| Error::Linking(format!("QR encoding failed: {err}")))?;
    let image = qr
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .build();

    Ok(format!("data:image/svg+xml;base64,{}", BASE64.encode(image)))
}
