//! Shared fakes for the session-flow integration tests: a network client,
//! device store, and client factory that record call order so tests can
//! assert the exact side-effect sequence of each operation.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use wagate_domain::address::CanonicalAddress;
use wagate_domain::config::{Config, DatastoreConfig, DeviceConfig, LinkingConfig};
use wagate_domain::error::{Error, Result};
use wagate_network::platform::PlatformType;
use wagate_network::traits::{ClientFactory, DeviceStore, NetworkClient};
use wagate_network::types::{
    ChatPresence, ChatPresenceMedia, ClientSettings, ContactMatch, DeviceRecord, GroupInfo,
    MessagePayload, Presence, QrEvent,
};
use wagate_sessions::SessionManager;

pub type CallLog = Arc<Mutex<Vec<String>>>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Fake network client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Default)]
pub struct FakeClient {
    pub log: CallLog,
    pub connected: AtomicBool,
    pub logged_in: AtomicBool,
    pub device_identity: AtomicBool,
    /// `+`-prefixed numbers considered registered on the network.
    pub registered: Mutex<HashSet<String>>,
    pub fail_submit: AtomicBool,
    pub fail_logout: AtomicBool,
    /// Events the next `qr_channel` call will deliver.
    pub qr_events: Mutex<Vec<QrEvent>>,
    /// When set, the QR stream stays open after the queued events instead
    /// of closing, as a real client does between code rotations.
    pub keep_qr_open: AtomicBool,
    qr_tx: Mutex<Option<mpsc::Sender<QrEvent>>>,
    pub sent: Mutex<Vec<(CanonicalAddress, MessagePayload, String)>>,
    pub group_list: Mutex<Vec<GroupInfo>>,
}

impl FakeClient {
    pub fn record(&self, call: impl Into<String>) {
        self.log.lock().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn register_number(&self, number: &str) {
        self.registered.lock().insert(format!("+{number}"));
    }
}

#[async_trait::async_trait]
impl NetworkClient for FakeClient {
    async fn connect(&self) -> Result<()> {
        self.record("connect");
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) {
        self.record("disconnect");
        self.connected.store(false, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }

    fn has_device_identity(&self) -> bool {
        self.device_identity.load(Ordering::SeqCst)
    }

    async fn qr_channel(&self) -> Result<mpsc::Receiver<QrEvent>> {
        self.record("qr_channel");
        let events = std::mem::take(&mut *self.qr_events.lock());
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            tx.send(event).await.expect("channel sized to fit");
        }
        if self.keep_qr_open.load(Ordering::SeqCst) {
            *self.qr_tx.lock() = Some(tx);
        }
        Ok(rx)
    }

    async fn pair_phone(
        &self,
        phone: &str,
        _show_push_notification: bool,
        _client_type: PlatformType,
        display_label: &str,
    ) -> Result<String> {
        self.record(format!("pair_phone({phone},{display_label})"));
        Ok("ABCD-1234".into())
    }

    async fn is_on_network(&self, numbers: &[String]) -> Result<Vec<ContactMatch>> {
        self.record("is_on_network");
        let registered = self.registered.lock();
        Ok(numbers
            .iter()
            .map(|number| {
                let is_registered = registered.contains(number);
                ContactMatch {
                    query: number.clone(),
                    is_registered,
                    address: is_registered
                        .then(|| CanonicalAddress::parse(number).unwrap()),
                }
            })
            .collect())
    }

    async fn send_presence(&self, presence: Presence) -> Result<()> {
        match presence {
            Presence::Available => self.record("presence(available)"),
            Presence::Unavailable => self.record("presence(unavailable)"),
        }
        Ok(())
    }

    async fn send_chat_presence(
        &self,
        _target: &CanonicalAddress,
        state: ChatPresence,
        _media: ChatPresenceMedia,
    ) -> Result<()> {
        match state {
            ChatPresence::Composing => self.record("compose(true)"),
            ChatPresence::Paused => self.record("compose(false)"),
        }
        Ok(())
    }

    fn generate_message_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string().to_uppercase()
    }

    async fn send_message(
        &self,
        target: &CanonicalAddress,
        payload: MessagePayload,
        message_id: &str,
    ) -> Result<()> {
        self.record("submit");
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(Error::Network("stream closed mid-send".into()));
        }
        self.sent
            .lock()
            .push((target.clone(), payload, message_id.to_owned()));
        Ok(())
    }

    async fn joined_groups(&self) -> Result<Vec<GroupInfo>> {
        self.record("joined_groups");
        Ok(self.group_list.lock().clone())
    }

    async fn join_group_with_link(&self, link: &str) -> Result<String> {
        self.record(format!("join_group({link})"));
        Ok("1203456789-1234@g.us".into())
    }

    async fn leave_group(&self, group: &CanonicalAddress) -> Result<()> {
        self.record(format!("leave_group({group})"));
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.record("logout");
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(Error::Network("logout rejected".into()));
        }
        self.connected.store(false, Ordering::SeqCst);
        self.logged_in.store(false, Ordering::SeqCst);
        self.device_identity.store(false, Ordering::SeqCst);
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Fake device store & client factory
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Default)]
pub struct FakeStore {
    pub created: Mutex<Vec<String>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_delete: AtomicBool,
}

#[async_trait::async_trait]
impl DeviceStore for FakeStore {
    async fn load_or_create(&self, key: &str) -> Result<DeviceRecord> {
        // Yield so racing get_or_create calls actually interleave.
        tokio::task::yield_now().await;
        self.created.lock().push(key.to_owned());
        Ok(DeviceRecord {
            id: format!("rec-{key}"),
            key: key.to_owned(),
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Error::Store("datastore unreachable".into()));
        }
        self.deleted.lock().push(key.to_owned());
        Ok(())
    }
}

pub struct FakeFactory {
    client: Arc<FakeClient>,
    pub built: AtomicUsize,
    pub last_settings: Mutex<Option<ClientSettings>>,
}

impl FakeFactory {
    pub fn new(client: Arc<FakeClient>) -> Self {
        Self {
            client,
            built: AtomicUsize::new(0),
            last_settings: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl ClientFactory for FakeFactory {
    async fn build(
        &self,
        _record: &DeviceRecord,
        settings: ClientSettings,
    ) -> Result<Arc<dyn NetworkClient>> {
        self.built.fetch_add(1, Ordering::SeqCst);
        *self.last_settings.lock() = Some(settings);
        Ok(self.client.clone())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Wiring helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub fn test_config() -> Config {
    Config {
        datastore: DatastoreConfig {
            backend: "sqlite3".into(),
            uri: "file::memory:".into(),
        },
        device: DeviceConfig::default(),
        linking: LinkingConfig::default(),
        proxy_url: None,
    }
}

pub struct Fixture {
    pub manager: SessionManager,
    pub client: Arc<FakeClient>,
    pub store: Arc<FakeStore>,
    pub factory: Arc<FakeFactory>,
}

pub fn fixture() -> Fixture {
    fixture_with(test_config())
}

pub fn fixture_with(config: Config) -> Fixture {
    let client = Arc::new(FakeClient::default());
    let store = Arc::new(FakeStore::default());
    let factory = Arc::new(FakeFactory::new(client.clone()));
    let manager = SessionManager::new(config, store.clone(), factory.clone());
    Fixture {
        manager,
        client,
        store,
        factory,
    }
}

impl Fixture {
    /// Create the session for `key` and mark it connected + logged in, as
    /// if a linking flow had completed earlier.
    pub async fn ready_session(&self, key: &str) {
        self.manager.get_or_create(key).await.unwrap();
        self.client.connected.store(true, Ordering::SeqCst);
        self.client.logged_in.store(true, Ordering::SeqCst);
        self.client.device_identity.store(true, Ordering::SeqCst);
        self.client.log.lock().clear();
    }
}
