//! Mock port implementations for core service tests
//!
//! In-memory mocks for the identity provider, profile store, avatar
//! storage, message repository, and realtime feed, enabling deterministic
//! unit tests without any backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use mediatracker_core::{
    AvatarStorage, IdentityProvider, InsertFeed, MessageRepository, ProfileRepository,
    RealtimeEvents, SignUpDetails,
};
use mediatracker_domain::{
    AuthErrorKind, ChatMessage, InsertedRecord, MediaTrackerError, ProfileUpdate,
    Result as DomainResult, Session, UserProfile, UserRole,
};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Session fixture for a user id.
pub fn session_for(user_id: &str, email: &str) -> Session {
    Session {
        access_token: format!("access-{user_id}"),
        refresh_token: format!("refresh-{user_id}"),
        user_id: user_id.to_string(),
        email: email.to_string(),
        expires_at: Utc::now().timestamp() + 3600,
    }
}

/// In-memory mock for `IdentityProvider`.
///
/// Returns a fixed session (or none) and counts provider round trips so
/// tests can assert client-side short-circuits.
#[derive(Default)]
pub struct MockIdentityProvider {
    session: Mutex<Option<Session>>,
    pub fail_sign_in: Mutex<Option<AuthErrorKind>>,
    pub fail_sign_out: Mutex<bool>,
    pub calls: AtomicUsize,
}

impl MockIdentityProvider {
    pub fn with_session(session: Session) -> Self {
        Self { session: Mutex::new(Some(session)), ..Self::default() }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn session_or_err(&self) -> DomainResult<Session> {
        if let Some(kind) = self.fail_sign_in.lock().clone() {
            return Err(MediaTrackerError::Auth(kind));
        }
        self.session
            .lock()
            .clone()
            .ok_or_else(|| MediaTrackerError::Internal("mock has no session".into()))
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, _email: &str, _password: &str) -> DomainResult<Session> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.session_or_err()
    }

    async fn sign_up(
        &self,
        _email: &str,
        _password: &str,
        _details: &SignUpDetails,
    ) -> DomainResult<Session> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.session_or_err()
    }

    async fn current_session(&self) -> DomainResult<Option<Session>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.session.lock().clone())
    }

    async fn sign_out(&self) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_sign_out.lock() {
            return Err(MediaTrackerError::Network("mock sign-out failure".into()));
        }
        *self.session.lock() = None;
        Ok(())
    }

    async fn send_password_reset(&self, _email: &str) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory mock for `ProfileRepository`.
#[derive(Default)]
pub struct MockProfileRepository {
    rows: Mutex<HashMap<String, UserProfile>>,
    pub fail_create: Mutex<bool>,
    pub fail_get: Mutex<bool>,
}

impl MockProfileRepository {
    pub fn with_profile(profile: UserProfile) -> Self {
        let repo = Self::default();
        repo.rows.lock().insert(profile.id.clone(), profile);
        repo
    }

    pub fn stored(&self, id: &str) -> Option<UserProfile> {
        self.rows.lock().get(id).cloned()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn get_by_id(&self, id: &str) -> DomainResult<Option<UserProfile>> {
        if *self.fail_get.lock() {
            return Err(MediaTrackerError::Profile("mock fetch failure".into()));
        }
        Ok(self.rows.lock().get(id).cloned())
    }

    async fn create(&self, profile: &UserProfile) -> DomainResult<()> {
        if *self.fail_create.lock() {
            return Err(MediaTrackerError::Profile("mock insert failure".into()));
        }
        // insert-or-ignore, like the store-side conflict handling
        self.rows.lock().entry(profile.id.clone()).or_insert_with(|| profile.clone());
        Ok(())
    }

    async fn update(&self, id: &str, update: &ProfileUpdate) -> DomainResult<UserProfile> {
        let mut rows = self.rows.lock();
        let row = rows
            .get(id)
            .ok_or_else(|| MediaTrackerError::Profile(format!("no profile row for {id}")))?;
        let merged = row.merged_with(update);
        rows.insert(id.to_string(), merged.clone());
        Ok(merged)
    }
}

/// Mock avatar storage recording the last upload.
#[derive(Default)]
pub struct MockAvatarStorage {
    pub uploads: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl AvatarStorage for MockAvatarStorage {
    async fn upload_avatar(&self, user_id: &str, bytes: Vec<u8>) -> DomainResult<String> {
        self.uploads.lock().push((user_id.to_string(), bytes.len()));
        Ok(format!("https://cdn.example/avatars/{user_id}.jpg"))
    }
}

/// In-memory mock for `MessageRepository`.
///
/// Holds joined rows directly; `insert_message` performs the author join
/// against a seeded profile map, substituting the unknown-sender defaults
/// on a miss.
#[derive(Default)]
pub struct MockMessageRepository {
    rows: Mutex<Vec<ChatMessage>>,
    authors: Mutex<HashMap<String, (String, UserRole)>>,
    pub insert_calls: AtomicUsize,
    pub fail_count: Mutex<bool>,
    pub fail_fetch: Mutex<bool>,
    next_id: AtomicUsize,
}

impl MockMessageRepository {
    pub fn with_author(self, user_id: &str, full_name: &str, role: UserRole) -> Self {
        self.authors.lock().insert(user_id.to_string(), (full_name.to_string(), role));
        self
    }

    pub fn seed_message(&self, message: ChatMessage) {
        self.rows.lock().push(message);
    }

    pub fn insert_call_count(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    fn join(&self, user_id: &str) -> (String, UserRole) {
        self.authors
            .lock()
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| ("Unknown User".to_string(), UserRole::Staff))
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap_or_else(Utc::now)
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn messages_for_zone(&self, zone: &str) -> DomainResult<Vec<ChatMessage>> {
        if *self.fail_fetch.lock() {
            return Err(MediaTrackerError::Fetch("mock fetch failure".into()));
        }
        let mut rows: Vec<ChatMessage> =
            self.rows.lock().iter().filter(|m| m.zone == zone).cloned().collect();
        rows.sort_by_key(|m| m.timestamp);
        Ok(rows)
    }

    async fn insert_message(
        &self,
        zone: &str,
        text: &str,
        user_id: &str,
    ) -> DomainResult<ChatMessage> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let seq = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (sender_name, sender_role) = self.join(user_id);
        let message = ChatMessage {
            id: format!("m{seq}"),
            user_id: user_id.to_string(),
            zone: zone.to_string(),
            message: text.to_string(),
            timestamp: Self::base_time() + Duration::seconds(seq as i64),
            sender_name,
            sender_role,
        };
        self.rows.lock().push(message.clone());
        Ok(message)
    }

    async fn message_by_id(&self, id: &str) -> DomainResult<Option<ChatMessage>> {
        if *self.fail_fetch.lock() {
            return Err(MediaTrackerError::Fetch("mock fetch failure".into()));
        }
        Ok(self.rows.lock().iter().find(|m| m.id == id).cloned())
    }

    async fn message_count(&self, zone: &str) -> DomainResult<u64> {
        if *self.fail_count.lock() {
            return Err(MediaTrackerError::Fetch("mock count failure".into()));
        }
        Ok(self.rows.lock().iter().filter(|m| m.zone == zone).count() as u64)
    }
}

/// Mock realtime port exposing the sender side of each opened feed.
#[derive(Default)]
pub struct MockRealtimeEvents {
    senders: Mutex<Vec<mpsc::Sender<InsertedRecord>>>,
}

impl MockRealtimeEvents {
    /// Sender for the most recently opened feed.
    pub fn latest_sender(&self) -> Option<mpsc::Sender<InsertedRecord>> {
        self.senders.lock().last().cloned()
    }
}

#[async_trait]
impl RealtimeEvents for MockRealtimeEvents {
    async fn subscribe_inserts(&self, _zone: &str) -> DomainResult<InsertFeed> {
        let (tx, rx) = mpsc::channel(16);
        self.senders.lock().push(tx);
        Ok(InsertFeed { events: rx, cancel: CancellationToken::new() })
    }
}

/// Record fixture matching a stored message.
pub fn record_for(message: &ChatMessage) -> InsertedRecord {
    InsertedRecord {
        id: message.id.clone(),
        user_id: message.user_id.clone(),
        zone: message.zone.clone(),
        message: message.message.clone(),
        timestamp: message.timestamp,
    }
}

/// Shared service wiring helper for session tests.
pub fn session_service(
    identity: Arc<MockIdentityProvider>,
    profiles: Arc<MockProfileRepository>,
) -> (mediatracker_core::SessionService, Arc<MockAvatarStorage>) {
    let avatars = Arc::new(MockAvatarStorage::default());
    let service = mediatracker_core::SessionService::new(identity, profiles, avatars.clone());
    (service, avatars)
}
