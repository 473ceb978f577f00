//! Session-keyed, last-write-wins preference slots with bounded retention.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use dashmap::DashMap;
use tokio::time::Instant;

use crate::config::SessionConfig;
use crate::model::UserPreference;

/// Header selecting a private preference slot.
pub const SESSION_HEADER: &str = "x-session-id";

/// Identifies a preference slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// The slot used by clients that send no session header.
    Shared,
    Session(String),
}

impl SessionKey {
    /// Read the session key from request headers. Missing, blank or
    /// non-UTF-8 values select the shared slot.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| SessionKey::Session(v.to_string()))
            .unwrap_or(SessionKey::Shared)
    }
}

/// A stored preference and when it was last written.
#[derive(Debug, Clone)]
struct Slot {
    preference: UserPreference,
    written_at: Instant,
}

/// Process-wide preference storage.
///
/// Cloning shares the underlying slots. Session slots expire after
/// `idle_ttl` without a write, and at most `max_sessions` are held; the
/// shared slot is exempt from both.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    slots: Arc<DashMap<SessionKey, Slot>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl Default for PreferenceStore {
    fn default() -> Self {
        let limits = SessionConfig::default();
        Self::with_limits(limits.max_sessions, limits.idle_ttl())
    }
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            max_sessions: max_sessions.max(1),
            idle_ttl,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::with_limits(config.max_sessions, config.idle_ttl())
    }

    /// Replace the preference held for `key`.
    pub fn save(&self, key: SessionKey, preference: UserPreference) {
        let now = Instant::now();
        let slot = Slot {
            preference,
            written_at: now,
        };
        if matches!(key, SessionKey::Shared) {
            self.slots.insert(key, slot);
            return;
        }
        self.slots.insert(key.clone(), slot);
        if self.session_count() > self.max_sessions {
            self.evict(&key, now);
        }
    }

    /// The most recently saved preference for `key`, or the zero-valued
    /// preference if nothing was saved there or the slot has expired.
    pub fn load(&self, key: &SessionKey) -> UserPreference {
        let now = Instant::now();
        self.slots
            .get(key)
            .filter(|entry| !self.is_expired(key, entry.value(), now))
            .map(|entry| entry.preference.clone())
            .unwrap_or_default()
    }

    /// Number of slots currently held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn session_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| matches!(entry.key(), SessionKey::Session(_)))
            .count()
    }

    fn is_expired(&self, key: &SessionKey, slot: &Slot, now: Instant) -> bool {
        matches!(key, SessionKey::Session(_))
            && now.saturating_duration_since(slot.written_at) >= self.idle_ttl
    }

    /// Drop expired session slots, then the least recently written ones
    /// other than `fresh` until the cap holds again.
    fn evict(&self, fresh: &SessionKey, now: Instant) {
        let before = self.slots.len();
        self.slots.retain(|key, slot| !self.is_expired(key, slot, now));

        while self.session_count() > self.max_sessions {
            let oldest = self
                .slots
                .iter()
                .filter(|entry| {
                    matches!(entry.key(), SessionKey::Session(_)) && entry.key() != fresh
                })
                .min_by_key(|entry| entry.written_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    self.slots.remove(&key);
                }
                None => break,
            }
        }

        tracing::debug!(
            evicted = before.saturating_sub(self.slots.len()),
            held = self.slots.len(),
            "Evicted preference slots"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn pref(x: i64) -> UserPreference {
        UserPreference {
            x,
            ..Default::default()
        }
    }

    #[test]
    fn test_load_before_save_is_zero_valued() {
        let store = PreferenceStore::new();
        assert_eq!(store.load(&SessionKey::Shared), UserPreference::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let store = PreferenceStore::new();
        store.save(SessionKey::Shared, pref(1));
        store.save(SessionKey::Shared, pref(2));
        assert_eq!(store.load(&SessionKey::Shared).x, 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = PreferenceStore::new();
        let alice = SessionKey::Session("alice".into());
        store.save(SessionKey::Shared, pref(1));
        store.save(alice.clone(), pref(7));

        assert_eq!(store.load(&SessionKey::Shared).x, 1);
        assert_eq!(store.load(&alice).x, 7);
        assert_eq!(
            store.load(&SessionKey::Session("bob".into())),
            UserPreference::default()
        );
    }

    #[test]
    fn test_clones_share_slots() {
        let store = PreferenceStore::new();
        let handle = store.clone();
        handle.save(SessionKey::Shared, pref(4));
        assert_eq!(store.load(&SessionKey::Shared).x, 4);
    }

    #[test]
    fn test_session_key_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(SessionKey::from_headers(&headers), SessionKey::Shared);

        headers.insert(SESSION_HEADER, HeaderValue::from_static("   "));
        assert_eq!(SessionKey::from_headers(&headers), SessionKey::Shared);

        headers.insert(SESSION_HEADER, HeaderValue::from_static(" tab-42 "));
        assert_eq!(
            SessionKey::from_headers(&headers),
            SessionKey::Session("tab-42".into())
        );
    }

    #[tokio::test]
    async fn test_concurrent_saves_leave_one_complete_value() {
        let store = PreferenceStore::new();
        let mut tasks = Vec::new();
        for x in 1..=32 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.save(
                    SessionKey::Shared,
                    UserPreference {
                        x,
                        min_credits: x,
                        ..Default::default()
                    },
                );
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let held = store.load(&SessionKey::Shared);
        assert!((1..=32).contains(&held.x));
        assert_eq!(held.x, held.min_credits);
    }

    #[test]
    fn test_session_slots_are_capped() {
        let store = PreferenceStore::with_limits(4, Duration::from_secs(3600));
        store.save(SessionKey::Shared, pref(99));
        for i in 0..50 {
            store.save(SessionKey::Session(format!("tab-{i}")), pref(i));
        }

        assert_eq!(store.len(), 5);
        assert_eq!(store.load(&SessionKey::Shared).x, 99);
        assert_eq!(store.load(&SessionKey::Session("tab-49".into())).x, 49);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_expire() {
        let store = PreferenceStore::with_limits(2, Duration::from_secs(60));
        let stale = SessionKey::Session("stale".into());
        store.save(SessionKey::Shared, pref(1));
        store.save(stale.clone(), pref(2));

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(store.load(&stale), UserPreference::default());
        assert_eq!(store.load(&SessionKey::Shared).x, 1);

        store.save(SessionKey::Session("a".into()), pref(3));
        store.save(SessionKey::Session("b".into()), pref(4));
        store.save(SessionKey::Session("c".into()), pref(5));
        assert_eq!(store.len(), 3);
        assert!(!store.slots.contains_key(&stale));
    }
}
