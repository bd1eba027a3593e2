use chrono::{DateTime, Utc};
use moka::future::Cache;
use rand::rngs::OsRng;
use rand::RngCore;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Bearer tokens mapped to sessions; entries expire after the configured TTL.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, Session>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Opens a session and returns its token.
    pub async fn open(&self, user_id: Uuid) -> String {
        let token = new_token();
        self.sessions
            .insert(
                token.clone(),
                Session {
                    user_id,
                    created_at: Utc::now(),
                },
            )
            .await;
        token
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).await
    }

    pub async fn close(&self, token: &str) {
        self.sessions.invalidate(token).await;
    }

    /// Ends every session of `user_id`.
    pub async fn close_for_user(&self, user_id: Uuid) {
        let tokens: Vec<String> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.user_id == user_id)
            .map(|(token, _)| token.as_ref().clone())
            .collect();
        for token in tokens {
            self.sessions.invalidate(&token).await;
        }
    }
}

/// 256 random bits, hex encoded.
fn new_token() -> String {
    let mut bytes = [0_u8; 32];
    OsRng.fill_bytes(&mut bytes);
    let mut hex = String::with_capacity(64);
    for b in bytes {
        hex.push_str(&format!("{b:02x}"));
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_get_close() {
        let store = SessionStore::new(Duration::from_secs(60));
        let user = Uuid::new_v4();
        let first = store.open(user).await;
        let second = store.open(user).await;
        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
        assert_eq!(store.get(&first).await.map(|s| s.user_id), Some(user));

        store.close(&first).await;
        assert!(store.get(&first).await.is_none());
        assert!(store.get(&second).await.is_some());

        store.close_for_user(user).await;
        assert!(store.get(&second).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_expire() {
        let store = SessionStore::new(Duration::from_millis(50));
        let token = store.open(Uuid::new_v4()).await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(store.get(&token).await.is_none());
    }
}
