// ABOUTME: Bearer token store mapping opaque tokens to authenticated user ids
// ABOUTME: Stands in for the external token verification service; issuance happens outside this module

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TokenData {
    pub user_id: i32,
    pub created_at: i64,
}

#[derive(Clone)]
pub struct TokenStore {
    tokens: Arc<RwLock<HashMap<String, TokenData>>>,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

const TOKEN_MAX_AGE: i64 = 24 * 60 * 60; // 24 hours

impl TokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a fresh opaque token for a user and return it.
    pub fn issue(&self, user_id: i32) -> String {
        let token = Uuid::new_v4().to_string();
        let data = TokenData {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        };

        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.clone(), data);
        }

        token
    }

    /// Resolve a bearer token to a user id, rejecting expired tokens.
    pub fn verify(&self, token: &str) -> Option<i32> {
        let cutoff = chrono::Utc::now().timestamp() - TOKEN_MAX_AGE;

        if let Ok(tokens) = self.tokens.read() {
            tokens
                .get(token)
                .filter(|data| data.created_at > cutoff)
                .map(|data| data.user_id)
        } else {
            None
        }
    }

    pub fn revoke(&self, token: &str) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.remove(token);
        }
    }

    pub fn cleanup_expired(&self) {
        let cutoff = chrono::Utc::now().timestamp() - TOKEN_MAX_AGE;

        if let Ok(mut tokens) = self.tokens.write() {
            tokens.retain(|_, data| data.created_at > cutoff);
        }
    }
}
