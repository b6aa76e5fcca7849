//! Session persistence and migration from the legacy bare-token key.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::Result, storage::KeyValueStore};

pub const SESSION_KEY: &str = "auth.user";
pub const LEGACY_TOKEN_KEY: &str = "access_token";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub token: String,
}

impl Session {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.token.trim().is_empty()
    }
}

/// Claims we care about in a legacy token. `sub` may be a number on some issuers.
#[derive(Debug, Deserialize)]
struct LegacyClaims {
    #[serde(default)]
    email: Option<Value>,
    #[serde(default)]
    sub: Option<Value>,
}

#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Option<Session> {
        let raw = self.store.get(SESSION_KEY)?;
        match serde_json::from_str::<Option<Session>>(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::debug!("stored session is malformed: {e}");
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        self.store
            .set(SESSION_KEY, &serde_json::to_string(session)?)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        self.store.remove(LEGACY_TOKEN_KEY)
    }

    pub fn save_legacy_token(&self, token: &str) -> Result<()> {
        self.store.set(LEGACY_TOKEN_KEY, token)
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some_and(|s| s.is_complete())
    }

    /// Synthesizes a structured session from the legacy token when only the
    /// latter exists. Never fails; the legacy key is left in place.
    pub fn ensure_from_legacy(&self) {
        if self.is_authenticated() {
            return;
        }
        let Some(token) = self.store.get(LEGACY_TOKEN_KEY) else {
            return;
        };
        let Some(email) = legacy_subject(&token) else {
            return;
        };
        let session = Session { email, token };
        if let Err(e) = self.save(&session) {
            tracing::warn!("could not persist session recovered from legacy token: {e}");
        }
    }
}

fn legacy_subject(token: &str) -> Option<String> {
    let claims = decode_claims(token)?;
    [claims.email, claims.sub]
        .into_iter()
        .flatten()
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn decode_claims(token: &str) -> Option<LegacyClaims> {
    // Claims read only: the signature belongs to the auth service.
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<LegacyClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            tracing::debug!("legacy token rejected by jwt decoder, reading payload: {e}");
            let claims = payload_claims(token);
            if claims.is_none() {
                tracing::warn!("legacy token could not be decoded: {e}");
            }
            claims
        }
    }
}

/// Payload segment alone, for headers the jwt decoder refuses (`alg: none`).
fn payload_claims(token: &str) -> Option<LegacyClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn store() -> (Arc<MemoryStore>, SessionStore) {
        let kv = Arc::new(MemoryStore::new());
        (kv.clone(), SessionStore::new(kv))
    }

    fn token(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"issuer-secret"),
        )
        .unwrap()
    }

    #[test]
    fn malformed_session_reads_as_none() {
        let (kv, sessions) = store();
        kv.set(SESSION_KEY, "{not json").unwrap();
        assert_eq!(sessions.get(), None);
        kv.set(SESSION_KEY, "null").unwrap();
        assert_eq!(sessions.get(), None);
    }

    #[test]
    fn clear_removes_both_keys() {
        let (kv, sessions) = store();
        sessions
            .save(&Session {
                email: "ana@example.com".into(),
                token: "t".into(),
            })
            .unwrap();
        sessions.save_legacy_token("t").unwrap();

        sessions.clear().unwrap();
        assert_eq!(kv.get(SESSION_KEY), None);
        assert_eq!(kv.get(LEGACY_TOKEN_KEY), None);
    }

    #[test]
    fn legacy_token_with_email_claim_becomes_session() {
        let (kv, sessions) = store();
        let jwt = token(json!({ "email": "ana@example.com", "exp": 1 }));
        kv.set(LEGACY_TOKEN_KEY, &jwt).unwrap();

        sessions.ensure_from_legacy();

        let session = sessions.get().unwrap();
        assert_eq!(session.email, "ana@example.com");
        assert_eq!(session.token, jwt);
        assert_eq!(kv.get(LEGACY_TOKEN_KEY), Some(jwt));
    }

    #[test]
    fn legacy_token_falls_back_to_sub() {
        let (kv, sessions) = store();
        kv.set(LEGACY_TOKEN_KEY, &token(json!({ "sub": "bia@example.com" })))
            .unwrap();

        sessions.ensure_from_legacy();
        assert_eq!(sessions.get().unwrap().email, "bia@example.com");
    }

    #[test]
    fn undecodable_or_missing_legacy_token_is_noop() {
        let (kv, sessions) = store();
        sessions.ensure_from_legacy();
        assert_eq!(sessions.get(), None);

        kv.set(LEGACY_TOKEN_KEY, "definitely.not.a-jwt").unwrap();
        sessions.ensure_from_legacy();
        assert_eq!(sessions.get(), None);

        kv.set(LEGACY_TOKEN_KEY, &token(json!({ "role": "admin" })))
            .unwrap();
        sessions.ensure_from_legacy();
        assert_eq!(sessions.get(), None);
    }

    #[test]
    fn unsigned_legacy_token_becomes_session() {
        let (kv, sessions) = store();
        let jwt = "eyJhbGciOiJub25lIn0.eyJlbWFpbCI6ImFuYUBleGFtcGxlLmNvbSJ9.";
        kv.set(LEGACY_TOKEN_KEY, jwt).unwrap();

        sessions.ensure_from_legacy();

        let session = sessions.get().unwrap();
        assert_eq!(session.email, "ana@example.com");
        assert_eq!(session.token, jwt);
    }

    #[test]
    fn existing_session_is_not_overwritten() {
        let (kv, sessions) = store();
        let current = Session {
            email: "ana@example.com".into(),
            token: "current".into(),
        };
        sessions.save(&current).unwrap();
        kv.set(LEGACY_TOKEN_KEY, &token(json!({ "email": "old@example.com" })))
            .unwrap();

        sessions.ensure_from_legacy();
        assert_eq!(sessions.get(), Some(current));
    }
}
