//! Session Token
//!
//! `"<session uuid>.<base64url HMAC-SHA256(uuid)>"`. The signature lets the
//! server reject forged tokens before touching the database.

use kernel::id::SessionId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::error::{AuthError, AuthResult};

pub fn sign(session_id: &SessionId, secret: &[u8; 32]) -> String {
    let id = session_id.to_string();
    let tag = hmac_sha256(secret, id.as_bytes());
    format!("{id}.{}", to_base64url(&tag))
}

pub fn verify(token: &str, secret: &[u8; 32]) -> AuthResult<SessionId> {
    let (id, tag) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;
    let tag = from_base64url(tag).map_err(|_| AuthError::SessionInvalid)?;

    if !verify_hmac_sha256(secret, id.as_bytes(), &tag) {
        return Err(AuthError::SessionInvalid);
    }

    SessionId::parse_str(id).map_err(|_| AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [9u8; 32];

    #[test]
    fn test_sign_then_verify() {
        let id = SessionId::new();
        let token = sign(&id, &SECRET);
        assert_eq!(verify(&token, &SECRET).unwrap(), id);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let token = sign(&SessionId::new(), &SECRET);
        let mut forged = token.clone();
        let last = forged.pop().unwrap();
        forged.push(if last == 'A' { 'B' } else { 'A' });

        assert!(matches!(verify(&forged, &SECRET), Err(AuthError::SessionInvalid)));
    }

    #[test]
    fn test_swapped_session_id_rejected() {
        let token = sign(&SessionId::new(), &SECRET);
        let (_, tag) = token.split_once('.').unwrap();
        let forged = format!("{}.{tag}", SessionId::new());

        assert!(verify(&forged, &SECRET).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(&SessionId::new(), &SECRET);
        assert!(verify(&token, &[1u8; 32]).is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        for token in ["", "no-dot", "a.b.c", "not-a-uuid.AAAA"] {
            assert!(verify(token, &SECRET).is_err(), "{token}");
        }
    }
}
