use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 over the raw request body, hex-encoded. Receivers verify
/// outbound webhooks against the shared secret with this signature.
pub fn sign_payload(secret: &str, body: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_deterministic() {
        let a = sign_payload("whsec_test", r#"{"event":"status_changed"}"#);
        let b = sign_payload("whsec_test", r#"{"event":"status_changed"}"#);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn signature_changes_with_secret_and_body() {
        let base = sign_payload("whsec_test", "payload");
        assert_ne!(base, sign_payload("whsec_other", "payload"));
        assert_ne!(base, sign_payload("whsec_test", "payload2"));
    }
}
