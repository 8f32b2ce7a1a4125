//! Request signature verification: Ed25519 over `timestamp ++ raw body`,
//! with hex-encoded key and signature headers.

use ed25519_dalek::{Signature, VerifyingKey};

/// Parse the hex-encoded platform public key. Returns an error message on
/// malformed hex, wrong length, or an invalid curve point.
pub fn parse_public_key(hex_key: &str) -> Result<VerifyingKey, String> {
    let bytes = hex::decode(hex_key.trim()).map_err(|_| "invalid public key encoding")?;
    let arr: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| "invalid public key length")?;
    VerifyingKey::from_bytes(&arr).map_err(|_| "invalid public key".to_string())
}

/// Verify a request signature. The message is the timestamp header bytes
/// followed by the body bytes exactly as received; the bytes must never be a
/// re-serialization of the parsed payload. Absent headers, malformed hex, or
/// a failed check all yield false. No side effects.
pub fn verify(
    public_key: &VerifyingKey,
    signature: Option<&str>,
    timestamp: Option<&str>,
    body: &[u8],
) -> bool {
    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        return false;
    };
    let Ok(sig_bytes) = hex::decode(signature) else {
        return false;
    };
    let Ok(sig_arr) = <[u8; 64]>::try_from(sig_bytes.as_slice()) else {
        return false;
    };
    let sig = Signature::from_bytes(&sig_arr);
    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);
    public_key.verify_strict(&message, &sig).is_ok()
}
