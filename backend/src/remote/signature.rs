use crate::error::RemoteError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Signs a Web API request.
///
/// The signature is the base64 encoded HMAC-SHA1 of
/// `"{public_key}:{method}:{route}:{expires}"`, keyed with the private key.
pub(crate) fn sign(
    public_key: &str,
    private_key: &str,
    method: &str,
    route: &str,
    expires: i64,
) -> Result<String, RemoteError> {
    let string_to_sign = format!("{}:{}:{}:{}", public_key, method, route, expires);
    let mut mac = HmacSha1::new_from_slice(private_key.as_bytes())
        .map_err(|e| RemoteError::Signature(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
