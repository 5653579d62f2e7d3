//! Signed webhook URLs

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Target of an inbound webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub hook: String,
    pub action: String,
    pub app: String,
    pub env: String,
}

impl Webhook {
    /// The signed path segment `<hook>/<action>/<app>/<env>`
    pub fn signed_path(&self) -> String {
        format!("{}/{}/{}/{}", self.hook, self.action, self.app, self.env)
    }

    /// Hex HMAC-SHA256 of the signed path, keyed by the API key
    pub fn digest(&self, api_key: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(api_key.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(self.signed_path().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Full webhook URL under `base_url`
    pub fn url(&self, base_url: &str, api_key: &str) -> String {
        format!(
            "{}/webhooks/{}/{}/",
            base_url.trim_end_matches('/'),
            self.signed_path(),
            self.digest(api_key)
        )
    }
}
