//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token verification settings.
///
/// Praxis only verifies bearer tokens presented on the push channel;
/// token issuance belongs to the surrounding system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to verify JWT signatures.
    pub jwt_secret: String,
    /// Expected token issuer. Skipped when empty.
    #[serde(default)]
    pub issuer: String,
}
