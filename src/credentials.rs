//! Provider credential storage
//!
//! Credentials (access id + secret key) are stored in the system
//! keyring under the `sercat` service, with environment variables as
//! an override for headless environments. The keyring entry holds the
//! pair as a small JSON document, mirroring how tokens are cached for
//! other services.

use crate::error::{Result, SercatError};
use serde::{Deserialize, Serialize};

const KEYRING_SERVICE: &str = "sercat";
const KEYRING_USER: &str = "provider_credentials";

/// Provider login credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// Provider access ID
    pub access_id: String,
    /// Provider secret key
    pub secret_key: String,
}

impl Credentials {
    pub fn new(access_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_id: access_id.into(),
            secret_key: secret_key.into(),
        }
    }
}

/// Resolve credentials from the environment or the system keyring
///
/// Environment variables `SERCAT_ACCESS_ID` and `SERCAT_SECRET_KEY`
/// take precedence; both must be set for the override to apply.
///
/// # Errors
///
/// Returns `SercatError::MissingCredentials` when neither source
/// yields a credential pair
pub fn resolve() -> Result<Credentials> {
    if let (Ok(access_id), Ok(secret_key)) = (
        std::env::var("SERCAT_ACCESS_ID"),
        std::env::var("SERCAT_SECRET_KEY"),
    ) {
        if !access_id.is_empty() && !secret_key.is_empty() {
            tracing::debug!("Using credentials from environment");
            return Ok(Credentials::new(access_id, secret_key));
        }
    }

    load_stored().map_err(|e| {
        tracing::debug!("No stored credentials: {}", e);
        SercatError::MissingCredentials(
            "no credentials found; run `sercat login` or set SERCAT_ACCESS_ID and SERCAT_SECRET_KEY"
                .to_string(),
        )
        .into()
    })
}

/// Load credentials from the system keyring
fn load_stored() -> Result<Credentials> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?;
    let json = entry.get_password()?;
    if json.is_empty() {
        return Err(SercatError::MissingCredentials("credentials cleared".to_string()).into());
    }
    Ok(serde_json::from_str(&json)?)
}

/// Store credentials in the system keyring
pub fn store(credentials: &Credentials) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER)?;
    let json = serde_json::to_string(credentials)?;
    entry.set_password(&json)?;
    tracing::info!("Stored provider credentials in keyring");
    Ok(())
}

/// Clear stored credentials (best-effort)
///
/// Uses `set_password("")` as a widely-available invalidation step
/// rather than relying on a delete API that varies between
/// environments.
pub fn clear() -> Result<()> {
    match keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER) {
        Ok(entry) => {
            if let Err(e) = entry.set_password("") {
                tracing::warn!("Failed to clear stored credentials: {}", e);
            } else {
                tracing::info!("Cleared stored provider credentials");
            }
        }
        Err(e) => {
            tracing::warn!("Keyring not available while clearing credentials: {}", e);
        }
    }
    Ok(())
}
