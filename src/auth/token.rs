//! Launcher token validation.
//!
//! Launcher clients without a Microsoft account self-issue an opaque
//! base64url token. It is never verified remotely; its shape alone
//! identifies an "offline" user for quota tracking.

use crate::auth::identity::Identity;

/// Namespace prefix for offline identities.
///
/// Verified Minecraft profile ids are hex UUIDs and can never contain
/// an underscore, so a prefixed launcher token can never collide with
/// a verified identity id.
pub const OFFLINE_ID_PREFIX: &str = "lk_";

/// Display name assigned to all offline identities.
pub const OFFLINE_DISPLAY_NAME: &str = "OfflineUser";

const MIN_TOKEN_LEN: usize = 16;

/// Validate a launcher-issued opaque token.
///
/// Accepts tokens of at least 16 characters (after trimming
/// surrounding whitespace) drawn from the URL-safe base64 alphabet
/// (`A-Z a-z 0-9 - _`). Returns the derived offline identity, or
/// `None` if the token is malformed. Pure; no side effects.
pub fn validate_opaque_token(raw: &str) -> Option<Identity> {
    let trimmed = raw.trim();

    if trimmed.len() < MIN_TOKEN_LEN {
        return None;
    }

    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return None;
    }

    Some(Identity {
        id: format!("{OFFLINE_ID_PREFIX}{trimmed}"),
        display_name: OFFLINE_DISPLAY_NAME.to_string(),
    })
}
