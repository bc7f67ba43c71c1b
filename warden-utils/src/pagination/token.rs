//! Button custom ID encoding, parsing, and validation for pagination sessions.

use super::navigation::Navigation;

/// Prefix shared by every pagination button custom ID.
pub const TOKEN_PREFIX: &str = "pg";

/// Parsed pagination data from a button custom ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationToken {
    /// Session the button belongs to.
    pub session_id: u64,
    /// Navigation requested by the button.
    pub action: Navigation,
    /// User ID that owns this pagination session.
    pub owner_id: u64,
}

/// Validation outcome for pagination button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationValidationError {
    Invalid,
    WrongUser,
}

/// Build a compact custom ID carrying the session and the requested action.
pub fn build_custom_id(session_id: u64, action: Navigation, owner_id: u64) -> String {
    format!(
        "{TOKEN_PREFIX}:{session_id}:{}:{owner_id}",
        action.as_action()
    )
}

/// Parse a pagination custom ID.
pub fn parse_custom_id(custom_id: &str) -> Option<PaginationToken> {
    let mut parts = custom_id.split(':');

    if parts.next()? != TOKEN_PREFIX {
        return None;
    }

    let session_id = parts.next()?.parse::<u64>().ok()?;
    let action = Navigation::from_action(parts.next()?)?;
    let owner_id = parts.next()?.parse::<u64>().ok()?;

    if parts.next().is_some() {
        return None;
    }

    Some(PaginationToken {
        session_id,
        action,
        owner_id,
    })
}

/// Validate that a custom ID is well formed and was pressed by the session owner.
pub fn validate_custom_id(
    custom_id: &str,
    actor_user_id: u64,
) -> Result<PaginationToken, PaginationValidationError> {
    let token = parse_custom_id(custom_id).ok_or(PaginationValidationError::Invalid)?;

    if token.owner_id != actor_user_id {
        return Err(PaginationValidationError::WrongUser);
    }

    Ok(token)
}
