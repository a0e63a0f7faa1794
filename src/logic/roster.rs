//! Roster registration: name validation for players and game types.

use crate::models::TournamentError;

/// Trim `name` and check it is usable as a display name.
pub fn validate_name(kind: &str, name: &str) -> Result<String, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::InvalidInput(format!("{kind} name must not be empty")));
    }
    Ok(trimmed.to_string())
}
