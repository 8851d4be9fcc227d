pub mod admin_dto;
pub mod participant_dto;
pub mod workshop_dto;

use serde::{Deserialize, Deserializer};

/// Deserializes a string with surrounding whitespace removed, so length rules see the stored value.
pub(crate) fn trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}
