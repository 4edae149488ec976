use serde::{Deserialize, Deserializer};

/// Reads an optional string field, treating `null` like an absent key.
pub fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}
