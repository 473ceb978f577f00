//! Scheduling preference submitted by the browser client.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Course-slot counts, credit bounds and blacklisted periods.
///
/// Absent fields decode to zero / empty, so `{}` is the zero-valued
/// preference. `min_credits <= max_credits` is left to the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreference {
    /// Number of major courses.
    pub x: i64,
    /// Number of minor courses.
    pub y: i64,
    /// Number of elective courses.
    pub z: i64,
    pub min_credits: i64,
    pub max_credits: i64,
    /// Day label (e.g. `"M"`) to blacklisted period indices.
    #[serde(deserialize_with = "null_as_empty")]
    pub blacklisted_periods: BTreeMap<String, Vec<i64>>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Acknowledgement returned by `POST /api/userpreference/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveAck {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl SaveAck {
    pub fn saved() -> Self {
        Self {
            status: "saved".to_string(),
            error_message: None,
        }
    }
}
