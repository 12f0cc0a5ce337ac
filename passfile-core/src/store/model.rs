//! Record and database types for the JSON store.

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The full in-memory store: service name to its records.
///
/// Service keys and records keep insertion order; record order within a
/// service affects match precedence in the merge and removal engines.
pub type Database = IndexMap<String, Vec<Record>>;

/// One credential entry belonging to a service.
///
/// `pass` holds ciphertext on disk and in any loaded database; it only
/// carries plaintext transiently inside search results. Timestamps stay
/// plain strings so whatever ISO-8601 form is on disk round-trips
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

/// Current time as an ISO-8601 string with millisecond precision,
/// e.g. `2024-01-02T03:04:05.678Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
