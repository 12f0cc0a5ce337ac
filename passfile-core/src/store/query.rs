//! Free-text and per-field search over the store.

use crate::crypto::cipher::{decrypt_or_empty, MasterKey};

use super::model::{Database, Record};

/// Search criteria: an optional free-text query plus per-field filters.
///
/// All matching is case-insensitive substring. The free-text query and
/// every supplied filter combine with OR - any single match includes the
/// record. This is a deliberate contract; it must not quietly become
/// AND.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub id: Option<String>,
    pub pass: Option<String>,
    pub mail: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
}

impl SearchCriteria {
    /// Case-folded copy used for matching.
    ///
    /// An empty free-text query is dropped here - every string contains
    /// "", so keeping it would turn the query into match-everything
    /// instead of match-nothing.
    fn lowercased(&self) -> SearchCriteria {
        let fold = |value: &Option<String>| value.as_deref().map(str::to_lowercase);
        SearchCriteria {
            query: fold(&self.query).filter(|query| !query.is_empty()),
            id: fold(&self.id),
            pass: fold(&self.pass),
            mail: fold(&self.mail),
            url: fold(&self.url),
            text: fold(&self.text),
        }
    }
}

/// Search the store, returning matching records with passwords decrypted.
///
/// A service whose name contains the free-text query is included whole,
/// skipping per-record filtering. Every other service is filtered record
/// by record. Results keep service and record order; included records
/// carry their original-case values, with `pass` decrypted (empty-string
/// sentinel on failure).
pub fn search(db: &Database, criteria: &SearchCriteria, key: &MasterKey) -> Database {
    let criteria = criteria.lowercased();
    let mut results = Database::new();

    for (service_name, records) in db {
        if let Some(query) = criteria.query.as_deref() {
            if service_name.to_lowercase().contains(query) {
                results.insert(service_name.clone(), decrypt_records(records, key));
                continue;
            }
        }

        let matched: Vec<Record> = records
            .iter()
            .map(|record| decrypt_record(record, key))
            .filter(|record| record_matches(record, &criteria))
            .collect();

        if !matched.is_empty() {
            results.insert(service_name.clone(), matched);
        }
    }

    results
}

/// Decrypt every password in the store, for whole-store listing.
pub fn decrypt_all(db: &Database, key: &MasterKey) -> Database {
    db.iter()
        .map(|(name, records)| (name.clone(), decrypt_records(records, key)))
        .collect()
}

fn decrypt_records(records: &[Record], key: &MasterKey) -> Vec<Record> {
    records
        .iter()
        .map(|record| decrypt_record(record, key))
        .collect()
}

/// Clone the record with `pass` decrypted in place.
///
/// A failed decryption becomes the empty-string sentinel; display layers
/// render it as a visible marker.
fn decrypt_record(record: &Record, key: &MasterKey) -> Record {
    let mut record = record.clone();
    if let Some(pass) = &record.pass {
        record.pass = Some(decrypt_or_empty(key, pass));
    }
    record
}

/// Whether a (decrypted) record matches the (lowercased) criteria.
///
/// Timestamps are never searched.
fn record_matches(record: &Record, criteria: &SearchCriteria) -> bool {
    let folded = [
        (record.id.as_deref(), criteria.id.as_deref()),
        (record.pass.as_deref(), criteria.pass.as_deref()),
        (record.mail.as_deref(), criteria.mail.as_deref()),
        (record.url.as_deref(), criteria.url.as_deref()),
        (record.text.as_deref(), criteria.text.as_deref()),
    ]
    .map(|(value, filter)| (value.map(str::to_lowercase), filter));

    if let Some(query) = criteria.query.as_deref() {
        let query_hit = folded
            .iter()
            .any(|(value, _)| value.as_deref().is_some_and(|v| v.contains(query)));
        if query_hit {
            return true;
        }
    }

    folded.iter().any(|(value, filter)| match (value, filter) {
        (Some(value), Some(filter)) => value.contains(filter),
        _ => false,
    })
}
