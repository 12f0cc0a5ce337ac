//! Merging new field values into a service's records.

use tracing::debug;

use super::model::{now_timestamp, Database, Record};

/// The subset of record fields supplied on a single add call.
///
/// `pass` must already be encrypted; the merge engine never touches the
/// cipher.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    pub id: Option<String>,
    pub pass: Option<String>,
    pub mail: Option<String>,
    pub url: Option<String>,
    pub text: Option<String>,
}

impl RecordFields {
    fn into_record(self, now: &str) -> Record {
        Record {
            id: self.id,
            pass: self.pass,
            mail: self.mail,
            url: self.url,
            text: self.text,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Overwrite the record's fields with the supplied ones, leaving
    /// unsupplied fields untouched.
    fn overlay(&self, record: &mut Record) {
        if let Some(id) = &self.id {
            record.id = Some(id.clone());
        }
        if let Some(pass) = &self.pass {
            record.pass = Some(pass.clone());
        }
        if let Some(mail) = &self.mail {
            record.mail = Some(mail.clone());
        }
        if let Some(url) = &self.url {
            record.url = Some(url.clone());
        }
        if let Some(text) = &self.text {
            record.text = Some(text.clone());
        }
    }
}

/// What the merge did, for the caller's summary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Updated,
}

/// Add `fields` to `service_name`, merging into an existing record when
/// one matches.
///
/// The service's records are scanned in order and the first record whose
/// `id` equals the supplied id, or whose `mail` equals the supplied mail,
/// is updated in place: supplied fields overwrite, `updatedAt` is
/// refreshed, `createdAt` stays. Without a match (or a service) a new
/// record is appended with both timestamps set to now.
pub fn apply(db: &mut Database, service_name: &str, fields: RecordFields) -> MergeOutcome {
    let now = now_timestamp();

    let Some(records) = db.get_mut(service_name) else {
        db.insert(service_name.to_string(), vec![fields.into_record(&now)]);
        debug!(service = service_name, "created service with first record");
        return MergeOutcome::Created;
    };

    // First match wins.
    let matched = records.iter().position(|record| {
        fields
            .id
            .as_deref()
            .is_some_and(|id| record.id.as_deref() == Some(id))
            || fields
                .mail
                .as_deref()
                .is_some_and(|mail| record.mail.as_deref() == Some(mail))
    });

    match matched {
        Some(index) => {
            let record = &mut records[index];
            fields.overlay(record);
            record.updated_at = now;
            debug!(service = service_name, index, "merged into existing record");
            MergeOutcome::Updated
        }
        None => {
            records.push(fields.into_record(&now));
            debug!(service = service_name, "appended new record");
            MergeOutcome::Created
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(id: Option<&str>, mail: Option<&str>, text: Option<&str>) -> RecordFields {
        RecordFields {
            id: id.map(String::from),
            pass: None,
            mail: mail.map(String::from),
            url: None,
            text: text.map(String::from),
        }
    }

    fn record(id: Option<&str>, mail: Option<&str>) -> Record {
        Record {
            id: id.map(String::from),
            pass: None,
            mail: mail.map(String::from),
            url: None,
            text: None,
            created_at: "2020-01-01T00:00:00.000Z".to_string(),
            updated_at: "2020-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_add_creates_service_and_record() {
        let mut db = Database::new();

        let outcome = apply(&mut db, "example.com", fields(Some("u1"), None, None));

        assert_eq!(outcome, MergeOutcome::Created);
        assert_eq!(db.len(), 1);
        let records = &db["example.com"];
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("u1"));
        assert_eq!(records[0].created_at, records[0].updated_at);
    }

    #[test]
    fn test_merge_updates_first_match_only() {
        let mut db = Database::new();
        db.insert(
            "svc".to_string(),
            vec![record(Some("a"), None), record(Some("b"), None)],
        );

        let outcome = apply(&mut db, "svc", fields(Some("a"), None, Some("x")));

        assert_eq!(outcome, MergeOutcome::Updated);
        let records = &db["svc"];
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text.as_deref(), Some("x"));
        assert_eq!(records[0].created_at, "2020-01-01T00:00:00.000Z");
        assert_ne!(records[0].updated_at, "2020-01-01T00:00:00.000Z");
        // Second record untouched.
        assert_eq!(records[1].text, None);
        assert_eq!(records[1].updated_at, "2020-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_first_of_duplicate_matches_wins() {
        let mut db = Database::new();
        db.insert(
            "svc".to_string(),
            vec![record(Some("a"), None), record(Some("a"), None)],
        );

        apply(&mut db, "svc", fields(Some("a"), None, Some("hit")));

        let records = &db["svc"];
        assert_eq!(records[0].text.as_deref(), Some("hit"));
        assert_eq!(records[1].text, None);
    }

    #[test]
    fn test_append_on_miss_preserves_order() {
        let mut db = Database::new();
        db.insert(
            "svc".to_string(),
            vec![record(Some("a"), None), record(Some("b"), None)],
        );

        let outcome = apply(&mut db, "svc", fields(Some("c"), None, None));

        assert_eq!(outcome, MergeOutcome::Created);
        let ids: Vec<_> = db["svc"].iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_mail_matches_when_id_does_not() {
        let mut db = Database::new();
        db.insert(
            "svc".to_string(),
            vec![record(Some("a"), Some("a@example.com"))],
        );

        let outcome = apply(
            &mut db,
            "svc",
            fields(Some("other"), Some("a@example.com"), Some("x")),
        );

        assert_eq!(outcome, MergeOutcome::Updated);
        let records = &db["svc"];
        assert_eq!(records.len(), 1);
        // Overlay replaces the id as well.
        assert_eq!(records[0].id.as_deref(), Some("other"));
        assert_eq!(records[0].text.as_deref(), Some("x"));
    }

    #[test]
    fn test_overlay_keeps_unspecified_fields() {
        let mut db = Database::new();
        let mut existing = record(Some("a"), Some("a@example.com"));
        existing.url = Some("https://example.com".to_string());
        db.insert("svc".to_string(), vec![existing]);

        apply(&mut db, "svc", fields(Some("a"), None, Some("note")));

        let records = &db["svc"];
        assert_eq!(records[0].mail.as_deref(), Some("a@example.com"));
        assert_eq!(records[0].url.as_deref(), Some("https://example.com"));
        assert_eq!(records[0].text.as_deref(), Some("note"));
    }
}
