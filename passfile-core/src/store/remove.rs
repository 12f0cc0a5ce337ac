//! Exact-match removal of a single record.

use tracing::debug;

use super::model::Database;

/// Removal criteria: exact-equality match on id and/or mail.
///
/// Every supplied field must match (AND) - the intentional opposite of
/// the query engine's OR combination.
#[derive(Debug, Clone, Default)]
pub struct RemovalCriteria {
    pub id: Option<String>,
    pub mail: Option<String>,
}

impl RemovalCriteria {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.mail.is_none()
    }
}

/// Remove at most one record from `service_name`, returning the removal
/// count (0 or 1).
///
/// The whole record list is scanned; when several records match, the
/// last matching index found wins. When the removal empties the
/// service, its key is deleted from the database.
pub fn remove(db: &mut Database, service_name: &str, criteria: &RemovalCriteria) -> usize {
    // Empty criteria would match every record; callers must supply at
    // least one field.
    if criteria.is_empty() {
        return 0;
    }

    let Some(records) = db.get_mut(service_name) else {
        return 0;
    };

    let mut remove_index = None;
    for (index, record) in records.iter().enumerate() {
        let id_matches = criteria
            .id
            .as_deref()
            .map_or(true, |id| record.id.as_deref() == Some(id));
        let mail_matches = criteria
            .mail
            .as_deref()
            .map_or(true, |mail| record.mail.as_deref() == Some(mail));

        if id_matches && mail_matches {
            remove_index = Some(index);
        }
    }

    let Some(index) = remove_index else {
        return 0;
    };

    records.remove(index);
    debug!(service = service_name, index, "removed record");

    if records.is_empty() {
        db.shift_remove(service_name);
        debug!(service = service_name, "removed now-empty service");
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::model::Record;

    fn record(id: Option<&str>, mail: Option<&str>, text: Option<&str>) -> Record {
        Record {
            id: id.map(String::from),
            pass: None,
            mail: mail.map(String::from),
            url: None,
            text: text.map(String::from),
            created_at: "2020-01-01T00:00:00.000Z".to_string(),
            updated_at: "2020-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn by_id(id: &str) -> RemovalCriteria {
        RemovalCriteria {
            id: Some(id.to_string()),
            mail: None,
        }
    }

    #[test]
    fn test_all_criteria_must_match() {
        let mut db = Database::new();
        db.insert(
            "svc".to_string(),
            vec![record(Some("a"), Some("m"), None)],
        );

        // One matching and one mismatching criterion: AND fails.
        let count = remove(
            &mut db,
            "svc",
            &RemovalCriteria {
                id: Some("a".to_string()),
                mail: Some("wrong".to_string()),
            },
        );
        assert_eq!(count, 0);
        assert_eq!(db["svc"].len(), 1);

        // Both matching: removed.
        let count = remove(
            &mut db,
            "svc",
            &RemovalCriteria {
                id: Some("a".to_string()),
                mail: Some("m".to_string()),
            },
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_matching_is_exact_not_substring() {
        let mut db = Database::new();
        db.insert("svc".to_string(), vec![record(Some("alice"), None, None)]);

        assert_eq!(remove(&mut db, "svc", &by_id("ali")), 0);
        assert_eq!(remove(&mut db, "svc", &by_id("ALICE")), 0);
        assert_eq!(remove(&mut db, "svc", &by_id("alice")), 1);
    }

    #[test]
    fn test_criterion_field_must_be_present_on_record() {
        let mut db = Database::new();
        // Record has no mail at all.
        db.insert("svc".to_string(), vec![record(Some("a"), None, None)]);

        let count = remove(
            &mut db,
            "svc",
            &RemovalCriteria {
                id: Some("a".to_string()),
                mail: Some("m".to_string()),
            },
        );

        assert_eq!(count, 0);
    }

    #[test]
    fn test_last_matching_record_is_removed() {
        let mut db = Database::new();
        db.insert(
            "svc".to_string(),
            vec![
                record(Some("a"), None, Some("first")),
                record(Some("a"), None, Some("second")),
            ],
        );

        let count = remove(&mut db, "svc", &by_id("a"));

        // Exactly one removed, and it is the later one in scan order.
        assert_eq!(count, 1);
        let records = &db["svc"];
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text.as_deref(), Some("first"));
    }

    #[test]
    fn test_empty_service_key_is_pruned() {
        let mut db = Database::new();
        db.insert("svc".to_string(), vec![record(Some("a"), None, None)]);
        db.insert("other".to_string(), vec![record(Some("b"), None, None)]);

        let count = remove(&mut db, "svc", &by_id("a"));

        assert_eq!(count, 1);
        assert!(!db.contains_key("svc"));
        assert!(db.contains_key("other"));
    }

    #[test]
    fn test_service_with_remaining_records_is_kept() {
        let mut db = Database::new();
        db.insert(
            "svc".to_string(),
            vec![record(Some("a"), None, None), record(Some("b"), None, None)],
        );

        let count = remove(&mut db, "svc", &by_id("a"));

        assert_eq!(count, 1);
        assert_eq!(db["svc"].len(), 1);
        assert_eq!(db["svc"][0].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_absent_service_removes_nothing() {
        let mut db = Database::new();

        assert_eq!(remove(&mut db, "missing", &by_id("a")), 0);
    }

    #[test]
    fn test_empty_criteria_removes_nothing() {
        let mut db = Database::new();
        db.insert("svc".to_string(), vec![record(Some("a"), None, None)]);

        let count = remove(&mut db, "svc", &RemovalCriteria::default());

        assert_eq!(count, 0);
        assert_eq!(db["svc"].len(), 1);
    }
}
