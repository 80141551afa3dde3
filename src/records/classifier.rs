//! Group and status lookup per person

use crate::model::PersonStatus;
use std::collections::HashMap;

/// Maps a person to a categorical group label and an organization status
pub trait GroupClassifier {
    fn group_of(&self, person_id: &str) -> Option<&str>;

    /// `Some(true)` if still affiliated, `None` if the person is unknown
    fn status_of(&self, person_id: &str) -> Option<bool>;
}

/// Classifier backed by person status rows
#[derive(Debug, Clone, Default)]
pub struct StatusTable {
    entries: HashMap<String, PersonStatus>,
}

impl StatusTable {
    /// Index status rows by person id. The first row for a person wins.
    pub fn from_statuses(rows: &[PersonStatus]) -> Self {
        let mut entries = HashMap::with_capacity(rows.len());
        for row in rows {
            if entries.contains_key(&row.person_id) {
                tracing::warn!(person = %row.person_id, "duplicate status row ignored");
                continue;
            }
            entries.insert(row.person_id.clone(), row.clone());
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GroupClassifier for StatusTable {
    fn group_of(&self, person_id: &str) -> Option<&str> {
        self.entries
            .get(person_id)
            .and_then(|s| s.group_label.as_deref())
    }

    fn status_of(&self, person_id: &str) -> Option<bool> {
        self.entries.get(person_id).map(|s| s.is_currently_active)
    }
}
