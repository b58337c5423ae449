use crate::models::CropRecord;

/// Read-only crop table with name lookup.
///
/// Built once at startup and shared by reference; nothing mutates it after
/// construction, so concurrent readers need no locking.
pub struct CropRepository {
    records: Vec<CropRecord>,
    // Lower-cased search keys, index-aligned with `records`
    scientific_keys: Vec<String>,
    common_keys: Vec<String>,
}

impl CropRepository {
    pub fn new(records: Vec<CropRecord>) -> Self {
        let scientific_keys = records
            .iter()
            .map(|r| r.scientific_name.to_lowercase())
            .collect();
        let common_keys = records
            .iter()
            .map(|r| r.common_name.to_lowercase())
            .collect();

        Self {
            records,
            scientific_keys,
            common_keys,
        }
    }

    /// Resolve a free-text crop name to one record.
    ///
    /// Matching is case-insensitive substring, scientific name first and
    /// common name only if no scientific name matched. Within a stage the
    /// earliest record in dataset order wins.
    pub fn resolve(&self, query: &str) -> Option<&CropRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        let index = Self::first_match(&self.scientific_keys, &query)
            .or_else(|| Self::first_match(&self.common_keys, &query))?;

        Some(&self.records[index])
    }

    fn first_match(keys: &[String], query: &str) -> Option<usize> {
        keys.iter().position(|key| key.contains(query))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
