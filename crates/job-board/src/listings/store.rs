use super::domain::JobRecord;
use chrono::{DateTime, Utc};

/// Destination for a freshly fetched listing.
pub trait ListingSink {
    fn load(&mut self, records: Vec<JobRecord>);
}

/// Holds the most recently loaded listing. Each load replaces the previous
/// content wholesale.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    records: Vec<JobRecord>,
    loaded_at: Option<DateTime<Utc>>,
    load_count: u64,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last loaded listing, or an empty slice before the first load.
    pub fn current(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn load_count(&self) -> u64 {
        self.load_count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ListingSink for ListingStore {
    fn load(&mut self, records: Vec<JobRecord>) {
        self.records = records;
        self.loaded_at = Some(Utc::now());
        self.load_count += 1;
    }
}
