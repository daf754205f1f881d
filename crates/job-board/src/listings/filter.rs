//! The predicate chain that turns a listing and a set of criteria into the
//! visible set.
//!
//! Passes run in a fixed order (experience, base pay, free text, remote,
//! role), each over the survivors of the previous one. Every pass is a
//! stable `retain`, so the result is always a subsequence of the listing in
//! source order. An unset criterion skips its pass entirely. A record lacking
//! the field a pass reads is dropped by that pass.

use super::criteria::FilterCriteria;
use super::domain::{JobRecord, RemoteOption};

/// Borrowing variant of [`visible_set`].
pub fn visible_refs<'a>(listing: &'a [JobRecord], criteria: &FilterCriteria) -> Vec<&'a JobRecord> {
    let mut records: Vec<&JobRecord> = listing.iter().collect();

    if let Some(threshold) = criteria.min_experience {
        records.retain(|record| meets_experience(record, threshold));
    }

    if let Some(threshold) = criteria.min_base_pay {
        records.retain(|record| meets_base_pay(record, threshold));
    }

    if !criteria.search_text.is_empty() {
        let needle = criteria.search_text.to_lowercase();
        records.retain(|record| matches_search(record, &needle));
    }

    if let Some(option) = criteria.remote_option {
        records.retain(|record| matches_remote(record, option));
    }

    if let Some(role) = criteria.role.as_deref() {
        records.retain(|record| matches_role(record, role));
    }

    records
}

pub fn visible_set(listing: &[JobRecord], criteria: &FilterCriteria) -> Vec<JobRecord> {
    visible_refs(listing, criteria)
        .into_iter()
        .cloned()
        .collect()
}

fn meets_experience(record: &JobRecord, threshold: u32) -> bool {
    record
        .min_experience_years
        .is_some_and(|years| years >= threshold)
}

fn meets_base_pay(record: &JobRecord, threshold: f64) -> bool {
    record
        .min_base_salary
        .is_some_and(|salary| salary >= threshold)
}

/// `needle` is already lowercased.
fn matches_search(record: &JobRecord, needle: &str) -> bool {
    [&record.company_name, &record.job_role, &record.location]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

// Literal comparison: a location of "Remote" or "Bangalore" never matches.
fn matches_remote(record: &JobRecord, option: RemoteOption) -> bool {
    record.location.as_deref() == Some(option.token())
}

fn matches_role(record: &JobRecord, role: &str) -> bool {
    record.job_role.as_deref() == Some(role)
}
