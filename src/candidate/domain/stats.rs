//! Read-only summaries computed fresh from a snapshot or filtered subset.

use super::{CandidateRecord, ClientId, FormKind, RwpScore, StatusField, StatusToken};
use std::collections::BTreeMap;

/// Background statuses that count as cleared.
const BACKGROUND_CLEARED: [&str; 2] = ["Clear", "Complete"];
/// Drug screen statuses that count as passed.
const DRUG_TEST_PASSED: [&str; 2] = ["Negative", "Pass"];

/// Counts records whose vendor status contains any needle, ignoring case.
#[must_use]
pub fn count_status_matching(
    records: &[CandidateRecord],
    field: StatusField,
    needles: &[&str],
) -> usize {
    records
        .iter()
        .filter(|record| record.statuses().get(field).contains_any(needles))
        .count()
}

/// Counts records with both compliance forms uploaded.
#[must_use]
pub fn forms_complete(records: &[CandidateRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.forms().both_uploaded())
        .count()
}

/// Counts records with one compliance form uploaded.
#[must_use]
pub fn form_uploaded(records: &[CandidateRecord], kind: FormKind) -> usize {
    records
        .iter()
        .filter(|record| record.forms().get(kind).is_uploaded())
        .count()
}

/// Counts records with an unreviewed vendor change.
#[must_use]
pub fn flagged(records: &[CandidateRecord]) -> usize {
    records
        .iter()
        .filter(|record| record.fadv().is_flagged())
        .count()
}

/// Mean score over scored records only.
///
/// Returns `None` when no record has a score above zero.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the mean of fractional scores is itself fractional"
)]
pub fn average_score(records: &[CandidateRecord]) -> Option<f64> {
    let scores: Vec<f64> = records
        .iter()
        .map(|record| record.assessment().score)
        .filter(|score| score.is_scored())
        .map(RwpScore::value)
        .collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Renders an average with one decimal place, or `"N/A"`.
#[must_use]
pub fn format_average(average: Option<f64>) -> String {
    average.map_or_else(|| "N/A".to_owned(), |value| format!("{value:.1}"))
}

/// Frequency of each key produced by `key`, ordered by key.
#[must_use]
pub fn frequency_by<K, F>(records: &[CandidateRecord], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&CandidateRecord) -> K,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

/// Frequency of each score among scored records.
#[must_use]
pub fn score_distribution(records: &[CandidateRecord]) -> BTreeMap<RwpScore, usize> {
    let mut counts = BTreeMap::new();
    for score in records
        .iter()
        .map(|record| record.assessment().score)
        .filter(|score| score.is_scored())
    {
        *counts.entry(score).or_insert(0) += 1;
    }
    counts
}

/// Number of records per client.
#[must_use]
pub fn client_breakdown(records: &[CandidateRecord]) -> BTreeMap<ClientId, usize> {
    frequency_by(records, |record| record.client_id().clone())
}

/// Number of records per background status.
#[must_use]
pub fn background_breakdown(records: &[CandidateRecord]) -> BTreeMap<StatusToken, usize> {
    frequency_by(records, |record| record.statuses().background.clone())
}

/// Headline figures on the recruiter dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecruiterSummary {
    /// Records in the full snapshot.
    pub total: usize,
    /// Records left after filtering.
    pub showing: usize,
    /// Mean score of the filtered records.
    pub average_score: Option<f64>,
    /// Flagged records in the full snapshot.
    pub flagged: usize,
}

impl RecruiterSummary {
    /// Summarises a snapshot and the subset currently shown.
    #[must_use]
    pub fn compute(snapshot: &[CandidateRecord], visible: &[CandidateRecord]) -> Self {
        Self {
            total: snapshot.len(),
            showing: visible.len(),
            average_score: average_score(visible),
            flagged: flagged(snapshot),
        }
    }
}

/// Headline figures on the client dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSummary {
    /// Records for the client.
    pub total: usize,
    /// Records whose background check is cleared or complete.
    pub background_cleared: usize,
    /// Records whose drug screen is negative or passed.
    pub drug_passed: usize,
    /// Records with both forms uploaded.
    pub forms_complete: usize,
}

impl ClientSummary {
    /// Summarises a client's records.
    #[must_use]
    pub fn compute(records: &[CandidateRecord]) -> Self {
        Self {
            total: records.len(),
            background_cleared: count_status_matching(
                records,
                StatusField::Background,
                &BACKGROUND_CLEARED,
            ),
            drug_passed: count_status_matching(records, StatusField::DrugTest, &DRUG_TEST_PASSED),
            forms_complete: forms_complete(records),
        }
    }
}
