//! Composable predicates over candidate snapshots.
//!
//! Text, enum, and range predicates combine with AND. The four form toggles
//! are two independent pairs (GCIC and MEC); within a pair the enabled
//! options combine with inclusive OR, and the pairs combine with AND. A pair
//! with neither option enabled therefore matches nothing, so switching off
//! all four toggles yields an empty result and switching all four on leaves
//! the snapshot untouched.

use super::{
    CandidateDomainError, CandidateRecord, ClientId, FormUpload, FormUploads, PipelineStatus,
    RwpScore, StatusField, StatusToken,
};
use std::collections::BTreeSet;

/// Inclusive range of resume scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRange {
    min: RwpScore,
    max: RwpScore,
}

impl ScoreRange {
    /// Lowest score on the recruiter slider.
    pub const SLIDER_MIN: f64 = 0.0;
    /// Highest score on the recruiter slider.
    pub const SLIDER_MAX: f64 = 10.0;

    /// Creates an inclusive score range.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateDomainError::InvalidScoreRange`] when `min` is
    /// greater than `max`.
    pub fn new(min: f64, max: f64) -> Result<Self, CandidateDomainError> {
        let lower = RwpScore::new(min);
        let upper = RwpScore::new(max);
        if lower > upper {
            return Err(CandidateDomainError::InvalidScoreRange {
                min: lower.to_string(),
                max: upper.to_string(),
            });
        }
        Ok(Self {
            min: lower,
            max: upper,
        })
    }

    /// Returns `true` when `score` lies within the bounds, inclusive.
    #[must_use]
    pub fn contains(&self, score: RwpScore) -> bool {
        self.min <= score && score <= self.max
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            min: RwpScore::new(Self::SLIDER_MIN),
            max: RwpScore::new(Self::SLIDER_MAX),
        }
    }
}

/// The four recruiter form toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each toggle is an independent checkbox"
)]
pub struct FormToggles {
    /// Include candidates with GCIC uploaded.
    pub has_gcic: bool,
    /// Include candidates without GCIC.
    pub missing_gcic: bool,
    /// Include candidates with MEC uploaded.
    pub has_mec: bool,
    /// Include candidates without MEC.
    pub missing_mec: bool,
}

impl FormToggles {
    /// Every toggle enabled.
    pub const ALL: Self = Self {
        has_gcic: true,
        missing_gcic: true,
        has_mec: true,
        missing_mec: true,
    };

    /// Every toggle disabled.
    pub const NONE: Self = Self {
        has_gcic: false,
        missing_gcic: false,
        has_mec: false,
        missing_mec: false,
    };

    /// Returns `true` when both pairs accept the record's form state.
    #[must_use]
    pub const fn matches(&self, forms: &FormUploads) -> bool {
        pair_matches(self.has_gcic, self.missing_gcic, forms.gcic)
            && pair_matches(self.has_mec, self.missing_mec, forms.mec)
    }

    const fn is_all(&self) -> bool {
        self.has_gcic && self.missing_gcic && self.has_mec && self.missing_mec
    }
}

impl Default for FormToggles {
    fn default() -> Self {
        Self::ALL
    }
}

const fn pair_matches(has: bool, missing: bool, form: FormUpload) -> bool {
    (has && form.is_uploaded()) || (missing && !form.is_uploaded())
}

/// Exact form-completion filter offered on the client dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormCompletion {
    /// No restriction.
    #[default]
    Any,
    /// Both forms uploaded.
    Both,
    /// Only GCIC uploaded.
    GcicOnly,
    /// Only MEC uploaded.
    MecOnly,
    /// Neither form uploaded.
    Neither,
}

impl FormCompletion {
    /// Returns `true` when the record's form state matches exactly.
    #[must_use]
    pub const fn matches(self, forms: &FormUploads) -> bool {
        let gcic = forms.gcic.is_uploaded();
        let mec = forms.mec.is_uploaded();
        match self {
            Self::Any => true,
            Self::Both => gcic && mec,
            Self::GcicOnly => gcic && !mec,
            Self::MecOnly => !gcic && mec,
            Self::Neither => !gcic && !mec,
        }
    }
}

/// A set of independently toggleable predicates.
///
/// The default filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    search: Option<String>,
    client: Option<ClientId>,
    score_range: Option<ScoreRange>,
    pipeline_status: Option<PipelineStatus>,
    statuses: Vec<(StatusField, StatusToken)>,
    flagged_only: bool,
    form_toggles: FormToggles,
    form_completion: FormCompletion,
}

impl CandidateFilter {
    /// Creates a filter that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches records whose name, email, phone, or client contains `text`,
    /// ignoring case. Blank text disables the predicate.
    #[must_use]
    pub fn with_search(mut self, text: &str) -> Self {
        let needle = text.trim();
        self.search = (!needle.is_empty()).then(|| needle.to_lowercase());
        self
    }

    /// Matches records for exactly this client.
    #[must_use]
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client = Some(client_id);
        self
    }

    /// Matches records whose score lies within `range`.
    #[must_use]
    pub const fn with_score_range(mut self, range: ScoreRange) -> Self {
        self.score_range = Some(range);
        self
    }

    /// Matches records in exactly this pipeline status.
    #[must_use]
    pub const fn with_pipeline_status(mut self, status: PipelineStatus) -> Self {
        self.pipeline_status = Some(status);
        self
    }

    /// Matches records whose vendor status equals `token` exactly.
    ///
    /// Setting a field twice replaces the earlier token.
    #[must_use]
    pub fn with_status(mut self, field: StatusField, token: StatusToken) -> Self {
        self.statuses.retain(|(existing, _)| *existing != field);
        self.statuses.push((field, token));
        self
    }

    /// Matches only records with an unreviewed vendor change.
    #[must_use]
    pub const fn flagged_only(mut self) -> Self {
        self.flagged_only = true;
        self
    }

    /// Replaces the recruiter form toggles.
    #[must_use]
    pub const fn with_form_toggles(mut self, toggles: FormToggles) -> Self {
        self.form_toggles = toggles;
        self
    }

    /// Restricts records to an exact form-completion state.
    #[must_use]
    pub const fn with_form_completion(mut self, completion: FormCompletion) -> Self {
        self.form_completion = completion;
        self
    }

    /// Returns the client predicate, if any.
    #[must_use]
    pub const fn client(&self) -> Option<&ClientId> {
        self.client.as_ref()
    }

    /// Returns `true` when no predicate narrows the result.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.search.is_none()
            && self.client.is_none()
            && self.score_range.is_none()
            && self.pipeline_status.is_none()
            && self.statuses.is_empty()
            && !self.flagged_only
            && self.form_toggles.is_all()
            && self.form_completion == FormCompletion::Any
    }

    /// Returns `true` when `record` satisfies every active predicate.
    #[must_use]
    pub fn matches(&self, record: &CandidateRecord) -> bool {
        self.search
            .as_deref()
            .is_none_or(|needle| search_matches(record, needle))
            && self
                .client
                .as_ref()
                .is_none_or(|client_id| record.client_id() == client_id)
            && self
                .score_range
                .is_none_or(|range| range.contains(record.assessment().score))
            && self
                .pipeline_status
                .is_none_or(|status| record.statuses().pipeline == status)
            && self
                .statuses
                .iter()
                .all(|(field, token)| record.statuses().get(*field) == token)
            && (!self.flagged_only || record.fadv().is_flagged())
            && self.form_toggles.matches(record.forms())
            && self.form_completion.matches(record.forms())
    }

    /// Returns the matching records in snapshot order.
    #[must_use]
    pub fn apply(&self, snapshot: &[CandidateRecord]) -> Vec<CandidateRecord> {
        snapshot
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

fn search_matches(record: &CandidateRecord, needle: &str) -> bool {
    let profile = record.profile();
    [
        profile.first_name.as_str(),
        profile.last_name.as_str(),
        profile.email.as_str(),
        profile.phone.as_str(),
        record.client_id().as_str(),
    ]
    .iter()
    .any(|haystack| haystack.to_lowercase().contains(needle))
}

/// Distinct values offered by each filter selector, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Clients present in the snapshot.
    pub clients: Vec<ClientId>,
    /// Pipeline statuses present in the snapshot, in pipeline order.
    pub pipeline_statuses: Vec<PipelineStatus>,
    /// Profile statuses present in the snapshot.
    pub profile_statuses: Vec<StatusToken>,
    /// Background statuses present in the snapshot.
    pub background_statuses: Vec<StatusToken>,
    /// Drug screen statuses present in the snapshot.
    pub drug_test_statuses: Vec<StatusToken>,
    /// Legacy order statuses present in the snapshot.
    pub order_statuses: Vec<StatusToken>,
}

impl FilterOptions {
    /// Returns the choices for one vendor status field.
    #[must_use]
    pub fn statuses(&self, field: StatusField) -> &[StatusToken] {
        match field {
            StatusField::Profile => &self.profile_statuses,
            StatusField::Background => &self.background_statuses,
            StatusField::DrugTest => &self.drug_test_statuses,
            StatusField::Order => &self.order_statuses,
        }
    }
}

/// Collects the selector choices for a snapshot.
///
/// Unset vendor statuses are not offered as choices.
#[must_use]
pub fn filter_options(snapshot: &[CandidateRecord]) -> FilterOptions {
    let distinct_status = |field: StatusField| -> Vec<StatusToken> {
        snapshot
            .iter()
            .map(|record| record.statuses().get(field))
            .filter(|token| !token.is_unset())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };

    FilterOptions {
        clients: snapshot
            .iter()
            .map(|record| record.client_id().clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        pipeline_statuses: PipelineStatus::ALL
            .into_iter()
            .filter(|status| {
                snapshot
                    .iter()
                    .any(|record| record.statuses().pipeline == *status)
            })
            .collect(),
        profile_statuses: distinct_status(StatusField::Profile),
        background_statuses: distinct_status(StatusField::Background),
        drug_test_statuses: distinct_status(StatusField::DrugTest),
        order_statuses: distinct_status(StatusField::Order),
    }
}
