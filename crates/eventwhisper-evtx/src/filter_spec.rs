use std::collections::HashSet;

use chrono::{DateTime, Utc};
use eventwhisper_normalize::{
    normalize_int_list, normalize_positive_int, normalize_str_list, normalize_timestamp,
};
use eventwhisper_types::{FilterRequest, Limits, Param};

/// Case-insensitive substring include/exclude sets
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    /// Lowercased terms of which at least one must appear (empty = any)
    include: Vec<String>,

    /// Lowercased terms of which none may appear
    exclude: Vec<String>,
}

impl KeywordFilter {
    /// Build from term lists. Terms are lowercased and any term present in
    /// both lists is dropped from both.
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        let include: Vec<String> = include.into_iter().map(|t| t.to_lowercase()).collect();
        let exclude: Vec<String> = exclude.into_iter().map(|t| t.to_lowercase()).collect();

        let overlap: HashSet<String> = include
            .iter()
            .filter(|t| exclude.contains(t))
            .cloned()
            .collect();

        Self {
            include: include.into_iter().filter(|t| !overlap.contains(t)).collect(),
            exclude: exclude.into_iter().filter(|t| !overlap.contains(t)).collect(),
        }
    }

    /// Check already-lowercased text against both sets
    pub fn matches(&self, lowered: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|t| lowered.contains(t.as_str())) {
            return false;
        }
        !self.exclude.iter().any(|t| lowered.contains(t.as_str()))
    }

    pub fn include(&self) -> &[String] {
        &self.include
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Check if filter is empty (matches everything)
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

/// Normalized, immutable description of one filter call
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSpec {
    /// Inclusive lower bound (UTC)
    start: Option<DateTime<Utc>>,

    /// Inclusive upper bound (UTC)
    end: Option<DateTime<Utc>>,

    keywords: KeywordFilter,

    /// Event ids to include (empty = all)
    event_ids: HashSet<i64>,

    /// Dotted paths to project (None = whole record)
    fields: Option<Vec<String>>,

    /// Maximum records returned
    results_limit: usize,

    /// Maximum records examined
    scan_limit: usize,
}

impl FilterSpec {
    /// Create an unconstrained filter with the given limits
    pub fn new(results_limit: usize, scan_limit: usize) -> Self {
        Self {
            start: None,
            end: None,
            keywords: KeywordFilter::default(),
            event_ids: HashSet::new(),
            fields: None,
            results_limit,
            scan_limit,
        }
    }

    /// Normalize raw caller parameters against the configured limits.
    ///
    /// Returns `None` when either limit is present but unusable (zero,
    /// negative, not a number); callers treat that as an empty result.
    /// Bounds that do not parse fall back to the current time.
    pub fn from_request(request: &FilterRequest, limits: &Limits) -> Option<Self> {
        let results_limit =
            normalize_positive_int(&request.results_limit, limits.default_results_limit)?
                .min(limits.max_results_limit);
        let scan_limit = normalize_positive_int(&request.scan_limit, limits.default_scan_limit)?
            .min(limits.max_scan_limit);

        let now = Utc::now();
        let bound = |param: &Param| {
            if param.is_null() {
                None
            } else {
                normalize_timestamp(param, Some(now))
            }
        };

        let spec = Self::new(results_limit, scan_limit)
            .with_time_range(bound(&request.start), bound(&request.end))
            .with_keywords(
                normalize_str_list(&request.contains, true),
                normalize_str_list(&request.not_contains, true),
            )
            .with_event_ids(normalize_int_list(&request.event_ids))
            .with_fields(normalize_str_list(&request.fields, false));

        Some(spec)
    }

    /// Set the inclusive time range, swapping reversed bounds
    pub fn with_time_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        match (start, end) {
            (Some(s), Some(e)) if s > e => {
                self.start = Some(e);
                self.end = Some(s);
            }
            _ => {
                self.start = start;
                self.end = end;
            }
        }
        self
    }

    pub fn with_keywords(mut self, include: Vec<String>, exclude: Vec<String>) -> Self {
        self.keywords = KeywordFilter::new(include, exclude);
        self
    }

    pub fn with_event_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.event_ids = ids.into_iter().collect();
        self
    }

    /// Project results onto these paths. An empty list keeps whole records.
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = if fields.is_empty() { None } else { Some(fields) };
        self
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub fn keywords(&self) -> &KeywordFilter {
        &self.keywords
    }

    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    pub fn results_limit(&self) -> usize {
        self.results_limit
    }

    pub fn scan_limit(&self) -> usize {
        self.scan_limit
    }

    /// Check an event id against the wanted set
    pub fn wants_event_id(&self, id: Option<i64>) -> bool {
        if self.event_ids.is_empty() {
            return true;
        }
        id.is_some_and(|id| self.event_ids.contains(&id))
    }

    /// Inclusive range check
    pub fn contains_time(&self, t: DateTime<Utc>) -> bool {
        if self.start.is_some_and(|start| t < start) {
            return false;
        }
        !self.end.is_some_and(|end| t > end)
    }
}
