use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::domain::Job;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Optional, conjunctive filters of the public job listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Exact match.
    pub category: Option<String>,
    /// Case-insensitive substring.
    pub location: Option<String>,
    /// Exact match.
    pub employment_type: Option<String>,
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

impl JobFilter {
    /// Blank filter values are treated as absent.
    pub fn normalized(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|value| !value.trim().is_empty())
        }

        Self {
            category: keep(self.category),
            location: keep(self.location),
            employment_type: keep(self.employment_type),
            search: keep(self.search),
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        let posting = &job.posting;

        if let Some(category) = &self.category {
            if posting.category != *category {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains_ignore_case(&posting.location, location) {
                return false;
            }
        }
        if let Some(employment_type) = &self.employment_type {
            if posting.employment_type != *employment_type {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains_ignore_case(&posting.title, search)
                && !contains_ignore_case(&posting.description, search)
            {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Which jobs a listing may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    ActiveOnly,
    IncludeInactive,
}

impl ListingScope {
    pub fn admits(self, job: &Job) -> bool {
        match self {
            ListingScope::ActiveOnly => job.is_active,
            ListingScope::IncludeInactive => true,
        }
    }
}

/// Page window, always at least page 1 with a limit of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Absent or non-positive values fall back to page 1, limit 10.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let clamp = |value: Option<i64>, default: u32| match value {
            Some(value) if value >= 1 => u32::try_from(value).unwrap_or(u32::MAX),
            _ => default,
        };

        Self {
            page: clamp(page, DEFAULT_PAGE),
            limit: clamp(limit, DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.limit as usize)
    }

    /// Slice one page out of an already ordered sequence.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.limit as usize)
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Raw listing parameters as received from a query string. Unparseable page
/// numbers fall back to the defaults instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListingParams {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl JobListingParams {
    pub fn into_parts(self) -> (JobFilter, Pagination) {
        let number = |raw: Option<String>| raw.and_then(|value| value.trim().parse::<i64>().ok());
        let filter = JobFilter {
            category: self.category,
            location: self.location,
            employment_type: self.employment_type,
            search: self.search,
        };
        (
            filter.normalized(),
            Pagination::new(number(self.page), number(self.limit)),
        )
    }
}

/// One page of the public listing. `total` counts every match before paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

/// Default listing order: newest first, ties broken by the higher id.
pub fn newest_first(left: &Job, right: &Job) -> Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| right.id.cmp(&left.id))
}
