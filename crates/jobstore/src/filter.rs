//! Search-filter WHERE clause compiler for job queries.
//!
//! The predicate set is fixed and known, so the compiler hardcodes its
//! column associations rather than going through a [`crate::FieldMapping`].
//! Placeholder numbering follows the same discipline as the partial-update
//! compiler: 1-based, contiguous, one slot per value-bearing predicate.

use crate::param::ParamList;

/// Sparse search criteria for [`crate::Job::find_all`].
///
/// Each predicate is independently present-or-absent; `None` means "no
/// constraint", not "match the default value".
#[derive(Clone, Debug, Default)]
pub struct JobFilter {
    /// Case-insensitive substring match on the job title.
    pub title: Option<String>,
    /// Inclusive lower bound on salary.
    pub min_salary: Option<i32>,
    /// Restrict to jobs with equity strictly greater than zero.
    ///
    /// Only `Some(true)` applies the predicate; `Some(false)` is ignored,
    /// matching the lack of an "exclude equity" mode in the query surface.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn min_salary(mut self, min_salary: i32) -> Self {
        self.min_salary = Some(min_salary);
        self
    }

    pub fn has_equity(mut self, has_equity: bool) -> Self {
        self.has_equity = Some(has_equity);
        self
    }

    /// Compile the present predicates into a WHERE clause body.
    ///
    /// Predicates apply in a fixed order: title pattern, salary lower bound,
    /// equity flag. The equity predicate is a fixed fragment (`equity > 0`)
    /// and consumes no placeholder. Zero present predicates yield an empty
    /// clause; the caller then emits no `WHERE` keyword at all.
    pub fn build(&self) -> WhereClause {
        let mut params = ParamList::new();
        let mut parts: Vec<String> = Vec::new();

        if let Some(title) = &self.title {
            let idx = params.push(format!("%{title}%"));
            parts.push(format!("title ILIKE ${idx}"));
        }

        if let Some(min_salary) = self.min_salary {
            let idx = params.push(min_salary);
            parts.push(format!("salary >= ${idx}"));
        }

        if self.has_equity == Some(true) {
            parts.push("equity > 0".to_string());
        }

        WhereClause {
            sql: parts.join(" AND "),
            params,
        }
    }
}

/// A compiled WHERE clause body (no `WHERE` keyword) plus its parameters.
#[derive(Clone, Debug)]
pub struct WhereClause {
    sql: String,
    params: ParamList,
}

impl WhereClause {
    /// True when no predicate was present.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }

    pub fn into_parts(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}
