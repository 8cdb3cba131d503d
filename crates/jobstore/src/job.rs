//! Job records: models and storage operations.
//!
//! Every operation is a single parameterized statement against storage; no
//! state is held between calls. Statement text is assembled by pure `build_*`
//! functions so it can be asserted without a database.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::client::GenericClient;
use crate::company::Company;
use crate::error::{StoreError, StoreResult};
use crate::filter::JobFilter;
use crate::param::ParamList;
use crate::row::{FromRow, RowExt};
use crate::update::{FieldMapping, PartialUpdate};

/// Columns returned by job statements.
const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Field→column overrides for partial updates of jobs.
///
/// Updatable job fields (title, salary, equity) already use their column
/// names verbatim; the identity and foreign-key columns are never updatable
/// and so never appear here.
pub const JOB_UPDATE_FIELDS: FieldMapping = FieldMapping::EMPTY;

/// A job row.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &tokio_postgres::Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Fields for creating a job; storage assigns the identity.
#[derive(Clone, Debug)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A job listing row from [`Job::find_all`], joined to its company's name.
///
/// `company_name` is `None` when the job's handle has no company row (the
/// join is outer, so such jobs are still listed).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

impl FromRow for JobSummary {
    fn from_row(row: &tokio_postgres::Row) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
            company_name: row.try_get_column("company_name")?,
        })
    }
}

/// A single job from [`Job::get`], with its company resolved to a full
/// record in place of the bare handle.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Option<Company>,
}

impl Job {
    /// Insert a new job and return it with its storage-assigned id.
    pub async fn create(conn: &impl GenericClient, job: &NewJob) -> StoreResult<Job> {
        let (sql, params) = build_create(job);
        debug!(statement = "job.create", params = params.len(), "{sql}");
        let row = conn.query_one(&sql, &params.as_refs()).await?;
        Job::from_row(&row)
    }

    /// List jobs matching the filter, ordered by title.
    ///
    /// The company join is outer: a job whose handle has no company row is
    /// still listed, with `company_name` absent.
    pub async fn find_all(
        conn: &impl GenericClient,
        filter: &JobFilter,
    ) -> StoreResult<Vec<JobSummary>> {
        let (sql, params) = build_find_all(filter);
        debug!(statement = "job.find_all", params = params.len(), "{sql}");
        let rows = conn.query(&sql, &params.as_refs()).await?;
        rows.iter().map(JobSummary::from_row).collect()
    }

    /// Fetch a job by id, resolving its company reference.
    ///
    /// Fails with [`StoreError::NotFound`] when the job is absent. A dangling
    /// company handle yields `company: None`, not an error.
    pub async fn get(conn: &impl GenericClient, id: i32) -> StoreResult<JobDetail> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        debug!(statement = "job.get", "{sql}");
        let row = conn
            .query_opt(&sql, &[&id])
            .await?
            .ok_or_else(|| StoreError::not_found(format!("no job with id {id}")))?;
        let job = Job::from_row(&row)?;

        let company = Company::get(conn, &job.company_handle).await?;
        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    /// Apply a partial update and return the updated job.
    ///
    /// Only the supplied fields change; id and company_handle are never
    /// updatable. An empty patch fails with [`StoreError::InvalidInput`]
    /// before reaching storage; a missing id fails with
    /// [`StoreError::NotFound`].
    pub async fn update(
        conn: &impl GenericClient,
        id: i32,
        patch: &PartialUpdate,
    ) -> StoreResult<Job> {
        let (sql, params) = build_update(id, patch)?;
        debug!(statement = "job.update", params = params.len(), "{sql}");
        let row = conn
            .query_opt(&sql, &params.as_refs())
            .await?
            .ok_or_else(|| StoreError::not_found(format!("no job with id {id}")))?;
        Job::from_row(&row)
    }

    /// Delete a job by id.
    ///
    /// Fails with [`StoreError::NotFound`] when no row was deleted.
    pub async fn remove(conn: &impl GenericClient, id: i32) -> StoreResult<()> {
        let sql = "DELETE FROM jobs WHERE id = $1 RETURNING id";
        debug!(statement = "job.remove", "{sql}");
        let row = conn.query_opt(sql, &[&id]).await?;
        if row.is_none() {
            return Err(StoreError::not_found(format!("no job with id {id}")));
        }
        Ok(())
    }
}

fn build_create(job: &NewJob) -> (String, ParamList) {
    let mut params = ParamList::new();
    params.push(job.title.clone());
    params.push(job.salary);
    params.push(job.equity);
    params.push(job.company_handle.clone());
    let sql = format!(
        "INSERT INTO jobs (title, salary, equity, company_handle) \
         VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
    );
    (sql, params)
}

fn build_find_all(filter: &JobFilter) -> (String, ParamList) {
    let mut sql = String::from(
        "SELECT jobs.id, jobs.title, jobs.salary, jobs.equity, jobs.company_handle, \
         companies.name AS company_name \
         FROM jobs LEFT JOIN companies ON companies.handle = jobs.company_handle",
    );
    let (where_sql, params) = filter.build().into_parts();
    if !where_sql.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
    }
    sql.push_str(" ORDER BY title");
    (sql, params)
}

fn build_update(id: i32, patch: &PartialUpdate) -> StoreResult<(String, ParamList)> {
    let set = patch.build(&JOB_UPDATE_FIELDS)?;
    let id_idx = set.next_placeholder();
    let (set_sql, mut params) = set.into_parts();
    params.push(id);
    let sql = format!("UPDATE jobs SET {set_sql} WHERE id = ${id_idx} RETURNING {JOB_COLUMNS}");
    Ok((sql, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_statement_shape() {
        let job = NewJob {
            title: "Engineer".to_string(),
            salary: Some(90000),
            equity: None,
            company_handle: "acme".to_string(),
        };
        let (sql, params) = build_create(&job);
        assert_eq!(
            sql,
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING id, title, salary, equity, company_handle"
        );
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn find_all_without_filter_has_no_where() {
        let (sql, params) = build_find_all(&JobFilter::new());
        assert_eq!(
            sql,
            "SELECT jobs.id, jobs.title, jobs.salary, jobs.equity, jobs.company_handle, \
             companies.name AS company_name \
             FROM jobs LEFT JOIN companies ON companies.handle = jobs.company_handle \
             ORDER BY title"
        );
        assert!(params.is_empty());
    }

    #[test]
    fn find_all_appends_compiled_filter() {
        let filter = JobFilter::new().title("3").min_salary(2);
        let (sql, params) = build_find_all(&filter);
        assert!(sql.ends_with(" WHERE title ILIKE $1 AND salary >= $2 ORDER BY title"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn find_all_equity_flag_consumes_no_placeholder() {
        let filter = JobFilter::new().has_equity(true);
        let (sql, params) = build_find_all(&filter);
        assert!(sql.ends_with(" WHERE equity > 0 ORDER BY title"));
        assert!(params.is_empty());
    }

    #[test]
    fn update_appends_id_predicate_after_set_params() {
        let patch = PartialUpdate::new().set("salary", 5_i32);
        let (sql, params) = build_update(7, &patch).unwrap();
        assert_eq!(
            sql,
            "UPDATE jobs SET \"salary\"=$1 WHERE id = $2 \
             RETURNING id, title, salary, equity, company_handle"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn update_multiple_fields_keeps_contiguous_numbering() {
        let patch = PartialUpdate::new()
            .set("title", "Staff Engineer")
            .set("salary", 120000_i32)
            .set("equity", None::<Decimal>);
        let (sql, params) = build_update(3, &patch).unwrap();
        assert_eq!(
            sql,
            "UPDATE jobs SET \"title\"=$1, \"salary\"=$2, \"equity\"=$3 WHERE id = $4 \
             RETURNING id, title, salary, equity, company_handle"
        );
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn update_empty_patch_fails_before_storage() {
        let err = build_update(1, &PartialUpdate::new()).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
