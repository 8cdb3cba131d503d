//! # jobstore
//!
//! A PostgreSQL storage layer for job listings.
//!
//! ## Features
//!
//! - **Injection-safe dynamic SQL**: partial updates and search filters
//!   compile to parameterized clauses; values never touch statement text
//! - **Partial updates**: change only the fields supplied, via a generic
//!   SET-clause compiler parameterized by a per-entity [`FieldMapping`]
//! - **Sparse filtering**: optional title / salary / equity predicates
//!   compose into a WHERE clause with contiguous `$n` placeholders
//! - **Transaction-friendly**: pass a transaction anywhere a
//!   [`GenericClient`] is expected
//! - **Pooling**: `deadpool-postgres` helpers behind the `pool` feature
//!
//! ## Example
//!
//! ```ignore
//! use jobstore::{Job, JobFilter, NewJob, PartialUpdate};
//!
//! let pool = jobstore::create_pool("postgres://localhost/jobs")?;
//! let conn = jobstore::PoolClient::new(pool.get().await?);
//!
//! let job = Job::create(&conn, &NewJob {
//!     title: "Engineer".into(),
//!     salary: Some(90000),
//!     equity: None,
//!     company_handle: "acme".into(),
//! }).await?;
//!
//! let senior = Job::find_all(&conn, &JobFilter::new().min_salary(120000)).await?;
//!
//! let job = Job::update(&conn, job.id, &PartialUpdate::new().set("salary", 95000)).await?;
//! Job::remove(&conn, job.id).await?;
//! ```

pub mod client;
pub mod company;
pub mod error;
pub mod filter;
pub mod job;
pub mod param;
pub mod row;
pub mod update;

pub use client::GenericClient;
pub use company::Company;
pub use error::{StoreError, StoreResult};
pub use filter::{JobFilter, WhereClause};
pub use job::{Job, JobDetail, JobSummary, NewJob};
pub use param::{Param, ParamList};
pub use row::{FromRow, RowExt};
pub use update::{FieldMapping, PartialUpdate, SetClause};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use client::PoolClient;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config, create_pool_with_manager_config};
