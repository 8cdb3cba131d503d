//! Company records: model and lookup.

use serde::Serialize;

use crate::client::GenericClient;
use crate::error::StoreResult;
use crate::row::{FromRow, RowExt};

/// A company row, as embedded in [`crate::JobDetail`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &tokio_postgres::Row) -> StoreResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

impl Company {
    /// Look up a company by handle.
    ///
    /// A missing row is `Ok(None)`, not an error: callers resolving a job's
    /// company reference tolerate a dangling handle.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> StoreResult<Option<Company>> {
        let row = conn
            .query_opt(
                "SELECT handle, name, description, num_employees, logo_url \
                 FROM companies WHERE handle = $1",
                &[&handle],
            )
            .await?;
        row.as_ref().map(Company::from_row).transpose()
    }
}
