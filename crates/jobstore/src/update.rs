//! Partial-update SET clause compiler.
//!
//! Turns an arbitrary subset of named fields into a parameterized `SET`
//! clause with contiguous 1-based placeholders, ready to embed into an
//! UPDATE statement. Column names are resolved through a closed,
//! code-defined [`FieldMapping`]; values only ever travel through the
//! [`ParamList`], never through string interpolation.

use crate::error::{StoreError, StoreResult};
use crate::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// A closed mapping from semantic field names to storage column names.
///
/// Entries are defined in code, once per entity, and never derived from
/// request input. A field absent from the table maps to itself.
///
/// # Example
/// ```ignore
/// const COMPANY_UPDATE_FIELDS: FieldMapping =
///     FieldMapping::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);
///
/// assert_eq!(COMPANY_UPDATE_FIELDS.resolve("numEmployees"), "num_employees");
/// assert_eq!(COMPANY_UPDATE_FIELDS.resolve("name"), "name");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    entries: &'static [(&'static str, &'static str)],
}

impl FieldMapping {
    /// The identity mapping: every field is already its column name.
    pub const EMPTY: FieldMapping = FieldMapping { entries: &[] };

    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolve a semantic field name to its storage column name.
    ///
    /// Returns the mapped column if registered, else the field name unchanged.
    pub fn resolve<'a>(&self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
            .unwrap_or(field)
    }
}

/// An ordered set of field updates for a partial UPDATE.
///
/// Fields compile in insertion order; the builder, not a map, carries the
/// payload so placeholder numbering is deterministic.
#[derive(Clone, Debug, Default)]
pub struct PartialUpdate {
    fields: Vec<(String, Param)>,
}

impl PartialUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a new value. Pass an explicit `None::<T>` to set NULL.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, field: &str, value: T) -> Self {
        self.fields.push((field.to_string(), Param::new(value)));
        self
    }

    /// Set a field only when a value is present (None => field untouched).
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.set(field, v)
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Compile into a SET clause with contiguous placeholders `$1..$n`.
    ///
    /// Fails with [`StoreError::InvalidInput`] on an empty payload: that is a
    /// caller-contract violation, raised before any storage interaction.
    pub fn build(&self, mapping: &FieldMapping) -> StoreResult<SetClause> {
        if self.fields.is_empty() {
            return Err(StoreError::invalid_input("no data supplied for update"));
        }

        let mut params = ParamList::new();
        let mut parts = Vec::with_capacity(self.fields.len());
        for (field, value) in &self.fields {
            let column = mapping.resolve(field);
            let idx = params.push_param(value.clone());
            parts.push(format!("\"{column}\"=${idx}"));
        }

        Ok(SetClause {
            sql: parts.join(", "),
            params,
        })
    }
}

/// A compiled SET clause: SQL fragment plus its ordered parameters.
///
/// Placeholder indices are contiguous from `$1` and correspond 1:1 to the
/// parameter positions, so the clause embeds into a larger statement whose
/// caller appends further placeholders starting at [`SetClause::next_placeholder`].
#[derive(Clone, Debug)]
pub struct SetClause {
    sql: String,
    params: ParamList,
}

impl SetClause {
    /// The SET clause body, e.g. `"title"=$1, "salary"=$2`.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Index for the next placeholder a caller appends after this clause.
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }

    pub fn into_parts(self) -> (String, ParamList) {
        (self.sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_with_mapping() {
        const MAPPING: FieldMapping = FieldMapping::new(&[("firstName", "first_name")]);
        let clause = PartialUpdate::new()
            .set("firstName", "Aliya")
            .build(&MAPPING)
            .unwrap();
        assert_eq!(clause.sql(), "\"first_name\"=$1");
        assert_eq!(clause.params().len(), 1);
    }

    #[test]
    fn two_fields_partial_mapping() {
        const MAPPING: FieldMapping = FieldMapping::new(&[("firstName", "first_name")]);
        let clause = PartialUpdate::new()
            .set("firstName", "Aliya")
            .set("age", 32_i32)
            .build(&MAPPING)
            .unwrap();
        assert_eq!(clause.sql(), "\"first_name\"=$1, \"age\"=$2");
        assert_eq!(clause.params().len(), 2);
    }

    #[test]
    fn empty_payload_is_invalid_input() {
        let err = PartialUpdate::new().build(&FieldMapping::EMPTY).unwrap_err();
        assert!(err.is_invalid_input());

        const MAPPING: FieldMapping = FieldMapping::new(&[("title", "title")]);
        let err = PartialUpdate::new().build(&MAPPING).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn identity_mapping_uses_field_verbatim() {
        let clause = PartialUpdate::new()
            .set("title", "Engineer")
            .set("salary", 90000_i32)
            .build(&FieldMapping::EMPTY)
            .unwrap();
        assert_eq!(clause.sql(), "\"title\"=$1, \"salary\"=$2");
        assert_eq!(clause.params().len(), 2);
    }

    #[test]
    fn placeholders_follow_insertion_order() {
        let clause = PartialUpdate::new()
            .set("c", 1_i32)
            .set("a", 2_i32)
            .set("b", 3_i32)
            .build(&FieldMapping::EMPTY)
            .unwrap();
        assert_eq!(clause.sql(), "\"c\"=$1, \"a\"=$2, \"b\"=$3");
    }

    #[test]
    fn set_opt_skips_absent_fields() {
        let patch = PartialUpdate::new()
            .set_opt("title", Some("Engineer"))
            .set_opt::<i32>("salary", None);
        assert_eq!(patch.len(), 1);
        let clause = patch.build(&FieldMapping::EMPTY).unwrap();
        assert_eq!(clause.sql(), "\"title\"=$1");
    }

    #[test]
    fn explicit_null_still_binds_a_placeholder() {
        let clause = PartialUpdate::new()
            .set("salary", None::<i32>)
            .build(&FieldMapping::EMPTY)
            .unwrap();
        assert_eq!(clause.sql(), "\"salary\"=$1");
        assert_eq!(clause.params().len(), 1);
    }

    #[test]
    fn next_placeholder_continues_numbering() {
        let clause = PartialUpdate::new()
            .set("salary", 5_i32)
            .build(&FieldMapping::EMPTY)
            .unwrap();
        assert_eq!(clause.next_placeholder(), 2);

        let clause = PartialUpdate::new()
            .set("title", "a")
            .set("salary", 1_i32)
            .set("equity", "0.1")
            .build(&FieldMapping::EMPTY)
            .unwrap();
        assert_eq!(clause.next_placeholder(), 4);
    }

    #[test]
    fn resolve_prefers_mapping_over_identity() {
        const MAPPING: FieldMapping = FieldMapping::new(&[
            ("numEmployees", "num_employees"),
            ("logoUrl", "logo_url"),
        ]);
        assert_eq!(MAPPING.resolve("numEmployees"), "num_employees");
        assert_eq!(MAPPING.resolve("logoUrl"), "logo_url");
        assert_eq!(MAPPING.resolve("name"), "name");
    }
}
