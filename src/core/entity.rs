//! Declarative table metadata shared by every model.
//!
//! A model describes its table, columns and `hasOne` relations once, and the
//! generic repository in [`crate::repository::entity`] builds its statements
//! from that description.

use thiserror::Error;

use super::sqlx_utils::SqlxBinds;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Text,
    Date,
    DateTime,
    Bool,
}

impl FieldType {
    pub fn accepts(&self, value: &SqlxBinds) -> bool {
        matches!(
            (self, value),
            (FieldType::Int, SqlxBinds::Int(_) | SqlxBinds::OptionInt(_))
                | (
                    FieldType::Text,
                    SqlxBinds::String(_) | SqlxBinds::OptionString(_)
                )
                | (FieldType::Date, SqlxBinds::Date(_) | SqlxBinds::OptionDate(_))
                | (
                    FieldType::DateTime,
                    SqlxBinds::DateTimeFixedOffset(_) | SqlxBinds::OptionDateTimeFixedOffset(_)
                )
                | (FieldType::Bool, SqlxBinds::Bool(_) | SqlxBinds::OptionBool(_))
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDef {
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    HasOne,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationDef {
    pub name: &'static str,
    pub kind: RelationKind,
    /// Table name of the related entity.
    pub target: &'static str,
    pub foreign_key: &'static str,
}

impl RelationDef {
    /// `hasOne` keyed by a column of the same name as the relation.
    pub const fn has_one(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: RelationKind::HasOne,
            target,
            foreign_key: name,
        }
    }

    pub const fn has_one_via(
        name: &'static str,
        target: &'static str,
        foreign_key: &'static str,
    ) -> Self {
        Self {
            name,
            kind: RelationKind::HasOne,
            target,
            foreign_key,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    #[error("{table}: missing required field(s): {}", fields.join(", "))]
    MissingRequired {
        table: &'static str,
        fields: Vec<&'static str>,
    },
    #[error("{table}.{field}: value does not match declared type {expected:?}")]
    TypeMismatch {
        table: &'static str,
        field: &'static str,
        expected: FieldType,
    },
    #[error("{table}: unknown field {field}")]
    UnknownField { table: &'static str, field: String },
    #[error("{table}: unknown relation {relation}")]
    UnknownRelation {
        table: &'static str,
        relation: String,
    },
    #[error("{table}: relation {relation} targets {expected}, not {actual}")]
    RelationTarget {
        table: &'static str,
        relation: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{table} has no {field} column for soft delete")]
    NotSoftDeletable {
        table: &'static str,
        field: &'static str,
    },
}

pub const SOFT_DELETE_FIELD: &str = "deleted_at";

pub trait Entity {
    const TABLE_NAME: &'static str;
    const PRIMARY_KEY: &'static str = "id";
    const FIELDS: &'static [FieldDef];
    const RELATIONS: &'static [RelationDef] = &[];
    /// Datetime columns stamped by the repository.
    const TIMESTAMPS: &'static [&'static str] = &[];
    /// Columns holding the id of the user who made a change.
    const USERS: &'static [&'static str] = &[];

    fn primary_key(&self) -> i32;

    /// Bind value of a declared field, `None` when the field is not declared.
    fn field_value(&self, field: &str) -> Option<SqlxBinds>;

    fn field(name: &str) -> Option<&'static FieldDef> {
        Self::FIELDS.iter().find(|x| x.name == name)
    }

    fn relation(name: &str) -> Result<&'static RelationDef, EntityError> {
        Self::RELATIONS
            .iter()
            .find(|x| x.name == name)
            .ok_or_else(|| EntityError::UnknownRelation {
                table: Self::TABLE_NAME,
                relation: name.to_string(),
            })
    }

    fn is_soft_deletable() -> bool {
        Self::TIMESTAMPS.contains(&SOFT_DELETE_FIELD)
    }

    fn required_fields() -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .filter(|x| x.required)
            .map(|x| x.name)
            .collect()
    }
}

/// Check declared types, then required fields, before a row is written.
pub fn validate<E: Entity>(entity: &E) -> Result<(), EntityError> {
    let mut missing: Vec<&'static str> = vec![];
    for field in E::FIELDS {
        let value = entity
            .field_value(field.name)
            .ok_or_else(|| EntityError::UnknownField {
                table: E::TABLE_NAME,
                field: field.name.to_string(),
            })?;
        if !field.field_type.accepts(&value) {
            return Err(EntityError::TypeMismatch {
                table: E::TABLE_NAME,
                field: field.name,
                expected: field.field_type,
            });
        }
        if field.required && value.is_missing() {
            missing.push(field.name);
        }
    }
    if !missing.is_empty() {
        return Err(EntityError::MissingRequired {
            table: E::TABLE_NAME,
            fields: missing,
        });
    }
    Ok(())
}

/// Foreign key value behind a `hasOne` relation, `None` when unset.
pub fn related_key<E: Entity>(entity: &E, relation: &str) -> Result<Option<i32>, EntityError> {
    let relation = E::relation(relation)?;
    let value = entity
        .field_value(relation.foreign_key)
        .ok_or_else(|| EntityError::UnknownField {
            table: E::TABLE_NAME,
            field: relation.foreign_key.to_string(),
        })?;
    Ok(value.as_int())
}
