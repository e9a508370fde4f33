//! CRUD keyed by the table name and primary key an [`Entity`] declares.

use chrono::{DateTime, FixedOffset};
use sqlx::{postgres::PgRow, FromRow, Postgres, Transaction};

use crate::core::{
    entity::{related_key, validate, Entity, EntityError, RelationKind, SOFT_DELETE_FIELD},
    sqlx_utils::{binds_query, binds_query_as, query_builder, SqlxBinds},
};

fn placeholders(from: usize, count: usize) -> String {
    (from..from + count)
        .map(|x| format!("${}", x))
        .collect::<Vec<String>>()
        .join(", ")
}

fn declared_binds<E: Entity>(entity: &E) -> Result<(Vec<&'static str>, Vec<SqlxBinds>), EntityError> {
    let mut columns: Vec<&'static str> = vec![];
    let mut binds: Vec<SqlxBinds> = vec![];
    for field in E::FIELDS {
        let value = entity
            .field_value(field.name)
            .ok_or_else(|| EntityError::UnknownField {
                table: E::TABLE_NAME,
                field: field.name.to_string(),
            })?;
        columns.push(field.name);
        binds.push(value);
    }
    Ok((columns, binds))
}

pub fn insert_statement<E: Entity>() -> String {
    let columns: Vec<&str> = E::FIELDS.iter().map(|x| x.name).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        E::TABLE_NAME,
        columns.join(", "),
        placeholders(1, columns.len())
    )
}

pub fn update_statement<E: Entity>() -> String {
    let sets: Vec<String> = E::FIELDS
        .iter()
        .enumerate()
        .map(|(idx, x)| format!("{} = ${}", x.name, idx + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        E::TABLE_NAME,
        sets.join(", "),
        E::PRIMARY_KEY,
        E::FIELDS.len() + 1
    )
}

/// Validate and insert, returning the stored row with its generated key.
pub async fn insert_entity<E>(tx: &mut Transaction<'_, Postgres>, entity: &E) -> anyhow::Result<E>
where
    E: Entity + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    validate(entity)?;
    let (_, binds) = declared_binds(entity)?;
    let stmt = insert_statement::<E>();
    let data = binds_query_as::<E>(&stmt, binds).fetch_one(&mut **tx).await?;
    tracing::debug!("inserted {} {}", E::TABLE_NAME, data.primary_key());
    Ok(data)
}

/// Validate and write every declared column of an existing row.
pub async fn update_entity<E: Entity>(
    tx: &mut Transaction<'_, Postgres>,
    entity: &E,
) -> anyhow::Result<()> {
    validate(entity)?;
    let (_, mut binds) = declared_binds(entity)?;
    binds.push(SqlxBinds::Int(entity.primary_key()));
    let stmt = update_statement::<E>();
    binds_query(&stmt, binds).execute(&mut **tx).await?;
    Ok(())
}

pub async fn get_entity_by_pk<E>(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    exclude_soft_delete: bool,
) -> anyhow::Result<Option<E>>
where
    E: Entity + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let binds: Vec<SqlxBinds> = vec![SqlxBinds::Int(id)];
    let mut filters: Vec<String> = vec![format!("{} = $1", E::PRIMARY_KEY)];
    if exclude_soft_delete && E::is_soft_deletable() {
        filters.push(format!("{} IS NULL", SOFT_DELETE_FIELD));
    }
    let stmt = query_builder(None, E::TABLE_NAME, &filters, vec![], None, None);
    let data = binds_query_as::<E>(&stmt, binds)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(data)
}

/// Stamp `deleted_at` (and `updated_at`/`updated_by` when declared) instead
/// of removing the row.
pub async fn soft_delete_entity<E: Entity>(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    request_user_id: i32,
    now: DateTime<FixedOffset>,
) -> anyhow::Result<()> {
    if !E::is_soft_deletable() {
        return Err(EntityError::NotSoftDeletable {
            table: E::TABLE_NAME,
            field: SOFT_DELETE_FIELD,
        }
        .into());
    }
    let mut sets: Vec<String> = vec![];
    let mut binds: Vec<SqlxBinds> = vec![];
    for field in E::TIMESTAMPS {
        if *field == SOFT_DELETE_FIELD || *field == "updated_at" {
            binds.push(SqlxBinds::DateTimeFixedOffset(now));
            sets.push(format!("{} = ${}", field, binds.len()));
        }
    }
    if E::USERS.contains(&"updated_by") {
        binds.push(SqlxBinds::Int(request_user_id));
        sets.push(format!("updated_by = ${}", binds.len()));
    }
    binds.push(SqlxBinds::Int(id));
    let stmt = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        E::TABLE_NAME,
        sets.join(", "),
        E::PRIMARY_KEY,
        binds.len()
    );
    binds_query(&stmt, binds).execute(&mut **tx).await?;
    Ok(())
}

/// Physically remove a row, returning whether it existed.
pub async fn delete_entity<E: Entity>(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
) -> anyhow::Result<bool> {
    let stmt = format!("DELETE FROM {} WHERE {} = $1", E::TABLE_NAME, E::PRIMARY_KEY);
    let res = binds_query(&stmt, vec![SqlxBinds::Int(id)])
        .execute(&mut **tx)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// Load the row a `hasOne` relation points to. Soft deleted targets are still
/// returned so audit fields keep resolving.
pub async fn fetch_has_one<E, T>(
    tx: &mut Transaction<'_, Postgres>,
    entity: &E,
    relation: &str,
) -> anyhow::Result<Option<T>>
where
    E: Entity,
    T: Entity + for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let def = E::relation(relation)?;
    if def.target != T::TABLE_NAME {
        return Err(EntityError::RelationTarget {
            table: E::TABLE_NAME,
            relation: def.name,
            expected: def.target,
            actual: T::TABLE_NAME,
        }
        .into());
    }
    match def.kind {
        RelationKind::HasOne => match related_key(entity, relation)? {
            Some(id) => get_entity_by_pk::<T>(tx, id, false).await,
            None => Ok(None),
        },
    }
}
