use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::assigned_user::{AssignedUser, TABLE_NAME},
};

use super::entity::{delete_entity, get_entity_by_pk, insert_entity};

pub async fn get_assigned_users(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Option<i32>,
) -> anyhow::Result<Vec<AssignedUser>> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];
    if let Some(user_id) = user_id {
        binds.push(SqlxBinds::Int(user_id));
        filters.push(format!("user_id = ${}", binds.len()));
    }
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["id ASC".to_string()],
        None,
        None,
    );
    let data = binds_query_as::<AssignedUser>(&stmt, binds)
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn get_assigned_user_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
) -> anyhow::Result<Option<AssignedUser>> {
    get_entity_by_pk::<AssignedUser>(tx, id, true).await
}

/// Whether `assignuser_id` is already assigned to `user_id`.
pub async fn is_assigned(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i32,
    assignuser_id: i32,
) -> anyhow::Result<bool> {
    let stmt = query_builder(
        Some("count(id)".to_string()),
        TABLE_NAME,
        &["user_id = $1".to_string(), "assignuser_id = $2".to_string()],
        vec![],
        None,
        None,
    );
    let count = binds_query_as::<(i64,)>(
        &stmt,
        vec![SqlxBinds::Int(user_id), SqlxBinds::Int(assignuser_id)],
    )
    .fetch_one(&mut **tx)
    .await?;
    Ok(count.0 > 0)
}

pub async fn create_assigned_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i32,
    assignuser_id: i32,
) -> anyhow::Result<AssignedUser> {
    let new_assignment = AssignedUser {
        id: 0,
        user_id,
        assignuser_id,
    };
    insert_entity(tx, &new_assignment).await
}

pub async fn delete_assigned_user(
    tx: &mut Transaction<'_, Postgres>,
    assigned_user: &AssignedUser,
) -> anyhow::Result<bool> {
    delete_entity::<AssignedUser>(tx, assigned_user.id).await
}
