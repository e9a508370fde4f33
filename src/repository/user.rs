use chrono::{DateTime, FixedOffset, Local};
use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::user::{User, TABLE_NAME},
};

use super::entity::{get_entity_by_pk, insert_entity};

pub async fn get_user_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
    exclude_soft_delete: Option<bool>,
) -> anyhow::Result<Option<User>> {
    let exclude_soft_delete = exclude_soft_delete.unwrap_or(true);
    let mut filters: Vec<String> = vec!["id = $1".to_string()];
    if exclude_soft_delete {
        filters.push("deleted_date IS NULL".to_string());
    }
    let stmt = query_builder(None, TABLE_NAME, &filters, vec![], None, None);
    let user = binds_query_as::<User>(&stmt, vec![SqlxBinds::Int(id)])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(user)
}

pub async fn get_user_by_username(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
) -> anyhow::Result<Option<User>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &["user_name = $1".to_string(), "deleted_date IS NULL".to_string()],
        vec![],
        None,
        None,
    );
    let user = binds_query_as::<User>(&stmt, vec![SqlxBinds::String(username.to_string())])
        .fetch_optional(&mut **tx)
        .await?;
    Ok(user)
}

/// Active, non-deleted user; used to check both ends of an assignment.
pub async fn get_active_user(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
) -> anyhow::Result<Option<User>> {
    let user = get_entity_by_pk::<User>(tx, id, false).await?;
    Ok(user.filter(|x| x.deleted_date.is_none() && x.is_active.unwrap_or(true)))
}

pub async fn create_user(
    tx: &mut Transaction<'_, Postgres>,
    user_name: String,
    email: Option<String>,
    now: Option<DateTime<FixedOffset>>,
) -> anyhow::Result<User> {
    let now = now.unwrap_or(Local::now().fixed_offset());
    let new_user = User {
        id: 0,
        user_name,
        email,
        is_active: Some(true),
        created_date: Some(now),
        updated_date: Some(now),
        deleted_date: None,
    };
    insert_entity(tx, &new_user).await
}
