use chrono::{DateTime, FixedOffset, Local};
use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder},
    model::{
        member_type::{MemberType, TABLE_NAME},
        user::User,
    },
};

use super::entity::{get_entity_by_pk, insert_entity, soft_delete_entity, update_entity};

pub async fn get_all_member_type(
    tx: &mut Transaction<'_, Postgres>,
) -> anyhow::Result<Vec<MemberType>> {
    let filters: Vec<String> = vec!["deleted_at IS NULL".to_string()];
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["type_name ASC".to_string()],
        None,
        None,
    );
    let q = binds_query_as::<MemberType>(&stmt, vec![]);
    let data = q.fetch_all(&mut **tx).await?;
    Ok(data)
}

pub async fn get_member_type_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
) -> anyhow::Result<Option<MemberType>> {
    get_entity_by_pk::<MemberType>(tx, id, true).await
}

pub async fn create_member_type(
    tx: &mut Transaction<'_, Postgres>,
    type_name: String,
    description: Option<String>,
    request_user: Option<&User>,
    now: Option<DateTime<FixedOffset>>,
) -> anyhow::Result<MemberType> {
    let now = now.unwrap_or(Local::now().fixed_offset());
    let user_id = request_user.map(|x| x.id);
    let new_member_type = MemberType {
        id: 0,
        type_name,
        description,
        created_by: user_id,
        created_at: Some(now),
        updated_by: user_id,
        updated_at: Some(now),
        deleted_at: None,
    };
    insert_entity(tx, &new_member_type).await
}

pub async fn update_member_type(
    tx: &mut Transaction<'_, Postgres>,
    member_type: &mut MemberType,
    type_name: String,
    description: Option<String>,
    request_user: &User,
    now: Option<DateTime<FixedOffset>>,
) -> anyhow::Result<()> {
    let now = now.unwrap_or(Local::now().fixed_offset());
    member_type.type_name = type_name;
    member_type.description = description;
    member_type.updated_by = Some(request_user.id);
    member_type.updated_at = Some(now);
    update_entity(tx, member_type).await
}

pub async fn soft_delete_member_type(
    tx: &mut Transaction<'_, Postgres>,
    member_type: &mut MemberType,
    request_user: &User,
    now: Option<DateTime<FixedOffset>>,
) -> anyhow::Result<()> {
    let now = now.unwrap_or(Local::now().fixed_offset());
    soft_delete_entity::<MemberType>(tx, member_type.id, request_user.id, now).await?;
    member_type.updated_by = Some(request_user.id);
    member_type.updated_at = Some(now);
    member_type.deleted_at = Some(now);
    Ok(())
}
