use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder, SqlxBinds},
    model::{
        member::{Member, TABLE_NAME},
        user::User,
    },
};

use super::entity::{get_entity_by_pk, insert_entity, soft_delete_entity, update_entity};

/// Writable columns of a member; audit columns are stamped by the repository.
#[derive(Clone, Debug)]
pub struct MemberInput {
    pub member_type: i32,
    pub member_no: String,
    pub member_date: NaiveDate,
    pub full_name: String,
    pub father_husband_name: Option<String>,
    pub mother_name: Option<String>,
    pub member_email: Option<String>,
    pub member_photo: Option<String>,
    pub member_sign: Option<String>,
}

pub async fn paginate_member(
    tx: &mut Transaction<'_, Postgres>,
    page: u32,
    page_size: u32,
    search: Option<String>,
    member_type: Option<i32>,
) -> anyhow::Result<(Vec<Member>, u32, u32)> {
    let mut binds: Vec<SqlxBinds> = vec![];
    let mut filters: Vec<String> = vec![];

    if let Some(search) = search {
        binds.push(SqlxBinds::String(format!("%{}%", search)));
        filters.push(format!(
            "(full_name ILIKE ${idx} OR member_no ILIKE ${idx})",
            idx = binds.len()
        ));
    }
    if let Some(member_type) = member_type {
        binds.push(SqlxBinds::Int(member_type));
        filters.push(format!("member_type = ${}", binds.len()));
    }
    filters.push("deleted_at IS NULL".to_string());

    let page = page.max(1);
    let page_size = page_size.max(1);
    let limit = page_size;
    // past the last representable offset there are no rows to return
    let offset = (page - 1).checked_mul(page_size);
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &filters,
        vec!["updated_at DESC".to_string(), "id DESC".to_string()],
        Some(limit),
        offset,
    );
    let stmt_count = query_builder(
        Some("count(id)".to_string()),
        TABLE_NAME,
        &filters,
        vec![],
        None,
        None,
    );

    let data = match offset {
        Some(_) => {
            binds_query_as::<Member>(&stmt, binds.clone())
                .fetch_all(&mut **tx)
                .await?
        }
        None => vec![],
    };
    let count = binds_query_as::<(i64,)>(&stmt_count, binds)
        .fetch_one(&mut **tx)
        .await?;
    let num_page = (count.0 as u32).div_ceil(page_size);
    Ok((data, count.0 as u32, num_page))
}

pub async fn get_member_by_id(
    tx: &mut Transaction<'_, Postgres>,
    id: i32,
) -> anyhow::Result<Option<Member>> {
    get_entity_by_pk::<Member>(tx, id, true).await
}

pub async fn create_member(
    tx: &mut Transaction<'_, Postgres>,
    input: MemberInput,
    request_user: &User,
    now: Option<DateTime<FixedOffset>>,
) -> anyhow::Result<Member> {
    let now = now.unwrap_or(Local::now().fixed_offset());
    let new_member = Member {
        id: 0,
        member_type: input.member_type,
        member_no: input.member_no,
        member_date: input.member_date,
        full_name: input.full_name,
        father_husband_name: input.father_husband_name,
        mother_name: input.mother_name,
        member_email: input.member_email,
        member_photo: input.member_photo,
        member_sign: input.member_sign,
        created_by: Some(request_user.id),
        created_at: Some(now),
        updated_by: Some(request_user.id),
        updated_at: Some(now),
        deleted_at: None,
    };
    insert_entity(tx, &new_member).await
}

pub async fn update_member(
    tx: &mut Transaction<'_, Postgres>,
    member: &mut Member,
    input: MemberInput,
    request_user: &User,
    now: Option<DateTime<FixedOffset>>,
) -> anyhow::Result<()> {
    let now = now.unwrap_or(Local::now().fixed_offset());
    member.member_type = input.member_type;
    member.member_no = input.member_no;
    member.member_date = input.member_date;
    member.full_name = input.full_name;
    member.father_husband_name = input.father_husband_name;
    member.mother_name = input.mother_name;
    member.member_email = input.member_email;
    member.member_photo = input.member_photo;
    member.member_sign = input.member_sign;
    member.updated_by = Some(request_user.id);
    member.updated_at = Some(now);
    update_entity(tx, member).await
}

pub async fn soft_delete_member(
    tx: &mut Transaction<'_, Postgres>,
    member: &mut Member,
    request_user: &User,
    now: Option<DateTime<FixedOffset>>,
) -> anyhow::Result<()> {
    let now = now.unwrap_or(Local::now().fixed_offset());
    soft_delete_entity::<Member>(tx, member.id, request_user.id, now).await?;
    member.updated_by = Some(request_user.id);
    member.updated_at = Some(now);
    member.deleted_at = Some(now);
    Ok(())
}
