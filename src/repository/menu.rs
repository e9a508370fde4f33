use sqlx::{Postgres, Transaction};

use crate::{
    core::sqlx_utils::{binds_query_as, query_builder},
    model::menu::{Menu, TABLE_NAME},
};

use super::entity::insert_entity;

/// Every menu row, parents and children alike, in display order.
pub async fn get_all_menu(tx: &mut Transaction<'_, Postgres>) -> anyhow::Result<Vec<Menu>> {
    let stmt = query_builder(
        None,
        TABLE_NAME,
        &[],
        vec!["menu_order ASC".to_string(), "id ASC".to_string()],
        None,
        None,
    );
    let data = binds_query_as::<Menu>(&stmt, vec![])
        .fetch_all(&mut **tx)
        .await?;
    Ok(data)
}

pub async fn create_menu(
    tx: &mut Transaction<'_, Postgres>,
    name: String,
    url: Option<String>,
    icon: Option<String>,
    menu_order: i32,
    parent_id: Option<i32>,
) -> anyhow::Result<Menu> {
    let new_menu = Menu {
        id: 0,
        name,
        url,
        icon,
        menu_order,
        parent_id,
    };
    insert_entity(tx, &new_menu).await
}
