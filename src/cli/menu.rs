use sqlx::PgPool;

use crate::{model::menu::Menu, repository};

pub async fn create_menu(
    pool: &PgPool,
    name: &str,
    url: Option<String>,
    icon: Option<String>,
    menu_order: i32,
    parent_id: Option<i32>,
) -> anyhow::Result<Menu> {
    let mut tx = pool.begin().await?;
    let menu =
        repository::menu::create_menu(&mut tx, name.to_string(), url, icon, menu_order, parent_id)
            .await?;
    tx.commit().await?;
    tracing::info!("created menu {} with id {}", menu.name, menu.id);
    Ok(menu)
}
