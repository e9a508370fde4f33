use sqlx::PgPool;

use crate::{model::user::User, repository};

/// Register a local user row, normally mirrored from the auth service.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: Option<String>,
) -> anyhow::Result<User> {
    let mut tx = pool.begin().await?;
    if repository::user::get_user_by_username(&mut tx, username)
        .await?
        .is_some()
    {
        anyhow::bail!("user {} already exists", username);
    }
    let user = repository::user::create_user(&mut tx, username.to_string(), email, None).await?;
    tx.commit().await?;
    tracing::info!("created user {} with id {}", user.user_name, user.id);
    Ok(user)
}
