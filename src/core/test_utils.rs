use crate::core::session::add_session;
use crate::model::user::User;
use crate::settings::Config;
use chrono::Local;
use redis::ConnectionLike;
use sqlx::pool::PoolConnection;
use sqlx::{Connection, Postgres, Transaction};
use uuid::Uuid;

pub struct TestUser {
    pub user: User,
    pub token: String,
}

pub async fn insert_user(
    tx: &mut Transaction<'_, Postgres>,
    username: &str,
) -> anyhow::Result<User> {
    let now = Local::now().fixed_offset();
    let user: User = sqlx::query_as(
        r#"
        INSERT INTO public.user (user_name, is_active, created_date, updated_date)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(true)
    .bind(now)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;
    Ok(user)
}

/// Insert a user and register a session for it the way the auth service does.
pub async fn generate_test_user<C: ConnectionLike>(
    db: &mut PoolConnection<Postgres>,
    redis_conn: &mut C,
    config: &Config,
    username: &str,
) -> anyhow::Result<TestUser> {
    let mut tx = db.begin().await?;
    let user = insert_user(&mut tx, username).await?;
    tx.commit().await?;

    let token = Uuid::now_v7().to_string();
    add_session(redis_conn, &user, config, token.clone())?;

    Ok(TestUser { user, token })
}
