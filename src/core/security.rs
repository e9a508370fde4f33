use poem::Request;
use poem_openapi::{auth::Bearer, SecurityScheme};
use redis::ConnectionLike;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};

use crate::{model::user::User, repository::user::get_user_by_id};

use super::session::get_session;

/// Resolve the requesting user from a bearer token issued by the auth
/// service. Unknown tokens and deleted users yield `None`.
pub async fn get_user_from_token<C: ConnectionLike>(
    tx: &mut Transaction<'_, Postgres>,
    redis_conn: &mut C,
    token: Option<String>,
) -> anyhow::Result<Option<User>> {
    let Some(token) = token else {
        return Ok(None);
    };
    let Some(session) = get_session(redis_conn, token)? else {
        return Ok(None);
    };
    let user = get_user_by_id(tx, session.user_id, None).await?;
    Ok(user)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserApiKey {
    pub token: Option<String>,
}

/// ApiKey authorization
#[derive(SecurityScheme)]
#[oai(ty = "bearer", checker = "bearer_checker")]
pub struct BearerAuthorization(pub UserApiKey);

pub async fn bearer_checker(_req: &Request, api_key: Bearer) -> Option<UserApiKey> {
    Some(UserApiKey {
        token: Some(api_key.token),
    })
}
