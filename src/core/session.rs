use redis::ConnectionLike;
use serde::{Deserialize, Serialize};

use crate::{model::user::User, settings::Config};

/// Session record written by the auth service under the bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: i32,
}

pub fn add_session<C: ConnectionLike>(
    redis_conn: &mut C,
    user: &User,
    config: &Config,
    token: String,
) -> anyhow::Result<()> {
    let session_data = SessionData { user_id: user.id };
    let session_json = serde_json::to_string(&session_data)?;
    redis::Cmd::set_ex(token, session_json, config.session_exp).exec(redis_conn)?;
    Ok(())
}

pub fn get_session<C: ConnectionLike>(
    redis_conn: &mut C,
    token: String,
) -> anyhow::Result<Option<SessionData>> {
    let res: Option<String> = redis::cmd("get").arg(token).query(redis_conn)?;
    match res {
        Some(res) => {
            let session_data: SessionData = serde_json::from_str(res.as_str())?;
            Ok(Some(session_data))
        }
        None => Ok(None),
    }
}
