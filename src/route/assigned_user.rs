use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use sqlx::{Postgres, Transaction};

use crate::{
    core::{
        entity::EntityError,
        security::{get_user_from_token, BearerAuthorization},
    },
    model::{assigned_user::AssignedUser, user::User},
    repository::{
        assigned_user::{
            create_assigned_user, delete_assigned_user, get_assigned_user_by_id,
            get_assigned_users, is_assigned,
        },
        entity::fetch_has_one,
        user::get_active_user,
    },
    schema::{
        assigned_user::{
            AssignedUserCreateRequest, AssignedUserCreateResponses, AssignedUserDeleteResponses,
            AssignedUserListResponses, DetailAssignedUser,
        },
        common::{
            BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, RelatedUser,
            UnauthorizedResponse,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiAssignedUserTags {
    AssignedUser,
}

async fn assigned_user_detail(
    tx: &mut Transaction<'_, Postgres>,
    assigned_user: AssignedUser,
) -> anyhow::Result<DetailAssignedUser> {
    let user = fetch_has_one::<AssignedUser, User>(tx, &assigned_user, "user").await?;
    let assignuser = fetch_has_one::<AssignedUser, User>(tx, &assigned_user, "assignuser").await?;
    Ok(DetailAssignedUser {
        id: assigned_user.id,
        user: user.map(RelatedUser::from),
        assignuser: assignuser.map(RelatedUser::from),
    })
}

pub struct ApiAssignedUser;

#[OpenApi]
impl ApiAssignedUser {
    #[oai(
        path = "/assigned-user/",
        method = "get",
        tag = "ApiAssignedUserTags::AssignedUser"
    )]
    async fn get_assigned_users_api(
        &self,
        Query(user_id): Query<Option<i32>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> AssignedUserListResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "get_assigned_users_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "get_assigned_users_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "get_assigned_users_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if user.is_none() {
            return AssignedUserListResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let data = match get_assigned_users(&mut tx, user_id).await {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserListResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "get_assigned_users_api",
                        "get_assigned_users",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut results: Vec<DetailAssignedUser> = vec![];
        for item in data {
            match assigned_user_detail(&mut tx, item).await {
                Ok(val) => results.push(val),
                Err(err) => {
                    return AssignedUserListResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.assigned_user",
                            "get_assigned_users_api",
                            "assigned_user_detail",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }
        AssignedUserListResponses::Ok(Json(results))
    }

    #[oai(
        path = "/assigned-user/",
        method = "post",
        tag = "ApiAssignedUserTags::AssignedUser"
    )]
    async fn create_assigned_user_api(
        &self,
        Json(json): Json<AssignedUserCreateRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> AssignedUserCreateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "create_assigned_user_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "create_assigned_user_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "create_assigned_user_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if user.is_none() {
            return AssignedUserCreateResponses::Unauthorized(Json(
                UnauthorizedResponse::default(),
            ));
        }

        if json.user_id == json.assignuser_id {
            return AssignedUserCreateResponses::BadRequest(Json(BadRequestResponse {
                message: "a user cannot be assigned to itself".to_string(),
            }));
        }

        // both ends must be active users
        for id in [json.user_id, json.assignuser_id] {
            match get_active_user(&mut tx, id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return AssignedUserCreateResponses::BadRequest(Json(BadRequestResponse {
                        message: format!("user with id = {} not found", id),
                    }))
                }
                Err(err) => {
                    return AssignedUserCreateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.assigned_user",
                            "create_assigned_user_api",
                            "get_active_user",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }

        match is_assigned(&mut tx, json.user_id, json.assignuser_id).await {
            Ok(false) => {}
            Ok(true) => {
                return AssignedUserCreateResponses::BadRequest(Json(BadRequestResponse {
                    message: format!(
                        "user with id = {} is already assigned to user with id = {}",
                        json.assignuser_id, json.user_id
                    ),
                }))
            }
            Err(err) => {
                return AssignedUserCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "create_assigned_user_api",
                        "is_assigned",
                        &err.to_string(),
                    ),
                ))
            }
        }

        let new_assignment =
            match create_assigned_user(&mut tx, json.user_id, json.assignuser_id).await {
                Ok(val) => val,
                Err(err) => {
                    if let Some(entity_err) = err.downcast_ref::<EntityError>() {
                        return AssignedUserCreateResponses::BadRequest(Json(BadRequestResponse {
                            message: entity_err.to_string(),
                        }));
                    }
                    return AssignedUserCreateResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.assigned_user",
                            "create_assigned_user_api",
                            "create_assigned_user",
                            &err.to_string(),
                        ),
                    ));
                }
            };

        let detail = match assigned_user_detail(&mut tx, new_assignment).await {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "create_assigned_user_api",
                        "assigned_user_detail",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Err(err) = tx.commit().await {
            return AssignedUserCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.assigned_user",
                    "create_assigned_user_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        AssignedUserCreateResponses::Ok(Json(detail))
    }

    #[oai(
        path = "/assigned-user/",
        method = "delete",
        tag = "ApiAssignedUserTags::AssignedUser"
    )]
    async fn delete_assigned_user_api(
        &self,
        Query(id): Query<i32>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> AssignedUserDeleteResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "delete_assigned_user_api",
                        "begin transaction",
                        &err.to_string(),
                    ),
                ));
            }
        };

        // get redis conn from pool
        let mut redis_conn = match state.redis_conn.get() {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "delete_assigned_user_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(val) => val,
            Err(err) => {
                return AssignedUserDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "delete_assigned_user_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if user.is_none() {
            return AssignedUserDeleteResponses::Unauthorized(Json(
                UnauthorizedResponse::default(),
            ));
        }

        let assigned_user = match get_assigned_user_by_id(&mut tx, id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return AssignedUserDeleteResponses::NotFound(Json(NotFoundResponse {
                    message: format!("assigned user with id = {} not found", id),
                }))
            }
            Err(err) => {
                return AssignedUserDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.assigned_user",
                        "delete_assigned_user_api",
                        "get_assigned_user_by_id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        if let Err(err) = delete_assigned_user(&mut tx, &assigned_user).await {
            return AssignedUserDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.assigned_user",
                    "delete_assigned_user_api",
                    "delete_assigned_user",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return AssignedUserDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.assigned_user",
                    "delete_assigned_user_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        AssignedUserDeleteResponses::NoContent
    }
}
