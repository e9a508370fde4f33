use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use sqlx::{Postgres, Transaction};

use crate::{
    core::{
        entity::EntityError,
        security::{get_user_from_token, BearerAuthorization},
        utils::datetime_to_string_opt,
    },
    model::{member_type::MemberType, user::User},
    repository::{
        entity::fetch_has_one,
        member_type::{
            create_member_type, get_all_member_type, get_member_type_by_id,
            soft_delete_member_type, update_member_type,
        },
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, RelatedUser,
            UnauthorizedResponse,
        },
        member_type::{
            DetailMemberType, MemberTypeAllResponses, MemberTypeCreateResponses,
            MemberTypeDeleteResponses, MemberTypeDetailResponses, MemberTypeRequest,
            MemberTypeUpdateResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiMemberTypeTags {
    MemberType,
}

async fn member_type_detail(
    tx: &mut Transaction<'_, Postgres>,
    member_type: MemberType,
) -> anyhow::Result<DetailMemberType> {
    let created_by = fetch_has_one::<MemberType, User>(tx, &member_type, "created_by").await?;
    let updated_by = fetch_has_one::<MemberType, User>(tx, &member_type, "updated_by").await?;
    Ok(DetailMemberType {
        id: member_type.id,
        type_name: member_type.type_name,
        description: member_type.description,
        created_by: created_by.map(RelatedUser::from),
        updated_by: updated_by.map(RelatedUser::from),
        created_at: datetime_to_string_opt(member_type.created_at),
        updated_at: datetime_to_string_opt(member_type.updated_at),
    })
}

pub struct ApiMemberType;

#[OpenApi]
impl ApiMemberType {
    #[oai(
        path = "/member-type/all/",
        method = "get",
        tag = "ApiMemberTypeTags::MemberType"
    )]
    async fn get_all_member_type_api(
        &self,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberTypeAllResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberTypeAllResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "get_all_member_type_api",
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
                return MemberTypeAllResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "get_all_member_type_api",
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
                return MemberTypeAllResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "get_all_member_type_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if user.is_none() {
            return MemberTypeAllResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let data = match get_all_member_type(&mut tx).await {
            Ok(val) => val,
            Err(err) => {
                return MemberTypeAllResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "get_all_member_type_api",
                        "get_all_member_type",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut results: Vec<DetailMemberType> = vec![];
        for item in data {
            match member_type_detail(&mut tx, item).await {
                Ok(val) => results.push(val),
                Err(err) => {
                    return MemberTypeAllResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.member_type",
                            "get_all_member_type_api",
                            "member_type_detail",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }
        MemberTypeAllResponses::Ok(Json(results))
    }

    #[oai(
        path = "/member-type/detail/",
        method = "get",
        tag = "ApiMemberTypeTags::MemberType"
    )]
    async fn get_detail_member_type_api(
        &self,
        Query(id): Query<i32>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberTypeDetailResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberTypeDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "get_detail_member_type_api",
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
                return MemberTypeDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "get_detail_member_type_api",
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
                return MemberTypeDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "get_detail_member_type_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if user.is_none() {
            return MemberTypeDetailResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let member_type = match get_member_type_by_id(&mut tx, id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberTypeDetailResponses::NotFound(Json(NotFoundResponse {
                    message: format!("member type with id = {} not found", id),
                }))
            }
            Err(err) => {
                return MemberTypeDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "get_detail_member_type_api",
                        "get_member_type_by_id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        match member_type_detail(&mut tx, member_type).await {
            Ok(val) => MemberTypeDetailResponses::Ok(Json(val)),
            Err(err) => MemberTypeDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member_type",
                    "get_detail_member_type_api",
                    "member_type_detail",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(
        path = "/member-type/",
        method = "post",
        tag = "ApiMemberTypeTags::MemberType"
    )]
    async fn create_member_type_api(
        &self,
        Json(json): Json<MemberTypeRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberTypeCreateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberTypeCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "create_member_type_api",
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
                return MemberTypeCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "create_member_type_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let request_user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberTypeCreateResponses::Unauthorized(Json(
                    UnauthorizedResponse::default(),
                ))
            }
            Err(err) => {
                return MemberTypeCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "create_member_type_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let new_member_type = match create_member_type(
            &mut tx,
            json.type_name,
            json.description,
            Some(&request_user),
            None,
        )
        .await
        {
            Ok(val) => val,
            Err(err) => {
                if let Some(entity_err) = err.downcast_ref::<EntityError>() {
                    return MemberTypeCreateResponses::BadRequest(Json(BadRequestResponse {
                        message: entity_err.to_string(),
                    }));
                }
                return MemberTypeCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "create_member_type_api",
                        "create_member_type",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let detail = match member_type_detail(&mut tx, new_member_type).await {
            Ok(val) => val,
            Err(err) => {
                return MemberTypeCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "create_member_type_api",
                        "member_type_detail",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Err(err) = tx.commit().await {
            return MemberTypeCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member_type",
                    "create_member_type_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        MemberTypeCreateResponses::Ok(Json(detail))
    }

    #[oai(
        path = "/member-type/",
        method = "put",
        tag = "ApiMemberTypeTags::MemberType"
    )]
    async fn update_member_type_api(
        &self,
        Query(id): Query<i32>,
        Json(json): Json<MemberTypeRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberTypeUpdateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberTypeUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "update_member_type_api",
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
                return MemberTypeUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "update_member_type_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let request_user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberTypeUpdateResponses::Unauthorized(Json(
                    UnauthorizedResponse::default(),
                ))
            }
            Err(err) => {
                return MemberTypeUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "update_member_type_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut member_type = match get_member_type_by_id(&mut tx, id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberTypeUpdateResponses::NotFound(Json(NotFoundResponse {
                    message: format!("member type with id = {} not found", id),
                }))
            }
            Err(err) => {
                return MemberTypeUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "update_member_type_api",
                        "get_member_type_by_id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        if let Err(err) = update_member_type(
            &mut tx,
            &mut member_type,
            json.type_name,
            json.description,
            &request_user,
            None,
        )
        .await
        {
            if let Some(entity_err) = err.downcast_ref::<EntityError>() {
                return MemberTypeUpdateResponses::BadRequest(Json(BadRequestResponse {
                    message: entity_err.to_string(),
                }));
            }
            return MemberTypeUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member_type",
                    "update_member_type_api",
                    "update_member_type",
                    &err.to_string(),
                ),
            ));
        }

        let detail = match member_type_detail(&mut tx, member_type).await {
            Ok(val) => val,
            Err(err) => {
                return MemberTypeUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "update_member_type_api",
                        "member_type_detail",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Err(err) = tx.commit().await {
            return MemberTypeUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member_type",
                    "update_member_type_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        MemberTypeUpdateResponses::Ok(Json(detail))
    }

    #[oai(
        path = "/member-type/",
        method = "delete",
        tag = "ApiMemberTypeTags::MemberType"
    )]
    async fn delete_member_type_api(
        &self,
        Query(id): Query<i32>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberTypeDeleteResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberTypeDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "delete_member_type_api",
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
                return MemberTypeDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "delete_member_type_api",
                        "get redis pool connection",
                        &err.to_string(),
                    ),
                ))
            }
        };

        // Validate session token
        let token = auth.0.token;
        let request_user = match get_user_from_token(&mut tx, &mut *redis_conn, token).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberTypeDeleteResponses::Unauthorized(Json(
                    UnauthorizedResponse::default(),
                ))
            }
            Err(err) => {
                return MemberTypeDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "delete_member_type_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut member_type = match get_member_type_by_id(&mut tx, id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberTypeDeleteResponses::NotFound(Json(NotFoundResponse {
                    message: format!("member type with id = {} not found", id),
                }))
            }
            Err(err) => {
                return MemberTypeDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member_type",
                        "delete_member_type_api",
                        "get_member_type_by_id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        if let Err(err) =
            soft_delete_member_type(&mut tx, &mut member_type, &request_user, None).await
        {
            return MemberTypeDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member_type",
                    "delete_member_type_api",
                    "soft_delete_member_type",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return MemberTypeDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member_type",
                    "delete_member_type_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        MemberTypeDeleteResponses::NoContent
    }
}
