use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{param::Query, payload::Json, OpenApi, Tags};
use sqlx::{Postgres, Transaction};

use crate::{
    core::{
        entity::EntityError,
        security::{get_user_from_token, BearerAuthorization},
        utils::{date_to_string, datetime_to_string_opt, parse_date},
    },
    model::{member::Member, member_type::MemberType, user::User},
    repository::{
        entity::fetch_has_one,
        member::{
            create_member, get_member_by_id, paginate_member, soft_delete_member, update_member,
            MemberInput,
        },
        member_type::get_member_type_by_id,
    },
    schema::{
        common::{
            BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, PaginateResponse,
            RelatedUser, UnauthorizedResponse,
        },
        member::{
            DetailMember, MemberCreateResponses, MemberDeleteResponses, MemberDetailResponses,
            MemberRequest, MemberTypeSummary, MemberUpdateResponses, PaginateMemberResponses,
        },
    },
    AppState,
};

#[derive(Tags)]
enum ApiMemberTags {
    Member,
}

/// Resolve the relations a member response shows.
async fn member_detail(
    tx: &mut Transaction<'_, Postgres>,
    member: Member,
) -> anyhow::Result<DetailMember> {
    let member_type = fetch_has_one::<Member, MemberType>(tx, &member, "memberType").await?;
    let created_by = fetch_has_one::<Member, User>(tx, &member, "created_by").await?;
    let updated_by = fetch_has_one::<Member, User>(tx, &member, "updated_by").await?;
    Ok(DetailMember {
        id: member.id,
        member_type: member_type.map(|x| MemberTypeSummary {
            id: x.id,
            type_name: x.type_name,
        }),
        member_no: member.member_no,
        member_date: date_to_string(member.member_date),
        full_name: member.full_name,
        father_husband_name: member.father_husband_name,
        mother_name: member.mother_name,
        member_email: member.member_email,
        member_photo: member.member_photo,
        member_sign: member.member_sign,
        created_by: created_by.map(RelatedUser::from),
        updated_by: updated_by.map(RelatedUser::from),
        created_at: datetime_to_string_opt(member.created_at),
        updated_at: datetime_to_string_opt(member.updated_at),
    })
}

enum InputError {
    BadRequest(String),
    Internal(anyhow::Error),
}

/// Check the request against what the database would reject.
async fn member_input(
    tx: &mut Transaction<'_, Postgres>,
    json: MemberRequest,
) -> Result<MemberInput, InputError> {
    let Some(member_date) = parse_date(&json.member_date) else {
        return Err(InputError::BadRequest(format!(
            "invalid member_date {:?}, expected YYYY-MM-DD",
            json.member_date
        )));
    };
    match get_member_type_by_id(tx, json.member_type).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(InputError::BadRequest(format!(
                "member type with id = {} not found",
                json.member_type
            )))
        }
        Err(err) => return Err(InputError::Internal(err)),
    }
    Ok(MemberInput {
        member_type: json.member_type,
        member_no: json.member_no,
        member_date,
        full_name: json.full_name,
        father_husband_name: json.father_husband_name,
        mother_name: json.mother_name,
        member_email: json.member_email,
        member_photo: json.member_photo,
        member_sign: json.member_sign,
    })
}

pub struct ApiMember;

#[OpenApi]
impl ApiMember {
    #[oai(path = "/member/", method = "get", tag = "ApiMemberTags::Member")]
    async fn paginate_member_api(
        &self,
        Query(page): Query<Option<u32>>,
        Query(page_size): Query<Option<u32>>,
        Query(search): Query<Option<String>>,
        Query(member_type): Query<Option<i32>>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> PaginateMemberResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return PaginateMemberResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "paginate_member_api",
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
                return PaginateMemberResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "paginate_member_api",
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
                return PaginateMemberResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "paginate_member_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if user.is_none() {
            return PaginateMemberResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let page = page.unwrap_or(1).max(1);
        let page_size = page_size.unwrap_or(10).max(1);
        let (data, counts, page_count) =
            match paginate_member(&mut tx, page, page_size, search, member_type).await {
                Ok(val) => val,
                Err(err) => {
                    return PaginateMemberResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.member",
                            "paginate_member_api",
                            "paginate_member",
                            &err.to_string(),
                        ),
                    ))
                }
            };

        let mut results: Vec<DetailMember> = vec![];
        for item in data {
            match member_detail(&mut tx, item).await {
                Ok(val) => results.push(val),
                Err(err) => {
                    return PaginateMemberResponses::InternalServerError(Json(
                        InternalServerErrorResponse::new(
                            "route.member",
                            "paginate_member_api",
                            "member_detail",
                            &err.to_string(),
                        ),
                    ))
                }
            }
        }

        PaginateMemberResponses::Ok(Json(PaginateResponse {
            counts,
            page,
            page_count,
            page_size,
            results,
        }))
    }

    #[oai(path = "/member/detail/", method = "get", tag = "ApiMemberTags::Member")]
    async fn get_detail_member_api(
        &self,
        Query(id): Query<i32>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberDetailResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "get_detail_member_api",
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
                return MemberDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "get_detail_member_api",
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
                return MemberDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "get_detail_member_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if user.is_none() {
            return MemberDetailResponses::Unauthorized(Json(UnauthorizedResponse::default()));
        }

        let member = match get_member_by_id(&mut tx, id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberDetailResponses::NotFound(Json(NotFoundResponse {
                    message: format!("member with id = {} not found", id),
                }))
            }
            Err(err) => {
                return MemberDetailResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "get_detail_member_api",
                        "get_member_by_id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        match member_detail(&mut tx, member).await {
            Ok(val) => MemberDetailResponses::Ok(Json(val)),
            Err(err) => MemberDetailResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member",
                    "get_detail_member_api",
                    "member_detail",
                    &err.to_string(),
                ),
            )),
        }
    }

    #[oai(path = "/member/", method = "post", tag = "ApiMemberTags::Member")]
    async fn create_member_api(
        &self,
        Json(json): Json<MemberRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberCreateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "create_member_api",
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
                return MemberCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "create_member_api",
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
                return MemberCreateResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return MemberCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "create_member_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let input = match member_input(&mut tx, json).await {
            Ok(val) => val,
            Err(InputError::BadRequest(message)) => {
                return MemberCreateResponses::BadRequest(Json(BadRequestResponse { message }))
            }
            Err(InputError::Internal(err)) => {
                return MemberCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "create_member_api",
                        "member_input",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let new_member = match create_member(&mut tx, input, &request_user, None).await {
            Ok(val) => val,
            Err(err) => {
                if let Some(entity_err) = err.downcast_ref::<EntityError>() {
                    return MemberCreateResponses::BadRequest(Json(BadRequestResponse {
                        message: entity_err.to_string(),
                    }));
                }
                return MemberCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "create_member_api",
                        "create_member",
                        &err.to_string(),
                    ),
                ));
            }
        };

        let detail = match member_detail(&mut tx, new_member).await {
            Ok(val) => val,
            Err(err) => {
                return MemberCreateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "create_member_api",
                        "member_detail",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Err(err) = tx.commit().await {
            return MemberCreateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member",
                    "create_member_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        MemberCreateResponses::Ok(Json(detail))
    }

    #[oai(path = "/member/", method = "put", tag = "ApiMemberTags::Member")]
    async fn update_member_api(
        &self,
        Query(id): Query<i32>,
        Json(json): Json<MemberRequest>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberUpdateResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "update_member_api",
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
                return MemberUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "update_member_api",
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
                return MemberUpdateResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return MemberUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "update_member_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut member = match get_member_by_id(&mut tx, id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberUpdateResponses::NotFound(Json(NotFoundResponse {
                    message: format!("member with id = {} not found", id),
                }))
            }
            Err(err) => {
                return MemberUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "update_member_api",
                        "get_member_by_id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let input = match member_input(&mut tx, json).await {
            Ok(val) => val,
            Err(InputError::BadRequest(message)) => {
                return MemberUpdateResponses::BadRequest(Json(BadRequestResponse { message }))
            }
            Err(InputError::Internal(err)) => {
                return MemberUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "update_member_api",
                        "member_input",
                        &err.to_string(),
                    ),
                ))
            }
        };

        if let Err(err) = update_member(&mut tx, &mut member, input, &request_user, None).await {
            if let Some(entity_err) = err.downcast_ref::<EntityError>() {
                return MemberUpdateResponses::BadRequest(Json(BadRequestResponse {
                    message: entity_err.to_string(),
                }));
            }
            return MemberUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member",
                    "update_member_api",
                    "update_member",
                    &err.to_string(),
                ),
            ));
        }

        let detail = match member_detail(&mut tx, member).await {
            Ok(val) => val,
            Err(err) => {
                return MemberUpdateResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "update_member_api",
                        "member_detail",
                        &err.to_string(),
                    ),
                ))
            }
        };
        if let Err(err) = tx.commit().await {
            return MemberUpdateResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member",
                    "update_member_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        MemberUpdateResponses::Ok(Json(detail))
    }

    #[oai(path = "/member/", method = "delete", tag = "ApiMemberTags::Member")]
    async fn delete_member_api(
        &self,
        Query(id): Query<i32>,
        state: Data<&Arc<AppState>>,
        auth: BearerAuthorization,
    ) -> MemberDeleteResponses {
        // Begin db transaction
        let mut tx = match state.db.begin().await {
            Ok(val) => val,
            Err(err) => {
                return MemberDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "delete_member_api",
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
                return MemberDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "delete_member_api",
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
                return MemberDeleteResponses::Unauthorized(Json(UnauthorizedResponse::default()))
            }
            Err(err) => {
                return MemberDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "delete_member_api",
                        "get user from token",
                        &err.to_string(),
                    ),
                ))
            }
        };

        let mut member = match get_member_by_id(&mut tx, id).await {
            Ok(Some(val)) => val,
            Ok(None) => {
                return MemberDeleteResponses::NotFound(Json(NotFoundResponse {
                    message: format!("member with id = {} not found", id),
                }))
            }
            Err(err) => {
                return MemberDeleteResponses::InternalServerError(Json(
                    InternalServerErrorResponse::new(
                        "route.member",
                        "delete_member_api",
                        "get_member_by_id",
                        &err.to_string(),
                    ),
                ))
            }
        };

        if let Err(err) = soft_delete_member(&mut tx, &mut member, &request_user, None).await {
            return MemberDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member",
                    "delete_member_api",
                    "soft_delete_member",
                    &err.to_string(),
                ),
            ));
        }
        if let Err(err) = tx.commit().await {
            return MemberDeleteResponses::InternalServerError(Json(
                InternalServerErrorResponse::new(
                    "route.member",
                    "delete_member_api",
                    "commit transaction",
                    &err.to_string(),
                ),
            ));
        }
        MemberDeleteResponses::NoContent
    }
}
