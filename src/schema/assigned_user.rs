use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, RelatedUser,
    UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct DetailAssignedUser {
    pub id: i32,
    pub user: Option<RelatedUser>,
    pub assignuser: Option<RelatedUser>,
}

#[derive(ApiResponse)]
pub enum AssignedUserListResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<DetailAssignedUser>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize, Serialize)]
pub struct AssignedUserCreateRequest {
    pub user_id: i32,
    pub assignuser_id: i32,
}

#[derive(ApiResponse)]
pub enum AssignedUserCreateResponses {
    #[oai(status = 201)]
    Ok(Json<DetailAssignedUser>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum AssignedUserDeleteResponses {
    #[oai(status = 204)]
    NoContent,

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
