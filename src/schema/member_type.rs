use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, RelatedUser,
    UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct DetailMemberType {
    pub id: i32,
    pub type_name: String,
    pub description: Option<String>,
    pub created_by: Option<RelatedUser>,
    pub updated_by: Option<RelatedUser>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(ApiResponse)]
pub enum MemberTypeAllResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<DetailMemberType>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum MemberTypeDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailMemberType>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize, Serialize)]
pub struct MemberTypeRequest {
    pub type_name: String,
    pub description: Option<String>,
}

#[derive(ApiResponse)]
pub enum MemberTypeCreateResponses {
    #[oai(status = 201)]
    Ok(Json<DetailMemberType>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum MemberTypeUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<DetailMemberType>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum MemberTypeDeleteResponses {
    #[oai(status = 204)]
    NoContent,

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
