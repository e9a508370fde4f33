use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use super::common::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, PaginateResponse,
    RelatedUser, UnauthorizedResponse,
};

#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct MemberTypeSummary {
    pub id: i32,
    pub type_name: String,
}

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct DetailMember {
    pub id: i32,
    pub member_type: Option<MemberTypeSummary>,
    pub member_no: String,
    pub member_date: String,
    pub full_name: String,
    pub father_husband_name: Option<String>,
    pub mother_name: Option<String>,
    pub member_email: Option<String>,
    pub member_photo: Option<String>,
    pub member_sign: Option<String>,
    pub created_by: Option<RelatedUser>,
    pub updated_by: Option<RelatedUser>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(ApiResponse)]
pub enum PaginateMemberResponses {
    #[oai(status = 200)]
    Ok(Json<PaginateResponse<DetailMember>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum MemberDetailResponses {
    #[oai(status = 200)]
    Ok(Json<DetailMember>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

/// `member_date` is formatted `YYYY-MM-DD`.
#[derive(Object, Deserialize, Serialize)]
pub struct MemberRequest {
    pub member_type: i32,
    pub member_no: String,
    pub member_date: String,
    pub full_name: String,
    pub father_husband_name: Option<String>,
    pub mother_name: Option<String>,
    pub member_email: Option<String>,
    pub member_photo: Option<String>,
    pub member_sign: Option<String>,
}

#[derive(ApiResponse)]
pub enum MemberCreateResponses {
    #[oai(status = 201)]
    Ok(Json<DetailMember>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum MemberUpdateResponses {
    #[oai(status = 200)]
    Ok(Json<DetailMember>),

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
pub enum MemberDeleteResponses {
    #[oai(status = 204)]
    NoContent,

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 404)]
    NotFound(Json<NotFoundResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
