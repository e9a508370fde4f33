use poem_openapi::{
    types::{ParseFromJSON, ToJSON},
    Object,
};
use serde::{Deserialize, Serialize};

#[derive(Object, Deserialize, Serialize)]
pub struct BadRequestResponse {
    pub message: String,
}

#[derive(Object, Deserialize, Serialize)]
pub struct UnauthorizedResponse {
    pub message: String,
}

impl Default for UnauthorizedResponse {
    fn default() -> Self {
        Self {
            message: "invalid or expired session".to_string(),
        }
    }
}

#[derive(Object, Deserialize, Serialize)]
pub struct NotFoundResponse {
    pub message: String,
}

#[derive(Object, Deserialize, Serialize)]
pub struct InternalServerErrorResponse {
    pub message: String,
}

impl InternalServerErrorResponse {
    /// Log the failed step and build the response body naming it.
    pub fn new(module: &str, function: &str, step: &str, err: &str) -> Self {
        tracing::error!("{}.{}: {}: {}", module, function, step, err);
        Self {
            message: format!("{}.{}: {} failed: {}", module, function, step, err),
        }
    }
}

#[derive(Object, Deserialize, Serialize)]
pub struct PaginateResponse<T: ParseFromJSON + ToJSON> {
    pub counts: u32,
    pub page: u32,
    pub page_count: u32,
    pub page_size: u32,
    pub results: Vec<T>,
}

/// Id and name of the user behind an audit column or an assignment.
#[derive(Object, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct RelatedUser {
    pub id: i32,
    pub user_name: String,
}

impl From<crate::model::user::User> for RelatedUser {
    fn from(value: crate::model::user::User) -> Self {
        Self {
            id: value.id,
            user_name: value.user_name,
        }
    }
}
