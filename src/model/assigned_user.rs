use serde::Deserialize;
use sqlx::FromRow;

use crate::core::{
    entity::{Entity, FieldDef, FieldType, RelationDef},
    sqlx_utils::SqlxBinds,
};

use super::user::TABLE_NAME as USER_TABLE_NAME;

pub const TABLE_NAME: &str = "public.assignusers";

/// `assignuser_id` acts on behalf of `user_id`.
#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct AssignedUser {
    pub id: i32,
    pub user_id: i32,
    pub assignuser_id: i32,
}

impl Entity for AssignedUser {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("user_id", FieldType::Int),
        FieldDef::required("assignuser_id", FieldType::Int),
    ];
    const RELATIONS: &'static [RelationDef] = &[
        RelationDef::has_one("user_id", USER_TABLE_NAME),
        RelationDef::has_one("assignuser_id", USER_TABLE_NAME),
        RelationDef::has_one_via("user", USER_TABLE_NAME, "user_id"),
        RelationDef::has_one_via("assignuser", USER_TABLE_NAME, "assignuser_id"),
    ];

    fn primary_key(&self) -> i32 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<SqlxBinds> {
        match field {
            "user_id" => Some(SqlxBinds::Int(self.user_id)),
            "assignuser_id" => Some(SqlxBinds::Int(self.assignuser_id)),
            _ => None,
        }
    }
}
