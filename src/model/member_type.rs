use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::FromRow;

use crate::core::{
    entity::{Entity, FieldDef, FieldType, RelationDef},
    sqlx_utils::SqlxBinds,
};

use super::user::TABLE_NAME as USER_TABLE_NAME;

pub const TABLE_NAME: &str = "public.member_types";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct MemberType {
    pub id: i32,
    pub type_name: String,
    pub description: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTime<FixedOffset>>,
    pub deleted_at: Option<DateTime<FixedOffset>>,
}

impl Entity for MemberType {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("type_name", FieldType::Text),
        FieldDef::optional("description", FieldType::Text),
        FieldDef::optional("created_by", FieldType::Int),
        FieldDef::optional("created_at", FieldType::DateTime),
        FieldDef::optional("updated_by", FieldType::Int),
        FieldDef::optional("updated_at", FieldType::DateTime),
        FieldDef::optional("deleted_at", FieldType::DateTime),
    ];
    const RELATIONS: &'static [RelationDef] = &[
        RelationDef::has_one("created_by", USER_TABLE_NAME),
        RelationDef::has_one("updated_by", USER_TABLE_NAME),
    ];
    const TIMESTAMPS: &'static [&'static str] = &["created_at", "updated_at", "deleted_at"];
    const USERS: &'static [&'static str] = &["created_by", "updated_by"];

    fn primary_key(&self) -> i32 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<SqlxBinds> {
        match field {
            "type_name" => Some(SqlxBinds::String(self.type_name.clone())),
            "description" => Some(SqlxBinds::OptionString(self.description.clone())),
            "created_by" => Some(SqlxBinds::OptionInt(self.created_by)),
            "created_at" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.created_at)),
            "updated_by" => Some(SqlxBinds::OptionInt(self.updated_by)),
            "updated_at" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.updated_at)),
            "deleted_at" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.deleted_at)),
            _ => None,
        }
    }
}
