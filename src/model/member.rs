use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use sqlx::FromRow;

use crate::core::{
    entity::{Entity, FieldDef, FieldType, RelationDef},
    sqlx_utils::SqlxBinds,
};

use super::{member_type::TABLE_NAME as MEMBER_TYPE_TABLE_NAME, user::TABLE_NAME as USER_TABLE_NAME};

pub const TABLE_NAME: &str = "public.members";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Member {
    pub id: i32,
    pub member_type: i32,
    pub member_no: String,
    pub member_date: NaiveDate,
    pub full_name: String,
    pub father_husband_name: Option<String>,
    pub mother_name: Option<String>,
    pub member_email: Option<String>,
    /// Stored path of the uploaded photo.
    pub member_photo: Option<String>,
    /// Stored path of the uploaded signature.
    pub member_sign: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub updated_by: Option<i32>,
    pub updated_at: Option<DateTime<FixedOffset>>,
    pub deleted_at: Option<DateTime<FixedOffset>>,
}

impl Entity for Member {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("member_type", FieldType::Int),
        FieldDef::required("member_no", FieldType::Text),
        FieldDef::required("member_date", FieldType::Date),
        FieldDef::required("full_name", FieldType::Text),
        FieldDef::optional("father_husband_name", FieldType::Text),
        FieldDef::optional("mother_name", FieldType::Text),
        FieldDef::optional("member_email", FieldType::Text),
        FieldDef::optional("member_photo", FieldType::Text),
        FieldDef::optional("member_sign", FieldType::Text),
        FieldDef::optional("created_by", FieldType::Int),
        FieldDef::optional("created_at", FieldType::DateTime),
        FieldDef::optional("updated_by", FieldType::Int),
        FieldDef::optional("updated_at", FieldType::DateTime),
        FieldDef::optional("deleted_at", FieldType::DateTime),
    ];
    const RELATIONS: &'static [RelationDef] = &[
        RelationDef::has_one("created_by", USER_TABLE_NAME),
        RelationDef::has_one("updated_by", USER_TABLE_NAME),
        RelationDef::has_one_via("memberType", MEMBER_TYPE_TABLE_NAME, "member_type"),
    ];
    const TIMESTAMPS: &'static [&'static str] = &["created_at", "updated_at", "deleted_at"];
    const USERS: &'static [&'static str] = &["created_by", "updated_by"];

    fn primary_key(&self) -> i32 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<SqlxBinds> {
        match field {
            "member_type" => Some(SqlxBinds::Int(self.member_type)),
            "member_no" => Some(SqlxBinds::String(self.member_no.clone())),
            "member_date" => Some(SqlxBinds::Date(self.member_date)),
            "full_name" => Some(SqlxBinds::String(self.full_name.clone())),
            "father_husband_name" => Some(SqlxBinds::OptionString(self.father_husband_name.clone())),
            "mother_name" => Some(SqlxBinds::OptionString(self.mother_name.clone())),
            "member_email" => Some(SqlxBinds::OptionString(self.member_email.clone())),
            "member_photo" => Some(SqlxBinds::OptionString(self.member_photo.clone())),
            "member_sign" => Some(SqlxBinds::OptionString(self.member_sign.clone())),
            "created_by" => Some(SqlxBinds::OptionInt(self.created_by)),
            "created_at" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.created_at)),
            "updated_by" => Some(SqlxBinds::OptionInt(self.updated_by)),
            "updated_at" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.updated_at)),
            "deleted_at" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.deleted_at)),
            _ => None,
        }
    }
}
