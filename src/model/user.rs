use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use sqlx::prelude::FromRow;

use crate::core::{
    entity::{Entity, FieldDef, FieldType},
    sqlx_utils::SqlxBinds,
};

pub const TABLE_NAME: &str = "public.user";

/// Account owned by the external auth service. Only the columns this service
/// reads or stamps into audit fields are mapped.
#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub user_name: String,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub created_date: Option<DateTime<FixedOffset>>,
    pub updated_date: Option<DateTime<FixedOffset>>,
    pub deleted_date: Option<DateTime<FixedOffset>>,
}

impl Entity for User {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("user_name", FieldType::Text),
        FieldDef::optional("email", FieldType::Text),
        FieldDef::optional("is_active", FieldType::Bool),
        FieldDef::optional("created_date", FieldType::DateTime),
        FieldDef::optional("updated_date", FieldType::DateTime),
        FieldDef::optional("deleted_date", FieldType::DateTime),
    ];

    fn primary_key(&self) -> i32 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<SqlxBinds> {
        match field {
            "user_name" => Some(SqlxBinds::String(self.user_name.clone())),
            "email" => Some(SqlxBinds::OptionString(self.email.clone())),
            "is_active" => Some(SqlxBinds::OptionBool(self.is_active)),
            "created_date" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.created_date)),
            "updated_date" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.updated_date)),
            "deleted_date" => Some(SqlxBinds::OptionDateTimeFixedOffset(self.deleted_date)),
            _ => None,
        }
    }
}
