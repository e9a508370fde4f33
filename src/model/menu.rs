use serde::Deserialize;
use sqlx::FromRow;

use crate::core::{
    entity::{Entity, FieldDef, FieldType, RelationDef},
    sqlx_utils::SqlxBinds,
};

pub const TABLE_NAME: &str = "public.menu";

#[derive(Clone, Debug, Deserialize, FromRow)]
pub struct Menu {
    pub id: i32,
    pub name: String,
    pub url: Option<String>,
    /// Font Awesome icon name without the `fa-` prefix.
    pub icon: Option<String>,
    pub menu_order: i32,
    pub parent_id: Option<i32>,
}

impl Entity for Menu {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const FIELDS: &'static [FieldDef] = &[
        FieldDef::required("name", FieldType::Text),
        FieldDef::optional("url", FieldType::Text),
        FieldDef::optional("icon", FieldType::Text),
        FieldDef::required("menu_order", FieldType::Int),
        FieldDef::optional("parent_id", FieldType::Int),
    ];
    const RELATIONS: &'static [RelationDef] =
        &[RelationDef::has_one_via("parent", TABLE_NAME, "parent_id")];

    fn primary_key(&self) -> i32 {
        self.id
    }

    fn field_value(&self, field: &str) -> Option<SqlxBinds> {
        match field {
            "name" => Some(SqlxBinds::String(self.name.clone())),
            "url" => Some(SqlxBinds::OptionString(self.url.clone())),
            "icon" => Some(SqlxBinds::OptionString(self.icon.clone())),
            "menu_order" => Some(SqlxBinds::Int(self.menu_order)),
            "parent_id" => Some(SqlxBinds::OptionInt(self.parent_id)),
            _ => None,
        }
    }
}
