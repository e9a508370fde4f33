use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::layout::{
    document::Document,
    mutation::{Mutation, Target},
    nav::NavItem,
};

use super::common::{InternalServerErrorResponse, UnauthorizedResponse};

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct ClassMutation {
    /// `add_class`, `remove_class`, `trigger_resize` or `set_theme_switch`.
    pub action: String,
    pub target: Option<String>,
    pub class: Option<String>,
    pub checked: Option<bool>,
}

impl From<&Mutation> for ClassMutation {
    fn from(value: &Mutation) -> Self {
        match value {
            Mutation::AddClass { target, class } => Self {
                action: "add_class".to_string(),
                target: Some(target.to_string()),
                class: Some(class.clone()),
                checked: None,
            },
            Mutation::RemoveClass { target, class } => Self {
                action: "remove_class".to_string(),
                target: Some(target.to_string()),
                class: Some(class.clone()),
                checked: None,
            },
            Mutation::TriggerResize => Self {
                action: "trigger_resize".to_string(),
                target: None,
                class: None,
                checked: None,
            },
            Mutation::SetThemeSwitch { checked } => Self {
                action: "set_theme_switch".to_string(),
                target: None,
                class: None,
                checked: Some(*checked),
            },
        }
    }
}

pub fn class_mutations(mutations: &[Mutation]) -> Vec<ClassMutation> {
    mutations.iter().map(ClassMutation::from).collect()
}

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct MenuItem {
    pub name: String,
    pub href: Option<String>,
    pub icon: Option<String>,
    pub active: bool,
    pub open: bool,
    pub children: Vec<MenuItem>,
}

impl From<NavItem> for MenuItem {
    fn from(value: NavItem) -> Self {
        Self {
            name: value.name,
            href: value.href,
            icon: value.icon,
            active: value.active,
            open: value.open,
            children: value.children.into_iter().map(MenuItem::from).collect(),
        }
    }
}

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct ElementClasses {
    pub body: Vec<String>,
    pub main_header: Vec<String>,
    pub main_sidebar: Vec<String>,
    pub nav_sidebar: Vec<String>,
    pub brand_link: Vec<String>,
    pub main_footer: Vec<String>,
}

impl From<&Document> for ElementClasses {
    fn from(value: &Document) -> Self {
        Self {
            body: value.classes(Target::Body).to_vec(),
            main_header: value.classes(Target::MainHeader).to_vec(),
            main_sidebar: value.classes(Target::MainSidebar).to_vec(),
            nav_sidebar: value.classes(Target::NavSidebar).to_vec(),
            brand_link: value.classes(Target::BrandLink).to_vec(),
            main_footer: value.classes(Target::MainFooter).to_vec(),
        }
    }
}

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct PageLayoutResponse {
    pub classes: ElementClasses,
    pub theme_switch_checked: bool,
    pub resize_events: u32,
    pub menu: Vec<MenuItem>,
}

#[derive(ApiResponse)]
pub enum PageLayoutResponses {
    #[oai(status = 200)]
    Ok(Json<PageLayoutResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum LayoutSettingsResponses {
    #[oai(status = 200)]
    Ok(Json<Vec<ClassMutation>>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct ThemeResponse {
    /// `dark`, `light`, or absent when no preference is stored.
    pub theme: Option<String>,
}

#[derive(ApiResponse)]
pub enum ThemeGetResponses {
    #[oai(status = 200)]
    Ok(Json<ThemeResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Deserialize, Serialize)]
pub struct ThemeToggleRequest {
    pub checked: bool,
}

#[derive(Object, Deserialize, Serialize, Debug, PartialEq)]
pub struct ThemeToggleResponse {
    pub theme: String,
    pub mutations: Vec<ClassMutation>,
}

#[derive(ApiResponse)]
pub enum ThemeToggleResponses {
    #[oai(status = 200)]
    Ok(Json<ThemeToggleResponse>),

    #[oai(status = 401)]
    Unauthorized(Json<UnauthorizedResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}
