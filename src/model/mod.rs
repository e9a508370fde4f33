pub mod assigned_user;
pub mod member;
pub mod member_type;
pub mod menu;
pub mod user;
