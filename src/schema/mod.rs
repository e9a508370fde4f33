pub mod assigned_user;
pub mod common;
pub mod layout;
pub mod member;
pub mod member_type;
