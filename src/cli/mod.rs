pub mod db;
pub mod member_type;
pub mod menu;
pub mod user;
