pub mod assigned_user;
pub mod layout;
pub mod member;
#[cfg(test)]
mod member_test;
pub mod member_type;
#[cfg(test)]
mod member_type_test;
