//! Value Object Module

pub mod display_name;
pub mod email;
pub mod login_id;
pub mod password;
pub mod phone;
pub mod role;
pub mod token;
pub mod user_id;
