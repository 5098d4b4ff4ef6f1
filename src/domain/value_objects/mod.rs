pub mod client_views;
pub mod enums;
