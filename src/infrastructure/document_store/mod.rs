pub mod memory;
pub mod repositories;
pub mod store;
