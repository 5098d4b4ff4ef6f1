pub mod renewal;
pub mod usecases;
