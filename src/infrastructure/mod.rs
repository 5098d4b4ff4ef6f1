pub mod clock;
pub mod document_store;
