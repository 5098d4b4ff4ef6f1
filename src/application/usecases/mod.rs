pub mod client_overview;
pub mod payment_recorder;
pub mod subscription_ledger;
