pub mod expiry_buckets;
pub mod genders;
pub mod payment_methods;
pub mod payment_statuses;
