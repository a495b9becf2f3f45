pub mod store;
pub mod structure;
pub mod tenants;
