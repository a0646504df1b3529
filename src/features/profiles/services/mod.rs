mod profile_service;
mod profile_store;

pub use profile_service::ProfileService;
pub use profile_store::ProfileStore;
