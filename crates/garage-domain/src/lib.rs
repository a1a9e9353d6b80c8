pub mod export;
pub mod invoice;
pub mod maintenance;
pub mod snapshot;
pub mod user;
pub mod vehicle;

pub use invoice::Invoice;
pub use maintenance::MaintenanceRecord;
pub use snapshot::{DomainSnapshot, COLLECTION_NAMES, SNAPSHOT_VERSION};
pub use user::User;
pub use vehicle::Vehicle;
