pub mod dashboard;
pub mod pickups;
pub mod reports;
pub mod sessions;
