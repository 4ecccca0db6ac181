mod dataset_cache;
mod dataset_loader;
mod pickup_service;

pub use pickup_service::PickupService;
