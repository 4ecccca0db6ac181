mod pickup;

pub use pickup::{DatasetError, Pickup, PickupDataset};
