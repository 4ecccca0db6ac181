mod pickup_handler;

pub use pickup_handler::*;
