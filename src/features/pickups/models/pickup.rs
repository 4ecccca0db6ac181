use chrono::NaiveDateTime;

/// A single ride pickup
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub date_time: NaiveDateTime,
    pub lat: f64,
    pub lon: f64,
    pub base: Option<String>,
}

/// Rows loaded from a pickup CSV file
#[derive(Debug, Clone, Default)]
pub struct PickupDataset {
    /// Header names, lowercased
    pub columns: Vec<String>,
    pub rows: Vec<Pickup>,
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("pickup dataset is not configured")]
    NotConfigured,

    #[error("Failed to read pickup dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pickup dataset is missing column '{0}'")]
    MissingColumn(String),

    #[error("Invalid pickup row at line {line}: {message}")]
    Parse { line: usize, message: String },
}
