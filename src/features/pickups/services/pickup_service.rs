use chrono::Timelike;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::pickups::models::{DatasetError, Pickup, PickupDataset};
use crate::features::pickups::services::dataset_cache::LoadCache;
use crate::features::pickups::services::dataset_loader::load_dataset;

/// Count pickups per hour of day. Bin `h` holds rows whose hour is `h`.
pub fn histogram_by_hour(dataset: &PickupDataset) -> [u64; 24] {
    let mut bins = [0u64; 24];
    for pickup in &dataset.rows {
        bins[pickup.date_time.hour() as usize] += 1;
    }
    bins
}

/// Pickups whose hour of day equals `hour`
pub fn filter_by_hour(dataset: &PickupDataset, hour: u32) -> Vec<Pickup> {
    dataset
        .rows
        .iter()
        .filter(|p| p.date_time.hour() == hour)
        .cloned()
        .collect()
}

/// Service for the ride pickup dataset.
///
/// Datasets are loaded once per row count and reused until invalidated.
pub struct PickupService {
    data_path: Option<PathBuf>,
    cache: LoadCache<usize, PickupDataset>,
}

impl PickupService {
    pub fn new(data_path: Option<PathBuf>) -> Self {
        Self {
            data_path,
            cache: LoadCache::new(),
        }
    }

    /// First `nrows` rows of the dataset, from cache when possible
    pub async fn dataset(&self, nrows: usize) -> Result<Arc<PickupDataset>> {
        let path = self.data_path.clone().ok_or(DatasetError::NotConfigured)?;

        self.cache
            .get_or_load(nrows, || async move {
                tracing::debug!("Pickup cache miss: nrows={}", nrows);
                tokio::task::spawn_blocking(move || load_dataset(&path, nrows))
                    .await
                    .map_err(|e| AppError::Internal(format!("Dataset load task failed: {}", e)))?
                    .map_err(AppError::from)
            })
            .await
    }

    pub async fn histogram(&self, nrows: usize) -> Result<(usize, [u64; 24])> {
        let dataset = self.dataset(nrows).await?;
        Ok((dataset.rows.len(), histogram_by_hour(&dataset)))
    }

    pub async fn filter(&self, nrows: usize, hour: u32) -> Result<Vec<Pickup>> {
        if hour > 23 {
            return Err(AppError::Validation(format!(
                "hour must be between 0 and 23, got {}",
                hour
            )));
        }

        let dataset = self.dataset(nrows).await?;
        Ok(filter_by_hour(&dataset, hour))
    }

    /// Drop the cached dataset for `nrows`, or every cached dataset when `None`.
    /// Returns how many entries were removed.
    pub async fn invalidate(&self, nrows: Option<usize>) -> usize {
        let removed = match nrows {
            Some(n) => usize::from(self.cache.invalidate(n).await),
            None => self.cache.clear().await,
        };

        tracing::info!("Pickup cache invalidated: nrows={:?}, removed={}", nrows, removed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn pickup_at(hour: u32) -> Pickup {
        Pickup {
            date_time: NaiveDate::from_ymd_opt(2014, 9, 1)
                .unwrap()
                .and_hms_opt(hour, 30, 0)
                .unwrap(),
            lat: 40.7,
            lon: -74.0,
            base: None,
        }
    }

    fn dataset(hours: &[u32]) -> PickupDataset {
        PickupDataset {
            columns: vec!["date/time".into(), "lat".into(), "lon".into()],
            rows: hours.iter().map(|&h| pickup_at(h)).collect(),
        }
    }

    #[test]
    fn test_histogram_bins_by_hour() {
        let data = dataset(&[0, 0, 17, 17, 17, 23]);
        let bins = histogram_by_hour(&data);

        assert_eq!(bins[0], 2);
        assert_eq!(bins[17], 3);
        assert_eq!(bins[23], 1);
        assert_eq!(bins.iter().sum::<u64>(), data.rows.len() as u64);
    }

    #[test]
    fn test_filter_keeps_only_requested_hour() {
        let data = dataset(&[5, 17, 18, 17]);
        let filtered = filter_by_hour(&data, 17);

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.date_time.hour() == 17));
        assert!(filter_by_hour(&data, 3).is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_dataset_is_not_found() {
        let service = PickupService::new(None);
        let err = service.histogram(10).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_filter_rejects_out_of_range_hour() {
        let service = PickupService::new(None);
        let err = service.filter(10, 24).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_dataset_is_cached_per_row_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date/Time,Lat,Lon,Base").unwrap();
        writeln!(file, "9/1/2014 17:01:00,40.1,-74.1,B1").unwrap();
        writeln!(file, "9/1/2014 18:02:00,40.2,-74.2,B1").unwrap();
        file.flush().unwrap();

        let service = PickupService::new(Some(file.path().to_path_buf()));
        let first = service.dataset(10).await.unwrap();
        let again = service.dataset(10).await.unwrap();
        let smaller = service.dataset(1).await.unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.rows.len(), 2);
        assert_eq!(smaller.rows.len(), 1);

        assert_eq!(service.invalidate(Some(10)).await, 1);
        let reloaded = service.dataset(10).await.unwrap();
        assert!(!Arc::ptr_eq(&first, &reloaded));

        assert_eq!(service.invalidate(None).await, 2);
    }
}
