use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::features::pickups::handlers;
use crate::features::pickups::services::PickupService;

/// Create routes for the pickups feature
pub fn routes(pickup_service: Arc<PickupService>) -> Router {
    Router::new()
        .route("/api/pickups", get(handlers::list_pickups))
        .route("/api/pickups/histogram", get(handlers::get_histogram))
        .route("/api/pickups/raw", get(handlers::get_raw))
        .route("/api/pickups/cache", delete(handlers::invalidate_cache))
        .with_state(pickup_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_server;
    use axum::http::StatusCode;
    use serde_json::Value;
    use std::io::Write;

    fn sample_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date/Time,Lat,Lon,Base").unwrap();
        for line in [
            "9/1/2014 0:01:00,40.2201,-74.0021,B02512",
            "9/1/2014 17:15:00,40.7500,-74.0027,B02512",
            "9/1/2014 17:40:00,40.7366,-73.9906,B02598",
            "9/2/2014 8:05:00,40.7271,-73.9803,B02598",
        ] {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_histogram_and_filter() {
        let file = sample_file();
        let service = Arc::new(PickupService::new(Some(file.path().to_path_buf())));
        let server = test_server(routes(service));

        let body: Value = server.get("/api/pickups/histogram").await.json();
        let bins = body["data"]["bins"].as_array().unwrap();
        assert_eq!(bins.len(), 24);
        assert_eq!(bins[17], 2);
        assert_eq!(bins[0], 1);
        assert_eq!(body["data"]["rows"], 4);

        // Default hour is 17
        let body: Value = server.get("/api/pickups").await.json();
        assert_eq!(body["data"]["hour"], 17);
        assert_eq!(body["meta"]["total"], 2);
        assert_eq!(body["data"]["pickups"][0]["date_time"], "2014-09-01 17:15:00");

        let body: Value = server.get("/api/pickups?hour=8&nrows=3").await.json();
        assert_eq!(body["meta"]["total"], 0);

        server
            .get("/api/pickups?hour=24")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/pickups/histogram?nrows=0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let body: Value = server.delete("/api/pickups/cache").await.json();
        assert_eq!(body["data"]["removed"], 2);
    }

    #[tokio::test]
    async fn test_raw_view_returns_columns_and_all_rows() {
        let file = sample_file();
        let service = Arc::new(PickupService::new(Some(file.path().to_path_buf())));
        let server = test_server(routes(service));

        let body: Value = server.get("/api/pickups/raw").await.json();
        assert_eq!(
            body["data"]["columns"],
            serde_json::json!(["date/time", "lat", "lon", "base"])
        );
        assert_eq!(body["meta"]["total"], 4);

        let rows = body["data"]["rows"].as_array().unwrap();
        assert_eq!(rows[0]["date_time"], "2014-09-01 00:01:00");
        assert_eq!(rows[3]["lat"], 40.7271);
        assert_eq!(rows[3]["base"], "B02598");

        let body: Value = server.get("/api/pickups/raw?nrows=2").await.json();
        assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 2);

        server
            .get("/api/pickups/raw?nrows=0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_dataset_is_not_found() {
        let server = test_server(routes(Arc::new(PickupService::new(None))));
        server
            .get("/api/pickups/histogram")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
