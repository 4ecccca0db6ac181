#[cfg(test)]
use axum::Router;
#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
pub fn test_server(router: Router) -> TestServer {
    TestServer::new(router).expect("failed to start test server")
}

/// Start a session through the API and return its id
#[cfg(test)]
pub async fn create_session(server: &TestServer) -> Uuid {
    let body: serde_json::Value = server.post("/api/sessions").await.json();
    body["data"]["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("session id in response")
}
