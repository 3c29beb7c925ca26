//! Common test utilities for E2E tests

use chirp::{AppState, config};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server instance
    pub async fn new() -> Self {
        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Create test configuration
        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            database: config::DatabaseConfig { path: db_path },
            auth: config::AuthConfig {
                token_secret: "test-secret-key-32-bytes-long!!!".to_string(),
                token_max_age: 86400,
            },
            pagination: config::PaginationConfig {
                home_page_size: 15,
                author_page_size: 5,
                search_page_size: 10,
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        let state = AppState::new(config).await.unwrap();
        let app = chirp::build_router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: format!("http://{}", addr),
            state,
            _temp_dir: temp_dir,
            client: reqwest::Client::new(),
        }
    }

    /// Build a full URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Register an account and return its bearer token
    pub async fn register_and_login(&self, handle: &str) -> String {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({
                "handle": handle,
                "email": format!("{}@example.com", handle),
                "password": "hunter2",
            }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success(), "register failed");

        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "handle": handle, "password": "hunter2" }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success(), "login failed");

        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    /// Create a post and return its id
    pub async fn create_post(&self, token: &str, content: &str) -> String {
        let response = self
            .client
            .post(self.url("/api/posts"))
            .bearer_auth(token)
            .json(&json!({ "content": content }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201, "create post failed");

        let body: Value = response.json().await.unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    /// Follow an account by id
    pub async fn follow(&self, token: &str, followed_id: &str) {
        let response = self
            .client
            .post(self.url(&format!("/api/accounts/{}/follow", followed_id)))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success(), "follow failed");
    }

    /// Account id for a handle, straight from the database
    pub async fn account_id(&self, handle: &str) -> String {
        self.state
            .db
            .get_account_by_handle(handle)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    /// Fetch a timeline page as JSON
    pub async fn get_json(&self, token: &str, path: &str) -> Value {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert!(
            response.status().is_success(),
            "GET {} failed with {}",
            path,
            response.status()
        );
        response.json().await.unwrap()
    }
}
