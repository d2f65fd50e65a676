use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenCodec;
use auth_service::domain::auth::errors::AuthError;
use auth_service::domain::auth::models::StoredUser;
use auth_service::domain::auth::models::TokenPolicy;
use auth_service::domain::auth::models::Username;
use auth_service::domain::auth::ports::CredentialRepository;
use auth_service::domain::auth::ports::RefreshStore;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::http::router::create_router;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns the real router on a random port, wired to
/// in-memory port adapters so the suite runs without external services.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub codec: TokenCodec,
}

/// In-memory credential store.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    users: Mutex<HashMap<String, StoredUser>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }

    async fn create(&self, user: StoredUser) -> Result<StoredUser, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(user.username.as_str()) {
            return Err(AuthError::UsernameAlreadyExists(user.username.to_string()));
        }
        users.insert(user.username.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AuthError> {
        Ok(self.users.lock().unwrap().contains_key(username.as_str()))
    }
}

/// In-memory refresh store honoring record TTLs.
#[derive(Default)]
pub struct InMemoryRefreshStore {
    records: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
}

#[async_trait]
impl RefreshStore for InMemoryRefreshStore {
    async fn put(
        &self,
        refresh_token: &str,
        username: &str,
        ttl: Duration,
    ) -> Result<(), AuthError> {
        self.records.lock().unwrap().insert(
            refresh_token.to_string(),
            (username.to_string(), Utc::now() + ttl),
        );
        Ok(())
    }

    async fn exists(&self, refresh_token: &str) -> Result<bool, AuthError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(refresh_token)
            .map_or(false, |(_, expires_at)| *expires_at > Utc::now()))
    }

    async fn delete(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.records.lock().unwrap().remove(refresh_token);
        Ok(())
    }
}

impl TestApp {
    /// Spawn the application in a background task with fresh stores.
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let codec = Arc::new(TokenCodec::new(TEST_SECRET));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryCredentialRepository::default()),
            Arc::new(InMemoryRefreshStore::default()),
            Arc::clone(&codec),
            TokenPolicy::from_seconds(600, 86400),
        ));

        let application = create_router(auth_service, codec, 86400);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server error");
        });

        Self {
            address,
            // Cookies are managed explicitly per request for determinism.
            api_client: reqwest::Client::new(),
            codec: TokenCodec::new(TEST_SECRET),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Register a user and log in, returning (access token, refresh token).
    pub async fn register_and_login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .post("/join")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self
            .post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let access = bearer_token(&response).expect("Missing bearer token");
        let refresh = refresh_cookie_value(&response).expect("Missing refresh cookie");
        (access, refresh)
    }
}

/// Extract the access token from the Authorization response header.
pub fn bearer_token(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Extract the refresh token value from the Set-Cookie response header.
pub fn refresh_cookie_value(response: &reqwest::Response) -> Option<String> {
    set_cookie_header(response)
        .and_then(|header| header.strip_prefix("refresh=").map(str::to_string))
        .and_then(|rest| rest.split(';').next().map(str::to_string))
}

/// The raw Set-Cookie header, for attribute assertions.
pub fn set_cookie_header(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
