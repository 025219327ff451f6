#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use core_service::config::Config;
use core_service::events::{BrokerError, EventPublisher};
use core_service::models::{Bid, ProfilePatch, User, UserProfile};
use core_service::state::AppState;
use core_service::store::{BidStore, StoreError, UserStore};

pub const JWT_SECRET: &str = "test-jwt-secret-that-is-long-enough";

/// In-memory stand-in for PostgreSQL with the same uniqueness rule on email.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    bids: Mutex<Vec<Bid>>,
    fail_lookups: AtomicBool,
    stall_lookups: AtomicBool,
}

impl MemoryStore {
    pub fn user(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn bids(&self) -> Vec<Bid> {
        self.bids.lock().unwrap().clone()
    }

    /// Make every email lookup fail as if the database were down.
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Make every email lookup hang forever.
    pub fn stall_lookups(&self, stall: bool) {
        self.stall_lookups.store(stall, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        if self.stall_lookups.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.user(id).map(UserProfile::from))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: &ProfilePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(v) = &patch.first_name {
            user.first_name = v.clone();
        }
        if let Some(v) = &patch.last_name {
            user.last_name = v.clone();
        }
        if let Some(v) = &patch.phone {
            user.phone = v.clone();
        }
        if let Some(v) = &patch.location {
            user.location = v.clone();
        }
        user.updated_at = updated_at;
        Ok(true)
    }
}

#[async_trait]
impl BidStore for MemoryStore {
    async fn insert(&self, bid: &Bid) -> Result<(), StoreError> {
        self.bids.lock().unwrap().push(bid.clone());
        Ok(())
    }
}

/// Publisher that keeps every message, or refuses them when told to fail.
#[derive(Default)]
pub struct RecordingPublisher {
    sent: Mutex<Vec<(String, Vec<u8>)>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    pub fn sent(&self) -> Vec<(String, Vec<u8>)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, channel: &str, payload: Vec<u8>) -> Result<(), BrokerError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BrokerError::new("connection refused"));
        }
        self.sent.lock().unwrap().push((channel.to_string(), payload));
        Ok(())
    }
}

/// A running test server backed by in-memory collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub publisher: Arc<RecordingPublisher>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Register a user with filler profile fields.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        user_type: &str,
    ) -> (Value, StatusCode) {
        self.post(
            "/api/users/register",
            &json!({
                "email": email,
                "password": password,
                "user_type": user_type,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "phone": "+44 20 7946 0000",
                "location": "London"
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        self.post(
            "/api/users/login",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Register then log in, returning (user id, token).
    pub async fn signup(&self, email: &str, user_type: &str) -> (Uuid, String) {
        let (body, status) = self.register(email, "password123", user_type).await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        let (body, status) = self.login(email, "password123").await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
        (id, body["token"].as_str().unwrap().to_string())
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a raw body with a JSON content type.
    pub async fn post_raw(&self, path: &str, raw: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(raw.to_string())
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        redis_url: "redis://unused".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_ttl_minutes: 60,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        request_timeout: Duration::from_secs(10),
        publish_timeout: Duration::from_millis(500),
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
    }
}

/// Spawn a test app on a random port.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let store = Arc::new(MemoryStore::default());
    let publisher = Arc::new(RecordingPublisher::default());

    let state = AppState::new(
        config,
        store.clone(),
        store.clone(),
        publisher.clone(),
    );
    let app = core_service::build_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
        publisher,
    }
}
