//! Shared fixtures for integration tests.
//!
//! Tests run against a real PostgreSQL database named by `TEST_DATABASE_URL`.
//! When it is unset, [`TestApp::spawn`] returns `None` and the test returns
//! early. Every fixture uses fresh emails, usernames and court numbers, so
//! tests can share one database and run in parallel.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use courtbook_api::{app::create_app, config::Config};
use serde_json::{json, Value};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "secret123";

/// Router plus pool for one test.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
}

impl TestApp {
    pub async fn spawn() -> Option<TestApp> {
        Self::spawn_with(&[]).await
    }

    /// Like [`TestApp::spawn`] with extra config overrides.
    pub async fn spawn_with(overrides: &[(&str, &str)]) -> Option<TestApp> {
        let database_url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => {
                eprintln!("TEST_DATABASE_URL not set; skipping database test");
                return None;
            }
        };

        let pool = create_test_pool(&database_url).await;
        persistence::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let mut all = vec![("database.url", database_url.as_str())];
        all.extend_from_slice(overrides);
        let config = Config::load_for_test(&all).expect("Failed to load test config");
        let router = create_app(config, pool.clone()).expect("Failed to build app");

        Some(TestApp { router, pool })
    }

    /// Sends a request through a fresh clone of the router.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(request(Method::GET, uri, Some(token), None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::POST, uri, token, Some(body))).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(request(Method::PUT, uri, Some(token), Some(body)))
            .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(request(Method::DELETE, uri, Some(token), None))
            .await
    }

    /// Signs up a fresh user.
    pub async fn signup(&self) -> TestUser {
        let user = TestUser::new();
        let (status, body) = self
            .post(
                "/api/auth/signup",
                None,
                json!({
                    "username": user.username,
                    "email": user.email,
                    "password": user.password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);
        user.with_session(&body)
    }

    /// Books `court` on 2030-01-15 at "7-8 PM" as `user`, returning the booking JSON.
    pub async fn book(&self, user: &TestUser, court: i32) -> Value {
        let (status, body) = self
            .post(
                "/api/bookings",
                Some(&user.token),
                booking_body(court, "2030-01-15", "7-8 PM"),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "booking failed: {}", body);
        body["booking"].clone()
    }
}

pub async fn create_test_pool(database_url: &str) -> PgPool {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await
        .expect("Failed to connect to test database")
}

/// A signed-up user.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    pub fn new() -> Self {
        let tag = Uuid::new_v4().simple().to_string();
        Self {
            id: String::new(),
            username: format!("player_{}", &tag[..12]),
            email: format!("test_{}@example.com", tag),
            password: TEST_PASSWORD.to_string(),
            token: String::new(),
        }
    }

    fn with_session(mut self, body: &Value) -> Self {
        self.id = body["user"]["id"].as_str().unwrap_or_default().to_string();
        self.token = body["token"].as_str().unwrap_or_default().to_string();
        self
    }
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new()
    }
}

/// A court number no other test is using.
pub fn unique_court() -> i32 {
    (Uuid::new_v4().as_u128() % 1_000_000_000) as i32 + 1_000
}

pub fn booking_body(court: i32, date: &str, time_slot: &str) -> Value {
    json!({
        "courtNumber": court,
        "location": "Circle K Court",
        "date": date,
        "timeSlot": time_slot,
    })
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("Failed to build request")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
