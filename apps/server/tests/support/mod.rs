#![allow(dead_code)]

pub mod builders;
pub mod memory;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use carelens::{api::create_router, auth::Claims, db::CatalogStore, AppState, Config};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt as _;

pub use builders::*;
pub use memory::MemoryCatalog;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCatalog>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(configure: impl FnOnce(&mut Config)) -> Self {
        let mut config = Config::default();
        config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
        configure(&mut config);

        let store = Arc::new(MemoryCatalog::default());
        let store_dyn: Arc<dyn CatalogStore> = store.clone();
        let state = AppState::with_store(config, store_dyn);
        let router = create_router(state);

        Self { router, store }
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.request_with_headers(method, path_and_query, body, &[])
            .await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
        extra_headers: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("content-type", "application/json");
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }

        let request = builder
            .body(match body {
                Some(value) => Body::from(value.to_string()),
                None => Body::empty(),
            })
            .expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("dispatch request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("parse response JSON")
        };

        (status, json)
    }

    /// Request with a valid admin session, for the `/api/admin` surface.
    pub async fn admin_request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let token = admin_token();
        let auth = format!("Bearer {token}");
        self.request_with_headers(method, path_and_query, body, &[("authorization", &auth)])
            .await
    }
}

pub fn admin_token() -> String {
    let claims = Claims {
        sub: "admin".to_string(),
        exp: jsonwebtoken::get_current_timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("sign admin token")
}
