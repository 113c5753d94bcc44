//! Test fixtures and data generators
//!
//! Users are provisioned by the account service in production, so tests
//! insert them straight through the repositories.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};
use forum_core::entities::NewUser;
use forum_core::traits::{RoleRepository, UserRepository};
use forum_db::{PgPool, PgRoleRepository, PgUserRepository};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::{assert_json, TestServer};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for names with UNIQUE constraints
pub fn unique_suffix() -> String {
    format!(
        "{}{}",
        chrono::Utc::now().timestamp_micros(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// A seeded role by name
pub async fn role_id(pool: &PgPool, name: &str) -> Result<i32> {
    let roles = PgRoleRepository::new(pool.clone()).find_all().await?;
    roles
        .into_iter()
        .find(|role| role.name == name)
        .map(|role| role.id)
        .with_context(|| format!("seeded role {name} missing"))
}

/// Insert a user holding the given seeded role
pub async fn create_user(pool: &PgPool, role: &str) -> Result<i64> {
    let role_id = role_id(pool, role).await?;
    let user = PgUserRepository::new(pool.clone())
        .create(&NewUser {
            username: format!("{role}_{}", unique_suffix()),
            minecraft_username: Some("Steve".to_string()),
            avatar: None,
            role_id: Some(role_id),
        })
        .await?;
    Ok(user.id)
}

/// A signed-in user for requests
pub struct TestUser {
    pub id: i64,
    pub token: String,
}

impl TestUser {
    pub async fn create(server: &TestServer, role: &str) -> Result<Self> {
        let id = create_user(&server.pool, role).await?;
        Ok(Self {
            id,
            token: server.token_for(id)?,
        })
    }
}

/// Create topic request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicBody {
    pub category_id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl CreateTopicBody {
    pub fn unique(category_id: Uuid) -> Self {
        let suffix = unique_suffix();
        Self {
            category_id,
            title: format!("Survival base {suffix}"),
            content: format!("Looking for feedback on my base, build {suffix}"),
            tags: vec!["builds".to_string()],
        }
    }
}

/// Create a fresh category as an admin; returns its id
pub async fn create_category(server: &TestServer, admin: &TestUser) -> Result<Uuid> {
    let body = json!({ "name": format!("Category {}", unique_suffix()) });
    let response = server
        .post_auth("/api/forum/categories", &admin.token, &body)
        .await?;
    let body = assert_json(response, reqwest::StatusCode::CREATED).await?;
    parse_id(&body["category"]["id"])
}

/// Create a topic; returns its id
pub async fn create_topic(server: &TestServer, user: &TestUser, category_id: Uuid) -> Result<Uuid> {
    let response = server
        .post_auth(
            "/api/forum/topics",
            &user.token,
            &CreateTopicBody::unique(category_id),
        )
        .await?;
    let body = assert_json(response, reqwest::StatusCode::CREATED).await?;
    parse_id(&body["topic"]["id"])
}

/// Reply to a topic; returns the post id
pub async fn create_post(server: &TestServer, user: &TestUser, topic_id: Uuid) -> Result<Uuid> {
    let response = server
        .post_auth(
            &format!("/api/forum/topics/{topic_id}/posts"),
            &user.token,
            &json!({ "content": "Nice to meet you all" }),
        )
        .await?;
    let body = assert_json(response, reqwest::StatusCode::CREATED).await?;
    parse_id(&body["post"]["id"])
}

/// UUID from a JSON string value
pub fn parse_id(value: &Value) -> Result<Uuid> {
    let raw = value.as_str().with_context(|| format!("expected id, got {value}"))?;
    Ok(Uuid::parse_str(raw)?)
}
