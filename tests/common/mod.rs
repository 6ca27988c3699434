#![allow(dead_code)]

use axum::http::Method;
use serde_json::Value;
use sqlx::SqliteConnection;
use tempfile::TempDir;

use messenger::database::{connection, schema, users_repo};
use messenger::web::dispatcher;
use messenger::web::envelope::{ApiRequest, ApiResponse};
use messenger::AppConfig;

/// A throwaway SQLite file with the schema applied.
pub struct TestStore {
    _dir: TempDir,
    pub config: AppConfig,
}

impl TestStore {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("messenger.db");
        let config = AppConfig::with_database_url(format!("sqlite://{}", path.display()));

        let mut conn = connection::open_connection(&config.database_url)
            .await
            .expect("open test db");
        schema::ensure_schema(&mut conn).await.expect("schema");

        Self { _dir: dir, config }
    }

    pub async fn conn(&self) -> SqliteConnection {
        connection::open_connection(&self.config.database_url)
            .await
            .expect("open test db")
    }

    pub async fn create_user(&self, name: &str) -> i64 {
        let mut conn = self.conn().await;
        users_repo::insert_user(
            &mut conn,
            users_repo::NewUser {
                name,
                avatar: "🙂",
                phone: None,
            },
        )
        .await
        .expect("insert user")
    }

    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        dispatcher::dispatch(&self.config, request).await
    }

    pub async fn list_contacts(&self, user_id: i64) -> Vec<Value> {
        let res = self.dispatch(get_contacts(user_id)).await;
        assert_eq!(res.status_code, 200, "body: {}", res.body);
        body_json(&res)["contacts"]
            .as_array()
            .cloned()
            .expect("contacts array")
    }

    pub async fn read_thread(&self, user_id: i64, contact_id: i64) -> Vec<Value> {
        let res = self.dispatch(get_thread(user_id, contact_id)).await;
        assert_eq!(res.status_code, 200, "body: {}", res.body);
        body_json(&res)["messages"]
            .as_array()
            .cloned()
            .expect("messages array")
    }

    pub async fn send(&self, from: i64, to: i64, text: &str) -> Value {
        let res = self
            .dispatch(post(
                from,
                serde_json::json!({ "action": "send_message", "receiverId": to, "text": text }),
            ))
            .await;
        assert_eq!(res.status_code, 200, "body: {}", res.body);
        body_json(&res)
    }

    pub async fn add_contact(&self, owner: i64, name: &str) -> i64 {
        let res = self
            .dispatch(post(
                owner,
                serde_json::json!({ "action": "add_contact", "name": name }),
            ))
            .await;
        assert_eq!(res.status_code, 200, "body: {}", res.body);
        body_json(&res)["contactId"].as_i64().expect("contactId")
    }

    /// Links `owner -> contact` directly, bypassing add_contact.
    pub async fn link(&self, owner: i64, contact: i64) {
        let mut conn = self.conn().await;
        sqlx::query("INSERT INTO contacts (user_id, contact_user_id, is_online) VALUES (?1, ?2, 1)")
            .bind(owner)
            .bind(contact)
            .execute(&mut conn)
            .await
            .expect("insert contact edge");
    }

    /// `(name, avatar, phone)` of one user row.
    pub async fn load_user(&self, user_id: i64) -> (String, String, Option<String>) {
        let mut conn = self.conn().await;
        sqlx::query_as("SELECT name, avatar, phone FROM users WHERE id = ?1")
            .bind(user_id)
            .fetch_one(&mut conn)
            .await
            .expect("user row")
    }

    pub async fn count(&self, table: &str) -> i64 {
        let mut conn = self.conn().await;
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&mut conn)
            .await
            .expect("count")
    }
}

pub fn get_contacts(user_id: i64) -> ApiRequest {
    ApiRequest::new(Method::GET)
        .with_query("action", "contacts")
        .with_query("userId", user_id.to_string())
}

pub fn get_thread(user_id: i64, contact_id: i64) -> ApiRequest {
    ApiRequest::new(Method::GET)
        .with_query("action", "messages")
        .with_query("userId", user_id.to_string())
        .with_query("contactId", contact_id.to_string())
}

pub fn post(user_id: i64, body: Value) -> ApiRequest {
    ApiRequest::new(Method::POST)
        .with_query("userId", user_id.to_string())
        .with_body(body.to_string())
}

pub fn body_json(res: &ApiResponse) -> Value {
    serde_json::from_str(&res.body).expect("json body")
}
