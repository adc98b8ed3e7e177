//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per notification endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// POST /notifications
    pub async fn create_notification(&self, user_id: &str, description: &str) -> Response {
        self.create_notification_raw(json!({
            "user_id": user_id,
            "notification_description": description,
        }))
        .await
    }

    /// POST /notifications with an arbitrary JSON body
    pub async fn create_notification_raw(&self, body: serde_json::Value) -> Response {
        self.client
            .post(format!("{}/notifications", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Create notification request failed")
    }

    /// Creates a notification and returns the response body, asserting 201
    pub async fn create_notification_ok(
        &self,
        user_id: &str,
        description: &str,
    ) -> serde_json::Value {
        let response = self.create_notification(user_id, description).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Invalid create response")
    }

    /// GET /users/{user_id}/notifications
    pub async fn get_user_notifications(&self, user_id: &str) -> Response {
        self.client
            .get(format!("{}/users/{}/notifications", self.base_url, user_id))
            .send()
            .await
            .expect("List notifications request failed")
    }

    /// Returns the `notifications` array of a user, asserting 200
    pub async fn list_notifications(&self, user_id: &str) -> Vec<serde_json::Value> {
        let response = self.get_user_notifications(user_id).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Invalid list response");
        body["notifications"]
            .as_array()
            .expect("notifications is not an array")
            .clone()
    }

    /// GET /users/{user_id}/unread-count
    pub async fn get_unread_count(&self, user_id: &str) -> Response {
        self.client
            .get(format!("{}/users/{}/unread-count", self.base_url, user_id))
            .send()
            .await
            .expect("Unread count request failed")
    }

    /// Returns the unread count of a user, asserting 200
    pub async fn unread_count(&self, user_id: &str) -> i64 {
        let response = self.get_unread_count(user_id).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: serde_json::Value = response.json().await.expect("Invalid count response");
        body["unread_count"]
            .as_i64()
            .expect("unread_count is not an integer")
    }

    /// PATCH /notifications/{notification_id}
    pub async fn set_unread(&self, notification_id: i64, unread: bool) -> Response {
        self.update_notification_raw(notification_id, json!({ "unread": unread }))
            .await
    }

    /// PATCH /notifications/{notification_id} with an arbitrary JSON body
    pub async fn update_notification_raw(
        &self,
        notification_id: i64,
        body: serde_json::Value,
    ) -> Response {
        self.client
            .patch(format!(
                "{}/notifications/{}",
                self.base_url, notification_id
            ))
            .json(&body)
            .send()
            .await
            .expect("Update notification request failed")
    }
}
