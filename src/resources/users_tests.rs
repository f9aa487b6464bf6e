//! Tests for the users wrapper.

use super::{NewUser, QueryOptions, UserUpdate};
use crate::client::mock::{MockClient, body_json, client, query, response};
use serde_json::{Map, json};
use std::sync::Arc;

fn path(mock: &MockClient) -> String {
    mock.last_request().url.path().to_string()
}

#[tokio::test]
async fn list_sends_fieldset_for_users() {
    let mock = Arc::new(MockClient::respond(200, r#"{"data":[]}"#));
    let result = client(&mock)
        .users()
        .list(QueryOptions::new().with_fields(["email"]))
        .await
        .unwrap();

    assert_eq!(result, json!({"data": []}));
    assert_eq!(path(&mock), "/users");
    assert_eq!(
        query(&mock.last_request()),
        vec![("fields[users]".to_string(), "email".to_string())]
    );
}

#[tokio::test]
async fn create_omits_absent_attributes_and_defaults_role() {
    let mock = Arc::new(MockClient::respond(201, r#"{"data":{"id":"u1"}}"#));
    client(&mock)
        .users()
        .create(NewUser::new("Ada", "Lovelace").with_email("ada@example.com"))
        .await
        .unwrap();

    let req = mock.last_request();
    assert_eq!(req.method, http::Method::POST);
    assert_eq!(
        body_json(&req),
        json!({
            "data": {
                "type": "users",
                "attributes": {
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": "ada@example.com",
                    "role": "user",
                    "custom_fields": {}
                }
            }
        })
    );
}

#[tokio::test]
async fn create_attaches_groups_relationship() {
    let mock = Arc::new(MockClient::new(vec![]));
    client(&mock)
        .users()
        .create(NewUser::new("Ada", "Lovelace").with_group("g1").with_group("g2"))
        .await
        .unwrap();

    assert_eq!(
        body_json(&mock.last_request())["data"]["relationships"],
        json!({"groups": {"data": [{"type": "groups", "id": "g1"}, {"type": "groups", "id": "g2"}]}})
    );
}

#[tokio::test]
async fn update_sends_only_changed_attributes() {
    let mock = Arc::new(MockClient::new(vec![]));
    let changes = UserUpdate {
        role: Some("manager".to_string()),
        ..UserUpdate::default()
    };
    client(&mock).users().update("u1", changes).await.unwrap();

    let req = mock.last_request();
    assert_eq!(req.method, http::Method::PATCH);
    assert_eq!(path(&mock), "/users/u1");
    assert_eq!(
        body_json(&req),
        json!({"data": {"type": "users", "id": "u1", "attributes": {"role": "manager"}}})
    );
}

#[tokio::test]
async fn update_with_empty_groups_clears_memberships() {
    let mock = Arc::new(MockClient::new(vec![]));
    let changes = UserUpdate {
        group_ids: Some(Vec::new()),
        custom_fields: Some(Map::new()),
        ..UserUpdate::default()
    };
    client(&mock).users().update("u1", changes).await.unwrap();

    let body = body_json(&mock.last_request());
    assert_eq!(body["data"]["relationships"], json!({"groups": {"data": []}}));
    assert_eq!(body["data"]["attributes"], json!({"custom_fields": {}}));
}

#[tokio::test]
async fn lock_and_unlock_toggle_locked() {
    let mock = Arc::new(MockClient::new(vec![]));
    let c = client(&mock);

    c.users().lock("u1", "fraud").await.unwrap();
    assert_eq!(
        body_json(&mock.last_request())["data"]["attributes"],
        json!({"locked": true, "locked_reason": "fraud"})
    );

    c.users().unlock("u1").await.unwrap();
    assert_eq!(
        body_json(&mock.last_request())["data"]["attributes"],
        json!({"locked": false})
    );
}

#[tokio::test]
async fn promote_to_admin_sets_role() {
    let mock = Arc::new(MockClient::new(vec![]));
    client(&mock).users().promote_to_admin("u1").await.unwrap();

    assert_eq!(
        body_json(&mock.last_request())["data"]["attributes"],
        json!({"role": "admin"})
    );
}

#[tokio::test]
async fn retrieve_and_delete_address_the_user() {
    let mock = Arc::new(MockClient::new(vec![
        Ok(response(200, "{}")),
        Ok(response(204, "")),
    ]));
    let c = client(&mock);

    c.users().retrieve("u1", QueryOptions::new()).await.unwrap();
    assert_eq!(path(&mock), "/users/u1");
    assert_eq!(mock.last_request().url.query(), None);

    let deleted = c.users().delete("u1").await.unwrap();
    assert_eq!(deleted, json!({}));
    assert_eq!(mock.last_request().method, http::Method::DELETE);
    assert!(mock.last_request().body.is_none());
}
