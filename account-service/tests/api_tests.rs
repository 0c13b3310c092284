mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/accounts")
        .json(&json!({
            "username": "nicola",
            "email_address": "nicola@example.com",
            "password": "pass_word!",
            "role": "standard"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;

    // Same username, different email
    let response = app
        .post("/api/accounts")
        .json(&json!({
            "username": "nicola",
            "email_address": "other@example.com",
            "password": "pass_word!",
            "role": "standard"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));

    // The first registration is untouched by the failed second one
    app.login_token("nicola", "pass_word!").await;
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;

    // Different username, same email
    let response = app
        .post("/api/accounts")
        .json(&json!({
            "username": "nicola2",
            "email_address": "nicola@example.com",
            "password": "pass_word!2",
            "role": "standard"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_unknown_role_leaves_no_partial_row() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/accounts")
        .json(&json!({
            "username": "nicola",
            "email_address": "nicola@example.com",
            "password": "pass_word!",
            "role": "wizard"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("Unknown role"));

    // The failed registration rolled back completely: the same username and
    // email register cleanly on retry
    app.register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;
}

#[tokio::test]
async fn test_register_invalid_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/accounts")
        .json(&json!({
            "username": "n",
            "email_address": "nicola@example.com",
            "password": "pass_word",
            "role": "standard"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));
}

#[tokio::test]
async fn test_login_returns_account_id() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;

    let response = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["account_id"], id);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::spawn().await;

    app.register_account("nicola", "nicola@example.com", "Correct_Password!", "standard")
        .await;

    let wrong_password = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nicola",
            "password": "Wrong_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    let unknown_username = app
        .post("/api/auth/login")
        .json(&json!({
            "username": "nonexistent",
            "password": "Correct_Password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Wrong password and unknown username must be indistinguishable
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_username.status(), StatusCode::UNAUTHORIZED);

    let wrong_body: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_body: serde_json::Value = unknown_username.json().await.unwrap();
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_token_login_and_protected_access() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;
    let token = app.login_token("nicola", "pass_word!").await;

    let response = app
        .get_authenticated(&format!("/api/accounts/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["status"], "active");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;

    // No Authorization header
    let missing = app
        .get(&format!("/api/accounts/{}", id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let garbage = app
        .get_authenticated(&format!("/api/accounts/{}", id), "not.a.token")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;

    // Token signed with the right secret but already past its expiry
    let expired_claims =
        auth::Claims::new(id.clone(), "standard", chrono::Duration::hours(1)).with_expiration(1);
    let expired_token = app.jwt_handler.encode(&expired_claims).unwrap();

    let response = app
        .get_authenticated(&format!("/api/accounts/{}", id), &expired_token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_gate() {
    let app = TestApp::spawn().await;

    app.register_account("alice", "alice@example.com", "secret123", "standard")
        .await;
    app.register_account("root", "root@example.com", "admin_pass!", "admin")
        .await;

    let standard_token = app.login_token("alice", "secret123").await;
    let admin_token = app.login_token("root", "admin_pass!").await;

    // A verified standard-role token is forbidden on the admin surface
    let forbidden = app
        .post_authenticated("/api/roles", &standard_token)
        .json(&json!({ "name": "auditor" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    // The admin-role token passes the same gate
    let created = app
        .post_authenticated("/api/roles", &admin_token)
        .json(&json!({ "name": "auditor", "description": "Read-only access" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(created.status(), StatusCode::CREATED);

    let body: serde_json::Value = created.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "auditor");
}

#[tokio::test]
async fn test_role_crud() {
    let app = TestApp::spawn().await;

    app.register_account("root", "root@example.com", "admin_pass!", "admin")
        .await;
    let token = app.login_token("root", "admin_pass!").await;

    // Create
    let created = app
        .post_authenticated("/api/roles", &token)
        .json(&json!({ "name": "auditor" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created_body: serde_json::Value = created.json().await.unwrap();
    let role_id = created_body["data"]["id"].as_i64().unwrap();

    // Read
    let fetched = app
        .get_authenticated(&format!("/api/roles/{}", role_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(fetched.status(), StatusCode::OK);

    // Rename
    let renamed = app
        .patch_authenticated(&format!("/api/roles/{}", role_id), &token)
        .json(&json!({ "name": "reviewer" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(renamed.status(), StatusCode::OK);
    let renamed_body: serde_json::Value = renamed.json().await.unwrap();
    assert_eq!(renamed_body["data"]["name"], "reviewer");

    // Delete
    let deleted = app
        .delete_authenticated(&format!("/api/roles/{}", role_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // Gone
    let missing = app
        .get_authenticated(&format!("/api/roles/{}", role_id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_workflow() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;
    let token = app.login_token("nicola", "pass_word!").await;

    // Create profile
    let created = app
        .post_authenticated(&format!("/api/accounts/{}/profile", id), &token)
        .json(&json!({
            "first_name": "Nicola",
            "last_name": "DB",
            "dob": "1990-04-01",
            "country": "Italy"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(created.status(), StatusCode::CREATED);

    // A second create conflicts
    let duplicate = app
        .post_authenticated(&format!("/api/accounts/{}/profile", id), &token)
        .json(&json!({ "first_name": "Nicola" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    // Full replace
    let updated = app
        .put_authenticated(&format!("/api/accounts/{}/profile", id), &token)
        .json(&json!({
            "first_name": "Nicola",
            "last_name": "DB",
            "bio": "Hello",
            "country": "Italy"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(updated.status(), StatusCode::OK);

    // Unknown fields are rejected, not silently forwarded
    let unknown_field = app
        .put_authenticated(&format!("/api/accounts/{}/profile", id), &token)
        .json(&json!({ "first_name": "Nicola", "is_admin": true }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown_field.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The detail view reflects the profile
    let details = app
        .get_authenticated(&format!("/api/accounts/{}/details", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(details.status(), StatusCode::OK);

    let body: serde_json::Value = details.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["profile"]["bio"], "Hello");
    assert_eq!(body["data"]["role"], "standard");
}

#[tokio::test]
async fn test_attach_image_appears_in_details() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;
    let token = app.login_token("nicola", "pass_word!").await;

    let attached = app
        .post_authenticated(&format!("/api/accounts/{}/images", id), &token)
        .json(&json!({
            "image_name": "avatar.png",
            "image_url": "https://cdn.example.com/avatar.png"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(attached.status(), StatusCode::CREATED);

    let details = app
        .get_authenticated(&format!("/api/accounts/{}/details", id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    let body: serde_json::Value = details.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["images"][0]["image_name"], "avatar.png");
}

#[tokio::test]
async fn test_update_account_rejects_unknown_fields() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;
    let token = app.login_token("nicola", "pass_word!").await;

    let response = app
        .patch_authenticated(&format!("/api/accounts/{}", id), &token)
        .json(&json!({
            "email": "new@example.com",
            "role": "admin"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_account_changes_password() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;
    let token = app.login_token("nicola", "pass_word!").await;

    let response = app
        .patch_authenticated(&format!("/api/accounts/{}", id), &token)
        .json(&json!({ "password": "new_pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer authenticates; new one does
    let old = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nicola", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    app.login_token("nicola", "new_pass_word!").await;
}

#[tokio::test]
async fn test_list_accounts_pagination() {
    let app = TestApp::spawn().await;

    app.register_account("user_one", "one@example.com", "pass_word!", "standard")
        .await;
    app.register_account("user_two", "two@example.com", "pass_word!", "standard")
        .await;
    app.register_account("user_three", "three@example.com", "pass_word!", "standard")
        .await;

    let token = app.login_token("user_one", "pass_word!").await;

    let first_page = app
        .get_authenticated("/api/accounts?page=1&per_page=2", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(first_page.status(), StatusCode::OK);

    let first_body: serde_json::Value = first_page.json().await.unwrap();
    assert_eq!(first_body["data"].as_array().unwrap().len(), 2);
    assert_eq!(first_body["data"][0]["username"], "user_one");

    let second_page = app
        .get_authenticated("/api/accounts?page=2&per_page=2", &token)
        .send()
        .await
        .expect("Failed to execute request");

    let second_body: serde_json::Value = second_page.json().await.unwrap();
    assert_eq!(second_body["data"].as_array().unwrap().len(), 1);
    assert_eq!(second_body["data"][0]["username"], "user_three");
}

#[tokio::test]
async fn test_soft_delete_blocks_login_but_keeps_row() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;
    let token = app.login_token("nicola", "pass_word!").await;

    let deleted = app
        .delete_authenticated(&format!("/api/accounts/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    // The credential no longer authenticates
    let login = app
        .post("/api/auth/login")
        .json(&json!({ "username": "nicola", "password": "pass_word!" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);

    // The row survives with its status flipped (the already-issued token
    // stays valid until expiry, so it can still read the record)
    let fetched = app
        .get_authenticated(&format!("/api/accounts/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(fetched.status(), StatusCode::OK);

    let body: serde_json::Value = fetched.json().await.unwrap();
    assert_eq!(body["data"]["status"], "soft_deleted");
}

#[tokio::test]
async fn test_purge_account_removes_row() {
    let app = TestApp::spawn().await;

    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;
    app.register_account("root", "root@example.com", "admin_pass!", "admin")
        .await;

    let admin_token = app.login_token("root", "admin_pass!").await;

    let purged = app
        .delete_authenticated(&format!("/api/accounts/{}/purge", id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(purged.status(), StatusCode::NO_CONTENT);

    let missing = app
        .get_authenticated(&format!("/api/accounts/{}", id), &admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_account_workflow() {
    let app = TestApp::spawn().await;

    // 1. Register
    let id = app
        .register_account("nicola", "nicola@example.com", "pass_word!", "standard")
        .await;

    // 2. Login
    let token = app.login_token("nicola", "pass_word!").await;

    // 3. Access protected endpoint
    let fetched = app
        .get_authenticated(&format!("/api/accounts/{}", id), &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(fetched.status(), StatusCode::OK);

    // 4. Update email
    let updated = app
        .patch_authenticated(&format!("/api/accounts/{}", id), &token)
        .json(&json!({ "email": "updated@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(updated.status(), StatusCode::OK);

    let body: serde_json::Value = updated.json().await.unwrap();
    assert_eq!(body["data"]["email"], "updated@example.com");

    // 5. An invalid token cannot reach the same endpoint
    let invalid = app
        .get_authenticated(&format!("/api/accounts/{}", id), "invalid")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);
}
