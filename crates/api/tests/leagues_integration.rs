//! Integration tests for league endpoints.
//!
//! These tests require a running PostgreSQL instance. Set TEST_DATABASE_URL
//! and run with: cargo test --test leagues_integration -- --ignored

mod common;

use axum::http::{Method, StatusCode};
use common::{
    access_token_for, cleanup_all_test_data, create_test_app, create_test_pool,
    delete_request_with_auth, get_request_with_auth, json_request_with_auth, parse_response_body,
    run_migrations, seed_user, test_config,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_league_lifecycle_and_leaderboard() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let second = seed_user(&pool, "bob").await;
    let third = seed_user(&pool, "carol").await;

    let owner_token = access_token_for(&config, owner);
    let second_token = access_token_for(&config, second);
    let third_token = access_token_for(&config, third);

    // Owner creates the league and becomes its first member at rank 1.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/leagues",
            json!({"name": "Sunday Football"}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let league: Value = parse_response_body(response).await;
    let league_id = league["id"].as_str().unwrap().to_string();
    assert_eq!(league["member_count"], 1);

    // Two more users join; at equal points the earlier join ranks higher.
    for token in [&second_token, &third_token] {
        let response = app
            .clone()
            .oneshot(json_request_with_auth(
                Method::POST,
                &format!("/api/v1/leagues/{}/join", league_id),
                json!({}),
                token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // The owner assigns +10 to the second user.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/points", league_id),
            json!({
                "user_id": second,
                "points": 10,
                "category": "wins",
                "reason": "Match win"
            }),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let assignment: Value = parse_response_body(response).await;
    assert_eq!(assignment["total_points"], 10);
    assert_eq!(assignment["delta"], 10);
    assert_eq!(assignment["rank"], 1);
    assert_eq!(assignment["category"], "wins");

    // Leaderboard: bob 10pts rank 1, then alice (earlier join), then carol.
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leagues/{}/leaderboard", league_id),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let board: Value = parse_response_body(response).await;
    let entries = board["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0]["user_id"].as_str().unwrap(), second.to_string());
    assert_eq!(entries[0]["total_points"], 10);
    assert_eq!(entries[0]["rank"], 1);

    assert_eq!(entries[1]["user_id"].as_str().unwrap(), owner.to_string());
    assert_eq!(entries[1]["total_points"], 0);
    assert_eq!(entries[1]["rank"], 2);

    assert_eq!(entries[2]["user_id"].as_str().unwrap(), third.to_string());
    assert_eq!(entries[2]["total_points"], 0);
    assert_eq!(entries[2]["rank"], 3);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_requires_auth() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;

    let config = test_config();
    let app = create_test_app(config, pool.clone());

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/leagues")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::to_string(&json!({"name": "No auth"})).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_private_league_invite_code() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let joiner = seed_user(&pool, "bob").await;
    let owner_token = access_token_for(&config, owner);
    let joiner_token = access_token_for(&config, joiner);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/leagues",
            json!({"name": "Secret League", "is_private": true}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let league: Value = parse_response_body(response).await;
    let league_id = league["id"].as_str().unwrap().to_string();
    let invite_code = league["invite_code"].as_str().unwrap().to_string();
    assert_eq!(invite_code.len(), 8);

    // No code and a wrong code are both rejected.
    for body in [json!({}), json!({"invite_code": "WRONGCOD"})] {
        let response = app
            .clone()
            .oneshot(json_request_with_auth(
                Method::POST,
                &format!("/api/v1/leagues/{}/join", league_id),
                body,
                &joiner_token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    // Private detail is hidden from non-members.
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leagues/{}", league_id),
            &joiner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The exact code joins.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/join", league_id),
            json!({"invite_code": invite_code}),
            &joiner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Toggling privacy off clears the code.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::PUT,
            &format!("/api/v1/leagues/{}", league_id),
            json!({"is_private": false}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = parse_response_body(response).await;
    assert!(updated.get("invite_code").is_none());

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_duplicate_join_conflict() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let joiner = seed_user(&pool, "bob").await;
    let owner_token = access_token_for(&config, owner);
    let joiner_token = access_token_for(&config, joiner);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/leagues",
            json!({"name": "Casual"}),
            &owner_token,
        ))
        .await
        .unwrap();
    let league: Value = parse_response_body(response).await;
    let league_id = league["id"].as_str().unwrap().to_string();

    let join = || {
        json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/join", league_id),
            json!({}),
            &joiner_token,
        )
    };

    let response = app.clone().oneshot(join()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.clone().oneshot(join()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_owner_protection() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let owner_token = access_token_for(&config, owner);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/leagues",
            json!({"name": "Protected"}),
            &owner_token,
        ))
        .await
        .unwrap();
    let league: Value = parse_response_body(response).await;
    let league_id = league["id"].as_str().unwrap().to_string();

    // Removing the owner as a member always fails, even for the owner.
    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/leagues/{}/members/{}", league_id, owner),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Revoking the owner's admin rights always fails.
    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/leagues/{}/admins/{}", league_id, owner),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_admin_grant_and_revoke() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let member = seed_user(&pool, "bob").await;
    let outsider = seed_user(&pool, "carol").await;
    let owner_token = access_token_for(&config, owner);
    let member_token = access_token_for(&config, member);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/leagues",
            json!({"name": "Delegated"}),
            &owner_token,
        ))
        .await
        .unwrap();
    let league: Value = parse_response_body(response).await;
    let league_id = league["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/join", league_id),
            json!({}),
            &member_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Granting to a non-member fails.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/admins/{}", league_id, outsider),
            json!({}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A member can't grant admin rights.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/admins/{}", league_id, member),
            json!({}),
            &member_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Grant, then duplicate grant conflicts.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/admins/{}", league_id, member),
            json!({}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/admins/{}", league_id, member),
            json!({}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The delegated admin can now assign points.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/points", league_id),
            json!({"user_id": owner, "points": 3, "category": "bonus"}),
            &member_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Revoke, and the rights are gone.
    let response = app
        .clone()
        .oneshot(delete_request_with_auth(
            &format!("/api/v1/leagues/{}/admins/{}", league_id, member),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/points", league_id),
            json!({"user_id": owner, "points": 3, "category": "bonus"}),
            &member_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_leave_as_sole_admin_conflict() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let member = seed_user(&pool, "bob").await;
    let owner_token = access_token_for(&config, owner);
    let member_token = access_token_for(&config, member);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/leagues",
            json!({"name": "Needs an admin"}),
            &owner_token,
        ))
        .await
        .unwrap();
    let league: Value = parse_response_body(response).await;
    let league_id = league["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/join", league_id),
            json!({}),
            &member_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Owner can't leave while no delegated admin exists.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/leave", league_id),
            json!({}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // After delegating, the owner may leave.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/admins/{}", league_id, member),
            json!({}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/leagues/{}/leave", league_id),
            json!({}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    cleanup_all_test_data(&pool).await;
}
