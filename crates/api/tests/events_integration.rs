//! Integration tests for event endpoints, including event-to-league points
//! propagation.
//!
//! These tests require a running PostgreSQL instance. Set TEST_DATABASE_URL
//! and run with: cargo test --test events_integration -- --ignored

mod common;

use axum::http::{Method, StatusCode};
use common::{
    access_token_for, cleanup_all_test_data, create_test_app, create_test_pool,
    get_request_with_auth, json_request_with_auth, parse_response_body, run_migrations, seed_user,
    test_config,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_event_capacity_limit() {
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

    // Capacity of two; the owner takes the first slot on creation.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/events",
            json!({"title": "Tiny tournament", "max_participants": 2}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let event: Value = parse_response_body(response).await;
    let event_id = event["id"].as_str().unwrap().to_string();
    assert_eq!(event["participant_count"], 1);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/join", event_id),
            json!({}),
            &second_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The event is full now.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/join", event_id),
            json!({}),
            &third_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_event_points_propagate_to_linked_league() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let player = seed_user(&pool, "bob").await;
    let owner_token = access_token_for(&config, owner);
    let player_token = access_token_for(&config, player);

    // League with both users.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/leagues",
            json!({"name": "Season league"}),
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
            &player_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Event linked to the league.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/events",
            json!({"title": "Matchday", "league_id": league_id}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let event: Value = parse_response_body(response).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/join", event_id),
            json!({}),
            &player_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // +5 in the event mirrors onto the league membership.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/points", event_id),
            json!({"user_id": player, "points": 5, "category": "wins"}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leagues/{}/leaderboard", league_id),
            &owner_token,
        ))
        .await
        .unwrap();
    let board: Value = parse_response_body(response).await;
    let entries = board["data"].as_array().unwrap();
    assert_eq!(entries[0]["user_id"].as_str().unwrap(), player.to_string());
    assert_eq!(entries[0]["total_points"], 5);
    assert_eq!(entries[0]["rank"], 1);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_propagation_skipped_for_non_league_member() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let outsider = seed_user(&pool, "dave").await;
    let owner_token = access_token_for(&config, owner);
    let outsider_token = access_token_for(&config, outsider);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/leagues",
            json!({"name": "Members only"}),
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
            "/api/v1/events",
            json!({"title": "Open matchday", "league_id": league_id}),
            &owner_token,
        ))
        .await
        .unwrap();
    let event: Value = parse_response_body(response).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    // The outsider participates in the event but not the league.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/join", event_id),
            json!({}),
            &outsider_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The assignment succeeds; points stay event-local.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/points", event_id),
            json!({"user_id": outsider, "points": 7, "category": "participation"}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let assignment: Value = parse_response_body(response).await;
    assert_eq!(assignment["total_points"], 7);

    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/leagues/{}/leaderboard", league_id),
            &owner_token,
        ))
        .await
        .unwrap();
    let board: Value = parse_response_body(response).await;
    let entries = board["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1, "outsider never entered the league");
    assert_eq!(entries[0]["user_id"].as_str().unwrap(), owner.to_string());
    assert_eq!(entries[0]["total_points"], 0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_scoring_disabled_event_conflict() {
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
            "/api/v1/events",
            json!({"title": "Social only", "scoring_enabled": false}),
            &owner_token,
        ))
        .await
        .unwrap();
    let event: Value = parse_response_body(response).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/points", event_id),
            json!({"user_id": owner, "points": 1, "category": "bonus"}),
            &owner_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_assign_points_requires_admin() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let owner = seed_user(&pool, "alice").await;
    let player = seed_user(&pool, "bob").await;
    let owner_token = access_token_for(&config, owner);
    let player_token = access_token_for(&config, player);

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/events",
            json!({"title": "Strict event"}),
            &owner_token,
        ))
        .await
        .unwrap();
    let event: Value = parse_response_body(response).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/join", event_id),
            json!({}),
            &player_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // A plain participant cannot assign points, even to themselves.
    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            &format!("/api/v1/events/{}/points", event_id),
            json!({"user_id": player, "points": 100, "category": "bonus"}),
            &player_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    cleanup_all_test_data(&pool).await;
}
