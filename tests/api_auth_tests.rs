// SPDX-License-Identifier: MIT

//! API authentication tests.
//!
//! These tests verify that:
//! 1. Naive header-trust mode maps header problems to 401 with error codes
//! 2. Bearer mode rejects missing/invalid tokens before any handler runs
//! 3. A resolved identity reaches the controller in both modes

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_naive_missing_header_is_unauthorized_with_code() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transport-activity")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::read_json(response).await;
    assert_eq!(body["details"], "AUTH_HEADER_MISSING_OR_EMPTY");
}

#[tokio::test]
async fn test_naive_empty_header_is_unauthorized() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transport-activity")
                .header("x-naive-auth", "")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::read_json(response).await;
    assert_eq!(body["details"], "AUTH_HEADER_MISSING_OR_EMPTY");
}

#[tokio::test]
async fn test_naive_multi_valued_header_is_invalid_format() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transport-activity")
                .header("x-naive-auth", "user-1")
                .header("x-naive-auth", "user-2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = common::read_json(response).await;
    assert_eq!(body["details"], "AUTH_HEADER_INVALID_FORMAT");
}

#[tokio::test]
async fn test_naive_header_value_becomes_user() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transport-activity")
                .header("x-naive-auth", "user-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_bearer_without_token_is_rejected() {
    let (app, _) = common::create_bearer_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transport-activity")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_with_garbage_token_is_rejected() {
    let (app, _) = common::create_bearer_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transport-activity")
                .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_with_valid_token_reaches_handler() {
    let (app, state) = common::create_bearer_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transport-activity")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_bearer_token_signed_with_wrong_key_is_rejected() {
    let (app, _) = common::create_bearer_test_app();
    let token = common::create_test_jwt("user-1", b"some_other_signing_key_entirely!");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/transport-activity")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_needs_no_auth() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_root_greets_without_auth() {
    let (app, _) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Hello World!");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/?name=Tracker")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Hello Tracker!");
}
