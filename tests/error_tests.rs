// SPDX-License-Identifier: MIT

//! Error-to-response mapping tests.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use pr_tracker::error::AppError;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_invalid_credentials_carries_user_facing_copy() {
    let response = AppError::InvalidCredentials.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid_credentials");
    assert_eq!(
        json["details"],
        "Incorrect email or password. Please try again."
    );
}

#[tokio::test]
async fn test_table_store_error_hides_details() {
    let response =
        AppError::TableStore("HTTP 500: connection reset".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Store internals are logged, never echoed to the client
    let json = body_json(response).await;
    assert_eq!(json["error"], "table_store_error");
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_storage_error_maps_to_bad_gateway() {
    let response = AppError::Storage("upload failed".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "storage_error");
}

#[tokio::test]
async fn test_bad_request_echoes_message() {
    let response = AppError::BadRequest("Uploaded file is empty".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "bad_request");
    assert_eq!(json["details"], "Uploaded file is empty");
}

#[tokio::test]
async fn test_unauthorized_variants_are_401() {
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::InvalidToken.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
}
