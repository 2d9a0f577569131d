/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::time::Duration;

use aws_sdk_s3::operation::delete_object::DeleteObjectOutput;
use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
use aws_sdk_s3::operation::head_object::HeadObjectOutput;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::operation::put_object::PutObjectOutput;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::Object;
use aws_smithy_mocks::{mock, mock_client, Rule, RuleMode};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use object_storage_gateway::server::AppState;
use object_storage_gateway::Session;
use tower::ServiceExt;

fn test_router(rules: &[&Rule]) -> Router {
    let client = match rules.len() {
        0 => mock_client!(aws_sdk_s3, &[]),
        _ => mock_client!(aws_sdk_s3, RuleMode::MatchAny, rules),
    };
    let config = object_storage_gateway::Config::builder()
        .client(client)
        .bucket("test-bucket")
        .build()
        .unwrap();
    let session = Session::new(config);
    object_storage_gateway::server::router(AppState::new(session, Duration::from_secs(30)))
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_upload_requires_params() {
    let router = test_router(&[]);

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/upload?folder=api-test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("filename is required"));
}

#[tokio::test]
async fn test_upload_buffer_round_trip() {
    let put_object = mock!(aws_sdk_s3::Client::put_object)
        .match_requests(|r| {
            r.key() == Some("api-test/123/buf.txt") && r.content_length == Some(12)
        })
        .then_output(|| PutObjectOutput::builder().e_tag("buf-tag").build());
    let router = test_router(&[&put_object]);

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/upload/buffer?objectname=api-test/123/buf.txt")
                .body(Body::from("hello buffer"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::CREATED, response.status());
    let body = response_json(response).await;
    assert_eq!("Buffer uploaded successfully", body["message"]);
    assert_eq!("api-test/123/buf.txt", body["data"]["path"]);
    assert_eq!("12 bytes", body["data"]["size"]);
}

#[tokio::test]
async fn test_upload_buffer_rejects_traversal_key() {
    let router = test_router(&[]);

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/upload/buffer?objectname=../etc/passwd")
                .body(Body::from("oops"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::BAD_REQUEST, response.status());
}

#[tokio::test]
async fn test_list_reports_no_files() {
    let list_objects = mock!(aws_sdk_s3::Client::list_objects_v2)
        .then_output(|| ListObjectsV2Output::builder().build());
    let router = test_router(&[&list_objects]);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/list?folder=empty-prefix/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());
    let body = response_json(response).await;
    assert_eq!("No files found", body["message"]);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_list_returns_keys() {
    let list_objects = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|r| r.prefix() == Some("api-test/"))
        .then_output(|| {
            ListObjectsV2Output::builder()
                .contents(Object::builder().key("api-test/a.txt").build())
                .contents(Object::builder().key("api-test/b.txt").build())
                .build()
        });
    let router = test_router(&[&list_objects]);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/list?folder=api-test/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());
    let body = response_json(response).await;
    assert_eq!("Files found", body["message"]);
    assert_eq!(
        serde_json::json!(["api-test/a.txt", "api-test/b.txt"]),
        body["data"]
    );
}

#[tokio::test]
async fn test_download_missing_object_is_404() {
    let get_object = mock!(aws_sdk_s3::Client::get_object).then_error(|| {
        GetObjectError::NoSuchKey(aws_sdk_s3::types::error::NoSuchKey::builder().build())
    });
    let router = test_router(&[&get_object]);

    let dir = tempfile::tempdir().unwrap();
    let response = router
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/download?objectname=missing.txt&destination={}",
                    dir.path().display()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn test_download_writes_destination_file() {
    let get_object = mock!(aws_sdk_s3::Client::get_object)
        .match_requests(|r| r.key() == Some("api-test/123/buf.txt"))
        .then_output(|| {
            GetObjectOutput::builder()
                .body(ByteStream::from_static(b"hello buffer"))
                .build()
        });
    let router = test_router(&[&get_object]);

    let dir = tempfile::tempdir().unwrap();
    let response = router
        .oneshot(
            Request::builder()
                .uri(format!(
                    "/download?objectname=api-test/123/buf.txt&destination={}",
                    dir.path().display()
                ))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());
    let body = response_json(response).await;
    assert_eq!("File downloaded successfully", body["message"]);
    assert_eq!("12 bytes", body["data"]["size"]);

    let written = std::fs::read(dir.path().join("buf.txt")).unwrap();
    assert_eq!(b"hello buffer".as_slice(), written.as_slice());
}

#[tokio::test]
async fn test_delete_round_trip() {
    let head_object = mock!(aws_sdk_s3::Client::head_object)
        .match_requests(|r| r.key() == Some("api-test/123/buf.txt"))
        .then_output(|| HeadObjectOutput::builder().build());
    let delete_object = mock!(aws_sdk_s3::Client::delete_object)
        .match_requests(|r| r.key() == Some("api-test/123/buf.txt"))
        .then_output(|| DeleteObjectOutput::builder().build());
    let router = test_router(&[&head_object, &delete_object]);

    let response = router
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri("/delete?objectname=api-test/123/buf.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(StatusCode::OK, response.status());
    let body = response_json(response).await;
    assert_eq!("File deleted successfully", body["message"]);
    assert_eq!("api-test/123/buf.txt", body["data"]["path"]);
    assert_eq!(1, delete_object.num_calls());
}
