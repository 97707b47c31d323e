// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Client integration tests with wiremock.

mod common;

use edudesk_api::{ApiError, Session};
use edudesk_core::{Audience, Class, Event, LibraryResource, RecordId, ResourceType};
use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TOKEN, client, event_json, logged_in};

#[tokio::test]
async fn list_sends_bearer_token_and_reads_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            event_json("e1", "Sports Day"),
            event_json("e2", "Science Fair"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let events = logged_in(&server).list::<Event>().await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events.first().unwrap().id, RecordId::from("e1"));
    assert_eq!(events.first().unwrap().target_audience, vec![Audience::AllStudents]);
}

#[tokio::test]
async fn list_reads_wrapped_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "r1",
                "title": "Atlas",
                "subject": "Geography",
                "classes": ["9-B"],
                "type": "link",
                "url": "https://atlas.example"
            }]
        })))
        .mount(&server)
        .await;

    let resources = logged_in(&server).list::<LibraryResource>().await.unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources.first().unwrap().kind, ResourceType::Link);
}

#[tokio::test]
async fn list_classes_hits_class_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/classes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "c1", "class_name": "10", "section": "A"}
        ])))
        .mount(&server)
        .await;

    let classes = logged_in(&server).list_classes().await.unwrap();
    assert_eq!(Class::labels(&classes), vec!["10-A"]);
}

#[tokio::test]
async fn missing_token_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server, Session::new()).list::<Event>().await.unwrap_err();
    assert!(matches!(err, ApiError::MissingCredential));
}

#[tokio::test]
async fn unauthorized_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&server)
        .await;

    let client = logged_in(&server);
    let err = client.list::<Event>().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
    assert!(!client.session().is_authenticated());

    // the next call fails locally
    let err = client.list::<Event>().await.unwrap_err();
    assert!(matches!(err, ApiError::MissingCredential));
}

#[tokio::test]
async fn error_status_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/teachers/t9"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Teacher not found"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/events/e1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = logged_in(&server);
    let err = client
        .delete::<edudesk_core::Teacher>(&RecordId::from("t9"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Teacher not found");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));

    let err = client
        .update::<Event>(&RecordId::from("e1"), &json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Server error, please try again later");
}

#[tokio::test]
async fn malformed_list_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = logged_in(&server).list::<Event>().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
