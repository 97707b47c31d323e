// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use edudesk_api::{ApiClient, ApiConfig, Session};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

pub fn client(server: &MockServer, session: Session) -> ApiClient {
    let config = ApiConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    ApiClient::new(config, session).expect("Failed to create client")
}

pub fn logged_in(server: &MockServer) -> ApiClient {
    client(server, Session::with_token(TOKEN))
}

pub fn event_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "eventName": format!("{title} event"),
        "description": "On the main ground",
        "eventType": ["Sport"],
        "startDate": "2025-03-10T00:00:00.000Z",
        "endDate": "2025-03-12T00:00:00.000Z",
        "status": "upcoming",
        "targetGroups": ["all_students"]
    })
}

pub fn teacher_json(id: &str, user_id: &str, email: &str, phone: &str) -> Value {
    json!({
        "_id": id,
        "user_id": user_id,
        "full_name": format!("Teacher {user_id}"),
        "email": email,
        "phone": phone,
        "address": "12 School Road",
        "class_teacher": ""
    })
}
