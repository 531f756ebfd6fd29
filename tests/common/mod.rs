//
//  bcr-api
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

#![allow(dead_code)]

use bcr_api::api::BcrClient;
use bcr_api::auth::Credentials;
use bcr_api::session::Project;
use mockito::{Matcher, Mock, ServerGuard};

pub const USERNAME: &str = "analyst@example.com";
pub const TOKEN: &str = "00000000-aaaa-bbbb-cccc-000000000000";
pub const PROJECT_ID: i64 = 1998173595;
pub const PROJECT_NAME: &str = "test_project";

pub fn client(server: &ServerGuard) -> BcrClient {
    BcrClient::with_base_url(&server.url()).unwrap()
}

pub async fn mock_me(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/me")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"id": 7, "username": "{}", "firstName": "Ada", "lastName": "Analyst"}}"#,
            USERNAME
        ))
        .create_async()
        .await
}

pub async fn mock_projects(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/projects")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"resultsTotal": 1, "resultsPage": 0, "resultsPageSize": 100,
                "results": [{{"id": {}, "name": "{}", "timezone": "Europe/London"}}]}}"#,
            PROJECT_ID, PROJECT_NAME
        ))
        .create_async()
        .await
}

/// Opens the test project against a mock server using a stored token.
pub async fn project(server: &mut ServerGuard) -> Project {
    mock_me(server).await;
    mock_projects(server).await;

    Project::open(
        client(server),
        Credentials::token_for(USERNAME, TOKEN),
        PROJECT_NAME,
    )
    .await
    .unwrap()
}

pub fn path(suffix: &str) -> String {
    format!("/projects/{}/{}", PROJECT_ID, suffix)
}

/// A one-page listing body.
pub fn page(results: &str) -> String {
    format!(
        r#"{{"resultsTotal": null, "resultsPage": 0, "resultsPageSize": 100, "results": [{}]}}"#,
        results
    )
}

/// Base URL of a local port nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
