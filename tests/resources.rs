//
//  bcr-api
//  tests/resources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/14.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

mod common;

use bcr_api::resources::{
    CategoryDraft, DateRange, GroupSpec, QueryDraft, ResourceId, ResourceRef, Sharing, TagDraft,
};
use bcr_api::{ApiError, WorkflowStage};
use chrono::NaiveDate;
use common::*;
use mockito::Matcher;
use serde_json::json;

const BRAND_QUERY: &str = r#"{"id": 42, "name": "Brand", "booleanQuery": "acme", "languages": ["en"], "type": "search string"}"#;

fn since() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

#[tokio::test]
async fn test_create_with_missing_fields_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let post = server
        .mock("POST", path("queries").as_str())
        .expect(0)
        .create_async()
        .await;

    let err = project
        .queries()
        .create(&QueryDraft::new("", ""))
        .await
        .unwrap_err();

    let ApiError::Validation(errors) = &err else {
        panic!("expected a validation error, got {err}");
    };
    assert!(errors.for_field("name").is_some());
    assert!(errors.for_field("booleanQuery").is_some());
    post.assert_async().await;
}

#[tokio::test]
async fn test_create_then_get_uses_cached_id() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let post = server
        .mock("POST", path("queries").as_str())
        .match_body(Matcher::PartialJson(json!({
            "name": "Brand",
            "booleanQuery": "acme",
            "languages": ["en"],
            "type": "search string",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BRAND_QUERY)
        .create_async()
        .await;
    let get = server
        .mock("GET", path("queries/42").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BRAND_QUERY)
        .create_async()
        .await;
    let listing = server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let queries = project.queries();
    let handle = queries.create(&QueryDraft::new("Brand", "acme")).await.unwrap();
    assert_eq!(handle.id, ResourceId(42));
    assert_eq!(handle.kind, "query");

    let query = queries.get("Brand").await.unwrap();
    assert_eq!(query.id, ResourceId(42));
    assert_eq!(query.boolean_query.as_deref(), Some("acme"));

    post.assert_async().await;
    get.assert_async().await;
    listing.assert_async().await;
}

#[tokio::test]
async fn test_get_by_name_walks_the_listing() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let listing = server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "0".into()),
            Matcher::UrlEncoded("pageSize".into(), "100".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(r#"{"id": 41, "name": "Other"}, {"id": 42, "name": "Brand"}"#))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", path("queries/42").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BRAND_QUERY)
        .create_async()
        .await;

    let queries = project.queries();
    assert_eq!(queries.get("Brand").await.unwrap().id, ResourceId(42));
    // Second lookup is served from the cache.
    assert_eq!(queries.resolve("Other").await.unwrap(), ResourceId(41));

    listing.assert_async().await;
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let listing = server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(r#"{"id": 42, "name": "Brand"}"#))
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", path("queries/42").as_str())
        .with_status(200)
        .create_async()
        .await;

    let queries = project.queries();
    queries.delete("Brand").await.unwrap();
    delete.assert_async().await;
    assert!(queries.manager().cache().get("Brand").is_none());

    listing.remove_async().await;
    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(""))
        .create_async()
        .await;
    server
        .mock("GET", path("queries/42").as_str())
        .with_status(404)
        .with_body(r#"{"errors": [{"code": 404, "message": "Query not found"}]}"#)
        .create_async()
        .await;

    match queries.get("Brand").await.unwrap_err() {
        ApiError::NotFound { kind, name } => {
            assert_eq!(kind, "query");
            assert_eq!(name, "Brand");
        }
        other => panic!("expected NotFound, got {other}"),
    }

    let err = queries.get(ResourceId(42)).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { kind: "query", .. }));
}

#[tokio::test]
async fn test_stale_cached_id_is_looked_up_again() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let first = server
        .mock("POST", path("queries").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BRAND_QUERY)
        .create_async()
        .await;
    let listing = server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(r#"{"id": 42, "name": "Brand"}"#))
        .create_async()
        .await;
    server
        .mock("DELETE", path("queries/42").as_str())
        .with_status(200)
        .create_async()
        .await;

    // `ours` caches Brand -> 42; `theirs` deletes it and re-creates it as 43.
    let ours = project.queries();
    let theirs = project.queries();
    ours.create(&QueryDraft::new("Brand", "acme")).await.unwrap();
    theirs.delete("Brand").await.unwrap();

    first.remove_async().await;
    listing.remove_async().await;
    let recreated = r#"{"id": 43, "name": "Brand", "booleanQuery": "acme"}"#;
    server
        .mock("POST", path("queries").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(recreated)
        .create_async()
        .await;
    theirs.create(&QueryDraft::new("Brand", "acme")).await.unwrap();

    let stale = server
        .mock("GET", path("queries/42").as_str())
        .with_status(404)
        .with_body(r#"{"errors": [{"code": 404, "message": "Query not found"}]}"#)
        .expect(1)
        .create_async()
        .await;
    let relisting = server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(r#"{"id": 43, "name": "Brand"}"#))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", path("queries/43").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(recreated)
        .create_async()
        .await;

    let query = ours.get("Brand").await.unwrap();
    assert_eq!(query.id, ResourceId(43));
    assert_eq!(ours.manager().cache().get("Brand"), Some(ResourceId(43)));

    stale.assert_async().await;
    relisting.assert_async().await;
}

#[tokio::test]
async fn test_upload_of_existing_query_keeps_its_start_date() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(r#"{"id": 42, "name": "Brand"}"#))
        .create_async()
        .await;
    let update = server
        .mock("PUT", path("queries/42").as_str())
        .match_body(Matcher::Json(json!({
            "id": 42,
            "name": "Brand",
            "booleanQuery": "acme OR acmecorp",
            "description": "",
            "languages": ["en"],
            "type": "search string",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BRAND_QUERY)
        .expect(1)
        .create_async()
        .await;

    let handle = project
        .queries()
        .upload(&QueryDraft::new("Brand", "acme OR acmecorp"))
        .await
        .unwrap();
    assert_eq!(handle.id, ResourceId(42));
    update.assert_async().await;
}

#[tokio::test]
async fn test_upload_of_new_query_sends_a_start_date() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(""))
        .create_async()
        .await;
    let create = server
        .mock("POST", path("queries").as_str())
        .match_body(Matcher::Regex(r#""startDate":"\d{4}-\d{2}-\d{2}T"#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BRAND_QUERY)
        .expect(1)
        .create_async()
        .await;

    project
        .queries()
        .upload(&QueryDraft::new("Brand", "acme"))
        .await
        .unwrap();
    create.assert_async().await;
}

#[tokio::test]
async fn test_list_includes_created_queries() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let names = ["Alpha", "Beta", "Gamma"];
    for (i, name) in names.iter().enumerate() {
        server
            .mock("POST", path("queries").as_str())
            .match_body(Matcher::PartialJson(json!({ "name": name })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "id": 100 + i, "name": name }).to_string())
            .create_async()
            .await;
    }
    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(
            r#"{"id": 7, "name": "Existing"}, {"id": 100, "name": "Alpha"},
               {"id": 101, "name": "Beta"}, {"id": 102, "name": "Gamma"}"#,
        ))
        .create_async()
        .await;

    let queries = project.queries();
    for name in names {
        queries.create(&QueryDraft::new(name, "acme")).await.unwrap();
    }

    let listed = queries.list().collect_all().await.unwrap();
    assert!(listed.len() >= names.len());
    for name in names {
        assert!(listed.iter().any(|q| q.name == name), "{name} missing from listing");
    }
}

#[tokio::test]
async fn test_listing_follows_pages() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let first = server
        .mock("GET", path("tags").as_str())
        .match_query(Matcher::UrlEncoded("page".into(), "0".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"resultsTotal": 3, "resultsPage": 0, "resultsPageSize": 2,
                "results": [{"id": 1, "name": "urgent"}, {"id": 2, "name": "praise"}]}"#,
        )
        .create_async()
        .await;
    let second = server
        .mock("GET", path("tags").as_str())
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"resultsTotal": 3, "resultsPage": 1, "resultsPageSize": 2,
                "results": [{"id": 3, "name": "spam"}]}"#,
        )
        .create_async()
        .await;

    let tags = project.tags();
    let mut listing = tags.list();
    assert_eq!(listing.next_page().await.unwrap().unwrap().len(), 2);
    assert!(!listing.is_exhausted());
    assert_eq!(listing.next_page().await.unwrap().unwrap().len(), 1);
    assert!(listing.next_page().await.unwrap().is_none());

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(tags.cache().len(), 3);
}

#[tokio::test]
async fn test_workflow_stops_at_validation() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    server
        .mock("GET", "/query-validation")
        .match_query(Matcher::UrlEncoded("query".into(), "acme AND (".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errors": [{"code": 1, "message": "Unbalanced brackets"}]}"#)
        .create_async()
        .await;
    let listing = server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let post = server
        .mock("POST", Matcher::Regex(format!("^/projects/{}/", PROJECT_ID)))
        .expect(0)
        .create_async()
        .await;

    let err = project
        .queries()
        .upload_and_backfill(&QueryDraft::new("Brand", "acme AND ("), &DateRange::since(since()))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(WorkflowStage::Validate));
    let ApiError::Validation(errors) = err.root() else {
        panic!("expected a validation error, got {err}");
    };
    assert_eq!(
        errors.for_field("booleanQuery").unwrap().message,
        "Unbalanced brackets"
    );

    listing.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn test_workflow_rejects_future_backfill_before_validating() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let validation = server
        .mock("GET", "/query-validation")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let tomorrow = chrono::Utc::now().date_naive() + chrono::Duration::days(1);
    let err = project
        .queries()
        .upload_and_backfill(&QueryDraft::new("Brand", "acme"), &DateRange::since(tomorrow))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(WorkflowStage::Validate));
    assert!(err.is_validation());
    validation.assert_async().await;
}

#[tokio::test]
async fn test_workflow_uploads_and_backfills() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let validation = server
        .mock("GET", "/query-validation")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "acme".into()),
            Matcher::UrlEncoded("language".into(), "en".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errors": []}"#)
        .create_async()
        .await;
    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page(""))
        .create_async()
        .await;
    let create = server
        .mock("POST", path("queries").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BRAND_QUERY)
        .create_async()
        .await;
    let backfill = server
        .mock("POST", path("queries/42/backfill").as_str())
        .match_body(Matcher::Json(json!({ "minDate": "2025-01-01" })))
        .with_status(200)
        .create_async()
        .await;

    let handle = project
        .queries()
        .upload_and_backfill(&QueryDraft::new("Brand", "acme"), &DateRange::since(since()))
        .await
        .unwrap();
    assert_eq!(handle.id, ResourceId(42));

    validation.assert_async().await;
    create.assert_async().await;
    backfill.assert_async().await;
}

#[tokio::test]
async fn test_backfill_failure_reports_backfill_stage() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    server
        .mock("GET", "/query-validation")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"errors": []}"#)
        .create_async()
        .await;
    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page(r#"{"id": 42, "name": "Brand"}"#))
        .create_async()
        .await;
    let update = server
        .mock("PUT", path("queries/42").as_str())
        .match_body(Matcher::PartialJson(json!({ "id": 42, "name": "Brand" })))
        .with_status(200)
        .with_body(BRAND_QUERY)
        .create_async()
        .await;
    server
        .mock("POST", path("queries/42/backfill").as_str())
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let err = project
        .queries()
        .upload_and_backfill(&QueryDraft::new("Brand", "acme"), &DateRange::since(since()))
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Some(WorkflowStage::Backfill));
    assert!(matches!(err.root(), ApiError::ServerError(_)));
    update.assert_async().await;
}

#[tokio::test]
async fn test_backfill_unknown_query_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page(""))
        .create_async()
        .await;

    let err = project
        .queries()
        .backfill("Ghost", &DateRange::since(since()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { kind: "query", .. }));
}

#[tokio::test]
async fn test_group_create_resolves_query_names() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page(r#"{"id": 42, "name": "Brand"}, {"id": 43, "name": "Rival"}"#))
        .create_async()
        .await;
    let create = server
        .mock("POST", path("querygroups").as_str())
        .match_body(Matcher::Json(json!({
            "name": "Competitors",
            "queries": [{"id": 42}, {"id": 43}],
            "shared": "private",
        })))
        .with_status(200)
        .with_body(
            r#"{"id": 9, "name": "Competitors", "shared": "private",
                "queries": [{"id": 42, "name": "Brand"}, {"id": 43, "name": "Rival"}]}"#,
        )
        .create_async()
        .await;

    let draft = GroupSpec::new("Competitors", ["Brand", "Rival"]).shared(Sharing::Private);
    let handle = project.groups().create(&draft).await.unwrap();
    assert_eq!(handle.id, ResourceId(9));
    assert_eq!(handle.kind, "group");
    create.assert_async().await;
}

#[tokio::test]
async fn test_group_with_unknown_query_is_not_created() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    server
        .mock("GET", path("queries").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(page(r#"{"id": 42, "name": "Brand"}"#))
        .create_async()
        .await;
    let create = server
        .mock("POST", path("querygroups").as_str())
        .expect(0)
        .create_async()
        .await;

    let draft = GroupSpec::new("Competitors", vec![ResourceRef::from("Brand"), "Ghost".into()]);
    let err = project.groups().create(&draft).await.unwrap_err();
    match err {
        ApiError::NotFound { kind, name } => {
            assert_eq!(kind, "query");
            assert_eq!(name, "Ghost");
        }
        other => panic!("expected NotFound, got {other}"),
    }
    create.assert_async().await;
}

#[tokio::test]
async fn test_group_members() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    server
        .mock("GET", path("querygroups/9").as_str())
        .with_status(200)
        .with_body(r#"{"id": 9, "name": "Competitors", "queries": [{"id": 42}, {"id": 43}]}"#)
        .create_async()
        .await;

    let members = project.groups().members(ResourceId(9)).await.unwrap();
    assert_eq!(members, vec![ResourceId(42), ResourceId(43)]);
}

#[tokio::test]
async fn test_tag_create_and_delete() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let create = server
        .mock("POST", path("tags").as_str())
        .match_body(Matcher::Json(json!({ "name": "urgent" })))
        .with_status(200)
        .with_body(r#"{"id": 5, "name": "urgent"}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", path("tags/5").as_str())
        .with_status(204)
        .create_async()
        .await;

    let tags = project.tags();
    tags.create(&TagDraft::new("urgent")).await.unwrap();
    tags.delete("urgent").await.unwrap();

    create.assert_async().await;
    delete.assert_async().await;
    assert!(tags.cache().is_empty());
}

#[tokio::test]
async fn test_category_with_duplicate_children_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let create = server
        .mock("POST", path("categories").as_str())
        .expect(0)
        .create_async()
        .await;

    let draft = CategoryDraft::new("Sentiment", ["Happy", "Sad", "Happy"]);
    let err = project.categories().create(&draft).await.unwrap_err();
    assert!(err.is_validation());
    create.assert_async().await;
}

#[tokio::test]
async fn test_category_create() {
    let mut server = mockito::Server::new_async().await;
    let project = project(&mut server).await;

    let create = server
        .mock("POST", path("categories").as_str())
        .match_body(Matcher::Json(json!({
            "name": "Sentiment",
            "multiple": false,
            "children": [{"name": "Happy"}, {"name": "Sad"}],
        })))
        .with_status(200)
        .with_body(
            r#"{"id": 3, "name": "Sentiment", "multiple": false,
                "children": [{"id": 31, "name": "Happy"}, {"id": 32, "name": "Sad"}]}"#,
        )
        .create_async()
        .await;

    let draft = CategoryDraft::new("Sentiment", ["Happy", "Sad"]).single_choice();
    let handle = project.categories().create(&draft).await.unwrap();
    assert_eq!(handle.id, ResourceId(3));
    create.assert_async().await;
}
