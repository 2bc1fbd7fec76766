// tests/url_fetch.rs

use std::net::TcpListener;
use std::sync::Arc;

use exechook::exec::{CommandOutcome, Pipeline, RealExecutorBackend, SubstitutionContext};
use exechook::fs::mock::MockFileSystem;
use exechook::types::EventKind;
use exechook_test_utils::builders::CommandRecordBuilder;
use exechook_test_utils::init_tracing;
use httpmock::prelude::*;

fn ctx() -> SubstitutionContext {
    SubstitutionContext {
        id: "abc".into(),
        name: "x".into(),
        download_location: "/d".into(),
        label: "tv".into(),
    }
}

fn pipeline() -> Pipeline {
    Pipeline::new(
        Arc::new(RealExecutorBackend::new()),
        Arc::new(MockFileSystem::new()),
    )
}

#[tokio::test]
async fn successful_get_is_fetched() {
    init_tracing();

    let server = MockServer::start_async().await;
    let hook = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/hook")
                .query_param("id", "abc")
                .query_param("label", "tv");
            then.status(200).body("ok");
        })
        .await;

    let line = format!("{}?id=<id>&label=<lb>", server.url("/hook"));
    let record = CommandRecordBuilder::new("u", EventKind::Complete, &line)
        .url()
        .build();

    let outcome = pipeline().run(&record, &ctx()).await;

    assert_eq!(outcome, CommandOutcome::Fetched);
    hook.assert_async().await;
}

#[tokio::test]
async fn error_status_is_a_failed_outcome() {
    init_tracing();

    let server = MockServer::start_async().await;
    let hook = server
        .mock_async(|when, then| {
            when.method(GET).path("/broken");
            then.status(500).body("boom");
        })
        .await;

    let record = CommandRecordBuilder::new("u", EventKind::Complete, &server.url("/broken"))
        .url()
        .build();

    let outcome = pipeline().run(&record, &ctx()).await;

    assert!(matches!(outcome, CommandOutcome::Failed(_)));
    hook.assert_async().await;
}

#[tokio::test]
async fn refused_connection_is_a_failed_outcome() {
    init_tracing();

    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let line = format!("http://127.0.0.1:{port}/nothing-here");
    let record = CommandRecordBuilder::new("u", EventKind::Complete, &line)
        .url()
        .build();

    let outcome = pipeline().run(&record, &ctx()).await;

    assert!(matches!(outcome, CommandOutcome::Failed(_)));
}

#[tokio::test]
async fn unparsable_url_is_a_failed_outcome() {
    init_tracing();

    let record = CommandRecordBuilder::new("u", EventKind::Complete, "not a url <id>")
        .url()
        .build();

    assert!(matches!(
        pipeline().run(&record, &ctx()).await,
        CommandOutcome::Failed(_)
    ));
}
