use chunab::{
    error::SyncError,
    services::{SyncOutcome, USER_AGENT},
};

use crate::helpers::{spawn_app, Upstream, PAGE_ID, PAGE_TOKEN};

const ONE_ROW: &str = r#"[{"CandidateName":"A","PoliticalPartyName":"X","StateName":"S","TotalVoteReceived":100}]"#;

const ONE_ROW_HASH: &str = "6433c654225d03b8a85dc7753cfcf673d34f917e9df0cbc6c37eb65edae42a5f";

#[tokio::test]
async fn first_run_publishes_and_stores_hash() {
    let app = spawn_app(Upstream::json(ONE_ROW));

    let outcome = app.run_json().await.unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Published {
            hash: ONE_ROW_HASH.to_string(),
            post_id: Some("1234_5678".to_string()),
        }
    );
    assert_eq!(app.stored_hash().as_deref(), Some(ONE_ROW_HASH));

    let posts = app.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["page_id"], PAGE_ID);
    assert_eq!(posts[0]["access_token"], PAGE_TOKEN);
    assert_eq!(
        posts[0]["message"],
        "🗳️ ChunabLive – Election Update (2079)\n\n\
         📍 S\n👤 उम्मेदवार: A\n🏳️ पार्टी: X\n🗳️ मत: 100\n\
         \n\nSource: Election Commission of Nepal"
    );

    assert_eq!(app.user_agents(), vec![USER_AGENT.to_string()]);
}

#[tokio::test]
async fn identical_payload_skips_second_post() {
    let app = spawn_app(Upstream::json(ONE_ROW));

    app.run_json().await.unwrap();
    let second = app.run_json().await.unwrap();

    assert_eq!(
        second,
        SyncOutcome::Skipped {
            hash: ONE_ROW_HASH.to_string()
        }
    );
    assert_eq!(app.posts().len(), 1);
    assert_eq!(app.user_agents().len(), 2);
}

#[tokio::test]
async fn changed_votes_publish_again() {
    let app = spawn_app(Upstream::json(ONE_ROW));
    app.run_json().await.unwrap();

    app.set_upstream(Upstream::json(&ONE_ROW.replace("100", "150")));
    let outcome = app.run_json().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Published { .. }));
    assert_eq!(app.posts().len(), 2);
    assert_ne!(app.stored_hash().as_deref(), Some(ONE_ROW_HASH));
}

#[tokio::test]
async fn unrelated_field_changes_do_not_publish() {
    let app = spawn_app(Upstream::json(ONE_ROW));
    app.run_json().await.unwrap();

    app.set_upstream(Upstream::json(
        r#"[{"LastUpdated":"12:30","TotalVoteReceived":100,"StateName":"S","PoliticalPartyName":"X","CandidateName":"A"}]"#,
    ));
    let outcome = app.run_json().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Skipped { .. }));
    assert_eq!(app.posts().len(), 1);
}

#[tokio::test]
async fn upstream_error_leaves_state_untouched() {
    let app = spawn_app(Upstream::json(ONE_ROW));
    app.run_json().await.unwrap();

    app.set_upstream(Upstream {
        status: 500,
        body: "x".repeat(500),
        content_type: "text/plain",
    });
    let err = app.run_json().await.unwrap_err();

    match &err {
        SyncError::FetchStatus { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body.len(), 200);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("Fetch failed 500: "));
    assert_eq!(app.stored_hash().as_deref(), Some(ONE_ROW_HASH));
    assert_eq!(app.posts().len(), 1);
}

#[tokio::test]
async fn rows_wrapper_matches_bare_array() {
    let app = spawn_app(Upstream::json(&format!(r#"{{"rows":{}}}"#, ONE_ROW)));

    let outcome = app.run_json().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Published { ref hash, .. } if hash == ONE_ROW_HASH));
}

#[tokio::test]
async fn object_without_rows_fails_without_posting() {
    let app = spawn_app(Upstream::json(r#"{"data":[]}"#));

    let err = app.run_json().await.unwrap_err();

    assert!(matches!(err, SyncError::UnknownFormat));
    assert_eq!(err.to_string(), "Unknown election data format");
    assert!(app.posts().is_empty());
    assert_eq!(app.stored_hash(), None);
}

#[tokio::test]
async fn failed_publish_is_retried_next_run() {
    let app = spawn_app(Upstream::json(ONE_ROW));
    app.set_publish_status(400);

    let err = app.run_json().await.unwrap_err();

    match &err {
        SyncError::PublishStatus { status, body } => {
            assert_eq!(*status, 400);
            assert!(body.contains("Invalid OAuth access token."));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(app.stored_hash(), None);

    app.set_publish_status(200);
    let outcome = app.run_json().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Published { .. }));
    assert_eq!(app.posts().len(), 2);
    assert_eq!(app.posts()[0]["message"], app.posts()[1]["message"]);
}

#[tokio::test]
async fn corrupt_state_file_is_treated_as_first_run() {
    let app = spawn_app(Upstream::json(ONE_ROW));
    std::fs::write(&app.state_path, "{{{ not json").unwrap();

    let outcome = app.run_json().await.unwrap();

    assert!(matches!(outcome, SyncOutcome::Published { .. }));
    assert_eq!(app.stored_hash().as_deref(), Some(ONE_ROW_HASH));
}

#[tokio::test]
async fn only_top_three_rows_are_posted() {
    let rows: Vec<String> = (1..=5)
        .map(|i| {
            format!(
                r#"{{"CandidateName":"C{i}","PoliticalPartyName":"P","StateName":"S","TotalVoteReceived":{}}}"#,
                1000 - i
            )
        })
        .collect();
    let app = spawn_app(Upstream::json(&format!("[{}]", rows.join(","))));

    app.run_json().await.unwrap();

    let posts = app.posts();
    let message = &posts[0]["message"];
    assert_eq!(message.matches("👤 उम्मेदवार:").count(), 3);
    assert!(message.contains("C3"));
    assert!(!message.contains("C4"));
}
