//! Log tailer protocol

use std::cell::RefCell;
use std::future::{ready, Ready};
use std::time::Duration;

use serde_json::json;

use freight_cli::errors::FreightError;
use freight_cli::tail::{self, Options, WAITING_PLACEHOLDER};
use freight_cli::task::TaskReference;

use crate::support::{client, url};

fn task() -> TaskReference {
    TaskReference::parse("web/production#42").unwrap()
}

#[tokio::test]
async fn test_empty_then_filled() {
    let client = client();
    client
        .transport()
        .push_json(200, json!({"chunks": [], "nextOffset": 10}))
        .push_json(200, json!({"chunks": [{"text": "hello"}], "nextOffset": 15}))
        .push_json(200, json!({"chunks": [], "nextOffset": 15}));

    let sleeps = RefCell::new(Vec::new());
    let sleep_fn = |d: Duration| -> Ready<()> {
        sleeps.borrow_mut().push(d);
        ready(())
    };
    let mut out = Vec::new();

    let err = tail::run(&client, &task(), &Options::default(), &mut out, sleep_fn)
        .await
        .unwrap_err();
    assert!(matches!(err, FreightError::Transport(_)));

    let output = String::from_utf8(out).unwrap();
    assert_eq!(output, format!("{}hello", WAITING_PLACEHOLDER));
    assert_eq!(output.matches(WAITING_PLACEHOLDER).count(), 1);

    assert_eq!(
        client.transport().urls(),
        vec![
            url("/deploys/web/production/42/log/?offset=-1&limit=1000"),
            url("/deploys/web/production/42/log/?offset=10"),
            url("/deploys/web/production/42/log/?offset=15"),
            url("/deploys/web/production/42/log/?offset=15"),
        ]
    );
    assert_eq!(*sleeps.borrow(), vec![Duration::from_millis(100); 2]);
}

#[tokio::test]
async fn test_initial_content_and_flat_text_schema() {
    let client = client();
    client
        .transport()
        .push_json(200, json!({"text": "line 1\n", "nextOffset": 7}))
        .push_json(200, json!({"text": "line 2\n", "nextOffset": 14}));

    let options = Options {
        interval: Duration::from_secs(2),
        initial_limit: 50,
    };
    let mut out = Vec::new();
    let _ = tail::run(&client, &task(), &options, &mut out, |_| ready(())).await;

    assert_eq!(String::from_utf8(out).unwrap(), "line 1\nline 2\n");
    assert_eq!(
        client.transport().urls()[0],
        url("/deploys/web/production/42/log/?offset=-1&limit=50")
    );
    assert_eq!(
        client.transport().urls()[2],
        url("/deploys/web/production/42/log/?offset=14")
    );
}

#[tokio::test]
async fn test_opaque_string_cursor_is_echoed() {
    let client = client();
    client
        .transport()
        .push_json(200, json!({"chunks": [{"text": "a"}], "nextOffset": "c:0001"}));

    let mut out = Vec::new();
    let _ = tail::run(&client, &task(), &Options::default(), &mut out, |_| ready(())).await;

    assert_eq!(
        client.transport().urls()[1],
        url("/deploys/web/production/42/log/?offset=c:0001")
    );
}

#[tokio::test]
async fn test_api_error_stops_tail() {
    let client = client();
    client
        .transport()
        .push_json(200, json!({"chunks": [{"text": "a"}, {"text": "b"}], "nextOffset": 2}))
        .push_json(404, json!({"error": "deploy not found"}));

    let mut out = Vec::new();
    let err = tail::run(&client, &task(), &Options::default(), &mut out, |_| ready(()))
        .await
        .unwrap_err();

    match err {
        FreightError::Api(e) => assert_eq!(e.code, 404),
        other => panic!("expected api error, got {other:?}"),
    }
    assert_eq!(String::from_utf8(out).unwrap(), "ab");
    assert_eq!(client.transport().calls(), 2);
}
