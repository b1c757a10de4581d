//! Dispatching SQL through both completion protocols.

use std::sync::Arc;

use serde_json::json;
use similar_asserts::assert_eq;
use tokio::sync::oneshot;

use query_engine_execution::diagnostics::SQL_PREVIEW_KEY;
use query_engine_execution::dispatch::Dispatcher;
use query_engine_execution::error::Error;
use query_engine_execution::metrics::Metrics;
use query_engine_execution::normalize::RowSet;
use query_engine_sql::sql::string::SqlText;
use query_engine_translation::translation::context::RequestContext;
use sql_bridge_configuration::{Configuration, Dialect};
use tests_common::diagnostics::{FailingChannel, RecordingChannel};
use tests_common::driver::{MockDriver, MockDriverError};

fn dispatcher(driver: &MockDriver, dialect: Dialect, diagnostics: bool) -> Dispatcher {
    tests_common::init_logging();
    let mut configuration = Configuration::for_dialect(dialect);
    configuration.diagnostics = diagnostics;
    let metrics = Metrics::initialize(&mut prometheus::Registry::new()).unwrap();
    Dispatcher::new(Arc::new(driver.clone()), Arc::new(configuration), metrics)
}

async fn dispatch_with_callback(
    dispatcher: &Dispatcher,
    sql: &str,
    context: RequestContext,
) -> Result<RowSet, Error> {
    let (sender, receiver) = oneshot::channel();
    dispatcher.dispatch_with_callback(SqlText::from(sql), context, move |result| {
        let _ = sender.send(result);
    });
    receiver.await.expect("done was never called")
}

#[tokio::test]
async fn bare_rows_pass_through() {
    let driver = MockDriver::returning(json!([{ "id": 1 }, { "id": 2 }]));
    let dispatcher = dispatcher(&driver, Dialect::Postgres, false);

    let rows = dispatcher
        .dispatch(&SqlText::from("SELECT id FROM accounts"), &RequestContext::new())
        .await
        .unwrap();

    assert_eq!(rows, RowSet(vec![json!({ "id": 1 }), json!({ "id": 2 })]));
    assert_eq!(driver.executed(), vec!["SELECT id FROM accounts".to_string()]);
}

#[tokio::test]
async fn mysql_like_envelope_is_unwrapped() {
    let driver = MockDriver::returning(json!([[{ "a": 1 }], { "fields": [{ "name": "a" }] }]));
    let dispatcher = dispatcher(&driver, Dialect::MysqlLike, false);

    let rows = dispatcher
        .dispatch(&SqlText::from("SELECT a FROM t"), &RequestContext::new())
        .await
        .unwrap();

    assert_eq!(rows, RowSet(vec![json!({ "a": 1 })]));
}

#[tokio::test]
async fn both_protocols_yield_the_same_rows() {
    for (dialect, raw) in [
        (Dialect::Postgres, json!([{ "a": 1 }, { "a": 2 }])),
        (Dialect::MysqlLike, json!([[{ "a": 1 }, { "a": 2 }], {}])),
    ] {
        let driver = MockDriver::returning(raw);
        let dispatcher = dispatcher(&driver, dialect, false);

        let returned = dispatcher
            .dispatch(&SqlText::from("SELECT a FROM t"), &RequestContext::new())
            .await
            .unwrap();
        let called_back = dispatch_with_callback(&dispatcher, "SELECT a FROM t", RequestContext::new())
            .await
            .unwrap();

        assert_eq!(returned, called_back);
        assert_eq!(driver.executed().len(), 2);
    }
}

#[tokio::test]
async fn driver_errors_are_forwarded_unmodified() {
    let driver = MockDriver::failing("relation \"accounts\" does not exist");
    let dispatcher = dispatcher(&driver, Dialect::Postgres, false);

    let returned = dispatcher
        .dispatch(&SqlText::from("SELECT 1"), &RequestContext::new())
        .await;
    let called_back = dispatch_with_callback(&dispatcher, "SELECT 1", RequestContext::new()).await;

    for result in [returned, called_back] {
        match result {
            Err(Error::Execution(error)) => assert_eq!(
                error.downcast_ref::<MockDriverError>(),
                Some(&MockDriverError(
                    "relation \"accounts\" does not exist".to_string()
                ))
            ),
            other => panic!("expected an execution error, got {other:?}"),
        }
    }
    // executed once per call, never retried
    assert_eq!(driver.executed().len(), 2);
}

#[tokio::test]
async fn mismatched_envelope_is_a_normalization_error() {
    let driver = MockDriver::returning(json!([{ "a": 1 }]));
    let dispatcher = dispatcher(&driver, Dialect::MysqlLike, false);

    let result = dispatch_with_callback(&dispatcher, "SELECT a FROM t", RequestContext::new()).await;

    assert!(matches!(result, Err(Error::Normalization(_))));
}

#[tokio::test]
async fn sql_preview_is_written_with_escaped_newlines() {
    let driver = MockDriver::returning(json!([{ "a": 1 }]));
    let dispatcher = dispatcher(&driver, Dialect::Postgres, true);
    let channel = Arc::new(RecordingChannel::default());

    let rows = dispatcher
        .dispatch(
            &SqlText::from("SELECT\n  a\nFROM\n  t"),
            &RequestContext::with_diagnostics(channel.clone()),
        )
        .await
        .unwrap();

    assert_eq!(
        channel.get(SQL_PREVIEW_KEY),
        Some("SELECT%0A  a%0AFROM%0A  t".to_string())
    );
    assert_eq!(rows, RowSet(vec![json!({ "a": 1 })]));
    // the statement itself is executed untouched
    assert_eq!(driver.executed(), vec!["SELECT\n  a\nFROM\n  t".to_string()]);
}

#[tokio::test]
async fn sql_preview_is_not_written_unless_enabled() {
    let driver = MockDriver::returning(json!([]));
    let dispatcher = dispatcher(&driver, Dialect::Postgres, false);
    let channel = Arc::new(RecordingChannel::default());

    dispatcher
        .dispatch(
            &SqlText::from("SELECT 1"),
            &RequestContext::with_diagnostics(channel.clone()),
        )
        .await
        .unwrap();

    assert_eq!(channel.get(SQL_PREVIEW_KEY), None);
}

#[tokio::test]
async fn diagnostic_failures_do_not_fail_the_request() {
    let driver = MockDriver::returning(json!([{ "a": 1 }]));
    let dispatcher = dispatcher(&driver, Dialect::Postgres, true);

    let with_failing_channel = dispatcher
        .dispatch(
            &SqlText::from("SELECT a FROM t"),
            &RequestContext::with_diagnostics(Arc::new(FailingChannel)),
        )
        .await
        .unwrap();
    let without_channel = dispatcher
        .dispatch(&SqlText::from("SELECT a FROM t"), &RequestContext::new())
        .await
        .unwrap();

    assert_eq!(with_failing_channel, without_channel);
}
