// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use painel_activity::{ActivityEvent, ActivityKind, Availability};

use super::helpers::MockRpcClient;
use crate::functions::REGISTER_ACTIVITY;
use crate::{ActivityLogger, LogOutcome, RpcError};

fn create_test_event() -> ActivityEvent {
    ActivityEvent::new(ActivityKind::FilterChange, "Alterou a praça")
        .with_filters(json!({ "p_praca": "Rio" }))
}

#[tokio::test]
async fn test_event_is_recorded() {
    let client: Arc<MockRpcClient> =
        Arc::new(MockRpcClient::new().respond(REGISTER_ACTIVITY, Value::Null));
    let logger = ActivityLogger::new(Arc::clone(&client));

    assert_eq!(logger.log(&create_test_event()).await, LogOutcome::Recorded);
    assert_eq!(logger.availability().state(), Availability::Available);

    let calls = client.calls();
    assert_eq!(calls[0].0, REGISTER_ACTIVITY);
    assert_eq!(calls[0].1["p_action_type"], "filter_change");
}

#[tokio::test]
async fn test_missing_function_is_skipped_until_retry() {
    let client: Arc<MockRpcClient> = Arc::new(MockRpcClient::new());
    let logger = ActivityLogger::with_retry_interval(Arc::clone(&client), Duration::from_secs(600));

    assert_eq!(logger.log(&create_test_event()).await, LogOutcome::Failed);
    assert_eq!(logger.availability().state(), Availability::Unavailable);

    assert_eq!(logger.log(&create_test_event()).await, LogOutcome::Skipped);
    assert_eq!(logger.log(&create_test_event()).await, LogOutcome::Skipped);
    assert_eq!(client.call_count(REGISTER_ACTIVITY), 1);
}

#[tokio::test]
async fn test_missing_function_is_retried_after_interval() {
    let client: Arc<MockRpcClient> = Arc::new(MockRpcClient::new());
    let logger = ActivityLogger::with_retry_interval(Arc::clone(&client), Duration::ZERO);

    logger.log(&create_test_event()).await;
    logger.log(&create_test_event()).await;

    assert_eq!(client.call_count(REGISTER_ACTIVITY), 2);
}

#[tokio::test]
async fn test_transient_failure_does_not_disable_logging() {
    let client: Arc<MockRpcClient> = Arc::new(MockRpcClient::new().fail(
        REGISTER_ACTIVITY,
        RpcError::Transport(String::from("connection reset")),
    ));
    let logger = ActivityLogger::new(Arc::clone(&client));

    assert_eq!(logger.log(&create_test_event()).await, LogOutcome::Failed);
    assert_eq!(logger.log(&create_test_event()).await, LogOutcome::Failed);
    assert_eq!(logger.availability().state(), Availability::Unknown);
    assert_eq!(client.call_count(REGISTER_ACTIVITY), 2);
}
