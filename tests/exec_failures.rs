// tests/exec_failures.rs

mod common;
use crate::common::ops::{concat, constant, native_failure, null_op, reject, reject_after};
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::time::Duration;

use stepdag::{operation, Scheduler, SchedulerConfig, StepFailure, StepdagError, Value};

fn step_failure(err: StepdagError) -> StepFailure {
    match err {
        StepdagError::Step(failure) => failure,
        other => panic!("expected step failure, got {other:?}"),
    }
}

#[tokio::test]
async fn top_level_rejection_is_normalized() {
    init_tracing();

    let config = SchedulerConfig::new()
        .step("getA", constant("A"))
        .step_with_deps("oneDep", ["getA"], concat("C"))
        .step(
            "topLevelRejection",
            reject(Value::from("top level rejection reason")),
        );
    let scheduler = Scheduler::new(config).unwrap();

    let err = with_timeout(scheduler.exec(vec![]))
        .await
        .expect_err("invocation should fail");
    let failure = step_failure(err);

    assert_eq!(failure.step, "topLevelRejection");
    assert_eq!(failure.message, "top level rejection reason");
    assert_eq!(failure.reason, Value::from("top level rejection reason"));
    assert!(failure.is_rejection());
}

#[tokio::test]
async fn rejection_in_dependent_step_carries_its_own_name() {
    init_tracing();

    let config = SchedulerConfig::new()
        .step("getA", constant("A"))
        .step("getB", constant("B"))
        .step_with_deps(
            "dependentRejection",
            ["getB"],
            reject(Value::from("dependent rejection reason")),
        );
    let scheduler = Scheduler::new(config).unwrap();

    let err = with_timeout(scheduler.exec(vec![]))
        .await
        .expect_err("invocation should fail");
    let failure = step_failure(err);

    assert_eq!(failure.step, "dependentRejection");
    assert_eq!(failure.message, "dependent rejection reason");
    assert_eq!(failure.reason, Value::from("dependent rejection reason"));
}

#[tokio::test]
async fn downstream_step_adopts_the_originating_failure() {
    init_tracing();

    // dependsOnRejected never produces its own error; the surfaced failure
    // must keep topLevelRejection's tag and reason.
    let config = SchedulerConfig::new()
        .step("getA", constant("A"))
        .step("getB", constant("B"))
        .step(
            "topLevelRejection",
            reject(Value::from("top level rejection reason")),
        )
        .step_with_deps("dependsOnRejected", ["topLevelRejection"], null_op());
    let scheduler = Scheduler::new(config).unwrap();

    let err = with_timeout(scheduler.exec(vec![]))
        .await
        .expect_err("invocation should fail");
    let failure = step_failure(err);

    assert_eq!(failure.step, "topLevelRejection");
    assert_eq!(failure.message, "top level rejection reason");
    assert_eq!(failure.reason, Value::from("top level rejection reason"));
}

#[tokio::test]
async fn poisoned_step_skips_its_operation() {
    init_tracing();

    let invoked = Arc::new(AtomicBool::new(false));
    let witness = Arc::clone(&invoked);

    let config = SchedulerConfig::new()
        .step("failing", reject(Value::from("boom")))
        .step_with_deps(
            "downstream",
            ["failing"],
            operation(move |_| {
                let witness = Arc::clone(&witness);
                async move {
                    witness.store(true, Ordering::SeqCst);
                    Ok(Value::Null)
                }
            }),
        );
    let scheduler = Scheduler::new(config).unwrap();

    let err = with_timeout(scheduler.exec(vec![]))
        .await
        .expect_err("invocation should fail");
    let failure = step_failure(err);

    assert_eq!(failure.step, "failing");
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn non_string_rejection_has_empty_message() {
    init_tracing();

    let reason = serde_json::json!({ "arbitrary": "object" });

    let config = SchedulerConfig::new()
        .step("getA", constant("A"))
        .step("getB", constant("B"))
        .step_with_deps("nonStringRejection", ["getB"], reject(reason.clone()));
    let scheduler = Scheduler::new(config).unwrap();

    let err = with_timeout(scheduler.exec(vec![]))
        .await
        .expect_err("invocation should fail");
    let failure = step_failure(err);

    assert_eq!(failure.step, "nonStringRejection");
    assert_eq!(failure.message, "");
    assert_eq!(failure.reason, reason);
    assert!(failure.is_rejection());
}

#[tokio::test]
async fn native_error_keeps_its_message_and_null_reason() {
    init_tracing();

    let config = SchedulerConfig::new()
        .step("getA", constant("A"))
        .step("getB", constant("B"))
        .step("exceptionError", native_failure("notafunction is not defined"));
    let scheduler = Scheduler::new(config).unwrap();

    let err = with_timeout(scheduler.exec(vec![]))
        .await
        .expect_err("invocation should fail");
    let failure = step_failure(err);

    assert_eq!(failure.step, "exceptionError");
    assert_eq!(failure.message, "notafunction is not defined");
    assert_eq!(failure.reason, Value::Null);
    assert!(!failure.is_rejection());
    assert!(failure.source().is_some());
}

#[tokio::test]
async fn unknown_dependency_name_resolves_null_not_error() {
    init_tracing();

    let config = SchedulerConfig::new()
        .step("getA", constant("A"))
        .step_with_deps("usesMissing", ["getA", "noSuchStep"], concat("Z"));
    let scheduler = Scheduler::new(config).unwrap();

    let out = with_timeout(scheduler.exec(vec![])).await.unwrap();

    // The null placeholder contributes nothing to the concatenation.
    assert_eq!(out["usesMissing"], Value::from("AZ"));
}

#[tokio::test]
async fn first_settled_failure_wins_regardless_of_declaration_order() {
    init_tracing();

    // slowFail is declared first but settles last; the surfaced error must
    // be the failure that settled first, not the one declared first.
    let config = SchedulerConfig::new()
        .step(
            "slowFail",
            reject_after(Duration::from_millis(100), Value::from("slow reason")),
        )
        .step("fastFail", reject(Value::from("fast reason")));
    let scheduler = Scheduler::new(config).unwrap();

    let err = with_timeout(scheduler.exec(vec![]))
        .await
        .expect_err("invocation should fail");
    let failure = step_failure(err);

    assert_eq!(failure.step, "fastFail");
    assert_eq!(failure.reason, Value::from("fast reason"));
}

#[tokio::test]
async fn slow_siblings_still_run_to_completion_after_a_failure() {
    init_tracing();

    let finished = Arc::new(AtomicBool::new(false));
    let witness = Arc::clone(&finished);

    let config = SchedulerConfig::new()
        .step("failing", reject(Value::from("boom")))
        .step(
            "slow",
            operation(move |_| {
                let witness = Arc::clone(&witness);
                async move {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    witness.store(true, Ordering::SeqCst);
                    Ok(Value::from("done"))
                }
            }),
        );
    let scheduler = Scheduler::new(config).unwrap();

    let err = with_timeout(scheduler.exec(vec![]))
        .await
        .expect_err("invocation should fail");
    let failure = step_failure(err);

    // exec only returns once every slot settled, so the slow sibling has
    // finished even though its result is superseded by the failure.
    assert_eq!(failure.step, "failing");
    assert!(finished.load(Ordering::SeqCst));
}
