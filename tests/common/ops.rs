//! Operation builders shared by the scenario tests.
//!
//! These mirror the shapes real callers plug in: constant leaves, string
//! concatenators that exercise dependency ordering, and operations failing
//! in each of the supported ways. Every builder yields to the runtime once
//! before settling so steps genuinely interleave.

#![allow(dead_code)]

use tokio::time::Duration;

use stepdag::{operation, OpError, Operation, Value};

/// Resolves a constant string.
pub fn constant(s: &'static str) -> Operation {
    operation(move |_| async move {
        tokio::task::yield_now().await;
        Ok(Value::from(s))
    })
}

/// Concatenates its dependencies' string values (null dependencies
/// contribute nothing) and appends `suffix`.
pub fn concat(suffix: &'static str) -> Operation {
    operation(move |deps| async move {
        tokio::task::yield_now().await;
        let mut out = String::new();
        for dep in &deps {
            match dep {
                Value::String(s) => out.push_str(s),
                Value::Null => {}
                other => out.push_str(&other.to_string()),
            }
        }
        out.push_str(suffix);
        Ok(Value::from(out))
    })
}

/// Rejects with the given value.
pub fn reject(reason: Value) -> Operation {
    operation(move |_| {
        let reason = reason.clone();
        async move {
            tokio::task::yield_now().await;
            Err(OpError::Rejected(reason))
        }
    })
}

/// Rejects with the given value after a delay.
pub fn reject_after(delay: Duration, reason: Value) -> Operation {
    operation(move |_| {
        let reason = reason.clone();
        async move {
            tokio::time::sleep(delay).await;
            Err(OpError::Rejected(reason))
        }
    })
}

/// Fails with a native error carrying the given message.
pub fn native_failure(message: &'static str) -> Operation {
    operation(move |_| async move { Err(OpError::failure(anyhow::anyhow!(message))) })
}

/// Resolves null regardless of its dependencies.
pub fn null_op() -> Operation {
    operation(|_| async {
        tokio::task::yield_now().await;
        Ok(Value::Null)
    })
}
