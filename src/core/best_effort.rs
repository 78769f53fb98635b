//! Ignore-and-continue policy for host calls

use std::fmt;
use std::future::Future;

use tracing::warn;

/// The single tolerance policy for tab-mutation and icon calls: await
/// the operation, log a failure with its context label, and yield
/// `None` so the caller continues. One bad URL or an already-closed
/// tab must never abort a surrounding restore loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestEffort;

impl BestEffort {
    pub async fn run<T, E>(
        &self,
        what: &str,
        op: impl Future<Output = Result<T, E>>,
    ) -> Option<T>
    where
        E: fmt::Display,
    {
        match op.await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(operation = what, error = %e, "host call failed, continuing");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_passes_the_value_through() {
        let policy = BestEffort;
        let out = policy
            .run("noop", std::future::ready(Ok::<_, String>(7)))
            .await;
        assert_eq!(out, Some(7));
    }

    #[tokio::test]
    async fn failure_is_swallowed() {
        let policy = BestEffort;
        let out = policy
            .run("noop", std::future::ready(Err::<u32, _>("boom".to_string())))
            .await;
        assert_eq!(out, None);
    }
}
