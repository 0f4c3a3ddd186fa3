use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How a failed attempt should be treated by [`retry`].
#[derive(Debug)]
pub enum RetryError<E> {
    /// Transient failure, worth another attempt after the cooldown.
    Transient(E),
    /// Fatal failure, retrying will not help. Returned immediately.
    Fatal(E),
}

/// Run `f` until it succeeds or `attempt_limit` attempts are exhausted,
/// sleeping `cooldown` between attempts and growing it by `backoff_factor`
/// after each sleep.
///
/// A `backoff_factor` of 0.0 keeps the cooldown constant, 1.0 doubles it each
/// round, 0.5 grows it by half (100ms, 150ms, 225ms, ...). Growth compounds:
/// the cooldown is reassigned, not recomputed from the initial value, with
/// integer-millisecond arithmetic. No sleep happens after the final attempt.
///
/// `context` is only included in log output.
pub async fn retry<T, E, F, Fut>(
    mut cooldown: Duration,
    backoff_factor: f32,
    attempt_limit: u32,
    context: &str,
    mut f: F,
) -> Result<T, E>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RetryError<E>>>,
{
    let attempt_limit = attempt_limit.max(1);
    let mut attempt = 1;
    loop {
        let err = match f().await {
            Ok(value) => return Ok(value),
            Err(RetryError::Fatal(err)) => {
                tracing::warn!(
                    context,
                    attempt_done_count = attempt,
                    error_message = %err,
                    "retry_attempt fatal"
                );
                return Err(err);
            }
            Err(RetryError::Transient(err)) => err,
        };

        tracing::warn!(
            context,
            attempt_done_count = attempt,
            attempt_limit,
            cooldown_ms = cooldown.as_millis() as u64,
            error_message = %err,
            "retry_attempt"
        );

        if attempt >= attempt_limit {
            tracing::error!(context, attempt_limit, error_message = %err, "retry_attempt exhausted");
            return Err(err);
        }

        tokio::time::sleep(cooldown).await;
        cooldown += Duration::from_millis((cooldown.as_millis() as f32 * backoff_factor) as u64);
        attempt += 1;
    }
}
