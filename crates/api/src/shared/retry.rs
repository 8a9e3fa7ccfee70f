use docbook_infra::AppointmentStoreError;
use std::{future::Future, time::Duration};
use tracing::warn;

const RETRY_BACKOFF_MILLIS: u64 = 50;

/// Runs `op` until it returns something else than
/// `AppointmentStoreError::Unavailable`, at most `attempts` times.
pub async fn with_retry<T, F, Fut>(attempts: usize, mut op: F) -> Result<T, AppointmentStoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppointmentStoreError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Err(AppointmentStoreError::Unavailable(reason)) if attempt < attempts => {
                warn!(
                    "Store unavailable on attempt {} of {}: {}. Retrying.",
                    attempt, attempts, reason
                );
                actix_web::rt::time::sleep(Duration::from_millis(
                    RETRY_BACKOFF_MILLIS * attempt as u64,
                ))
                .await;
                attempt += 1;
            }
            res => return res,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    #[actix_web::main]
    #[test]
    async fn retries_while_unavailable() {
        let calls = Cell::new(0);
        let res = with_retry(3, || {
            calls.set(calls.get() + 1);
            let call = calls.get();
            async move {
                if call < 3 {
                    Err(AppointmentStoreError::Unavailable("pool timed out".into()))
                } else {
                    Ok(call)
                }
            }
        })
        .await;
        assert_eq!(res.unwrap(), 3);
    }

    #[actix_web::main]
    #[test]
    async fn gives_up_after_attempts() {
        let calls = Cell::new(0);
        let res: Result<(), _> = with_retry(2, || {
            calls.set(calls.get() + 1);
            async { Err(AppointmentStoreError::Unavailable("pool timed out".into())) }
        })
        .await;
        assert!(matches!(res, Err(AppointmentStoreError::Unavailable(_))));
        assert_eq!(calls.get(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn does_not_retry_conflicts() {
        let calls = Cell::new(0);
        let res: Result<(), _> = with_retry(3, || {
            calls.set(calls.get() + 1);
            async { Err(AppointmentStoreError::Conflict(None)) }
        })
        .await;
        assert!(matches!(res, Err(AppointmentStoreError::Conflict(None))));
        assert_eq!(calls.get(), 1);
    }
}
