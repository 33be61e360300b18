//! Join-all with per-task failure isolation.

use std::future::Future;

use futures::future::join_all;

/// Terminal state of one keyed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled<K, T, E> {
    pub key: K,
    pub result: Result<T, E>,
}

/// Drive every task concurrently and resolve once all of them have reached
/// a terminal state. Never short-circuits on the first failure or success.
///
/// Results come back in input order, whatever the completion order was.
pub async fn settle_all<K, T, E, F, I>(tasks: I) -> Vec<Settled<K, T, E>>
where
    I: IntoIterator<Item = (K, F)>,
    F: Future<Output = Result<T, E>>,
{
    join_all(
        tasks
            .into_iter()
            .map(|(key, task)| async move { Settled { key, result: task.await } }),
    )
    .await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn waits_for_every_task_and_keeps_input_order() {
        let delayed = |ms: u64, result: Result<u32, &'static str>| async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            result
        };

        let started = tokio::time::Instant::now();
        let settled = settle_all(vec![
            ("slow-ok", delayed(300, Ok(1))),
            ("fast-err", delayed(10, Err("boom"))),
            ("mid-ok", delayed(100, Ok(3))),
        ])
        .await;

        assert!(started.elapsed() >= Duration::from_millis(300));
        assert_eq!(
            settled,
            vec![
                Settled {
                    key: "slow-ok",
                    result: Ok(1)
                },
                Settled {
                    key: "fast-err",
                    result: Err("boom")
                },
                Settled {
                    key: "mid-ok",
                    result: Ok(3)
                },
            ]
        );
    }

    #[tokio::test]
    async fn empty_input_settles_immediately() {
        let settled: Vec<Settled<(), (), ()>> =
            settle_all(Vec::<((), futures::future::Ready<Result<(), ()>>)>::new()).await;
        assert!(settled.is_empty());
    }
}
