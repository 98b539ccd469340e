//! Fixed-size worker group fed from a task channel.
//!
//! All tasks are queued up front; `worker_count` workers pull from the
//! shared receiver until it is drained. Each task runs on the blocking pool
//! (curl transfers block). A panicking task is reported as
//! [`KeywordOutcome::Crashed`] and its worker carries on with the next task.

use std::any::Any;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use super::pipeline::{KeywordOutcome, KeywordPipeline, TaskResult};
use super::plan::DownloadTask;

/// Runs every task through `pipeline` with up to `worker_count` in flight.
/// Waits for all of them; results are sorted by keyword.
pub async fn run_tasks(
    tasks: Vec<DownloadTask>,
    pipeline: KeywordPipeline,
    worker_count: usize,
) -> Vec<TaskResult> {
    let pipeline = Arc::new(pipeline);
    run_with(tasks, worker_count, move |task| pipeline.process(task)).await
}

/// Same as [`run_tasks`] with an arbitrary blocking task body.
pub async fn run_with<F>(tasks: Vec<DownloadTask>, worker_count: usize, work: F) -> Vec<TaskResult>
where
    F: Fn(&DownloadTask) -> KeywordOutcome + Send + Sync + 'static,
{
    let total = tasks.len();
    if total == 0 {
        return Vec::new();
    }
    let worker_count = worker_count.max(1).min(total);

    let (task_tx, task_rx) = mpsc::channel::<DownloadTask>(total);
    for task in tasks {
        // Capacity equals the task count and the receiver is alive: never fails.
        if task_tx.send(task).await.is_err() {
            break;
        }
    }
    drop(task_tx);

    let task_rx = Arc::new(Mutex::new(task_rx));
    let work = Arc::new(work);
    let mut join_set = JoinSet::new();

    for worker_id in 0..worker_count {
        let task_rx = Arc::clone(&task_rx);
        let work = Arc::clone(&work);
        join_set.spawn(async move {
            let mut done = Vec::new();
            loop {
                let next = task_rx.lock().await.recv().await;
                let Some(task) = next else {
                    break;
                };
                let keyword = task.keyword.clone();
                let work = Arc::clone(&work);
                let outcome = match tokio::task::spawn_blocking(move || (*work)(&task)).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        let reason = if e.is_panic() {
                            panic_message(e.into_panic())
                        } else {
                            e.to_string()
                        };
                        tracing::error!(worker_id, "task for {} crashed: {}", keyword, reason);
                        KeywordOutcome::Crashed(reason)
                    }
                };
                done.push(TaskResult { keyword, outcome });
            }
            tracing::debug!(worker_id, tasks = done.len(), "worker finished");
            done
        });
    }

    let mut results = Vec::with_capacity(total);
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(batch) => results.extend(batch),
            Err(e) => tracing::error!("worker join: {}", e),
        }
    }
    results.sort_by(|a, b| a.keyword.cmp(&b.keyword));
    tracing::info!("Task ended. {} of {} task(s) returned", results.len(), total);
    results
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::KeywordSummary;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn tasks(keywords: &[&str]) -> Vec<DownloadTask> {
        keywords
            .iter()
            .map(|k| DownloadTask::new(k, Path::new("download"), "naver"))
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn every_task_runs_once() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let results = run_with(tasks(&["d", "b", "a", "c"]), 3, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            KeywordOutcome::Completed(KeywordSummary::default())
        })
        .await;

        assert_eq!(seen.load(Ordering::SeqCst), 4);
        let keywords: Vec<_> = results.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["a", "b", "c", "d"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrency_is_bounded_by_worker_count() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (r, p) = (Arc::clone(&running), Arc::clone(&peak));
        let results = run_with(tasks(&["a", "b", "c", "d", "e", "f"]), 2, move |_| {
            let now = r.fetch_add(1, Ordering::SeqCst) + 1;
            p.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(30));
            r.fetch_sub(1, Ordering::SeqCst);
            KeywordOutcome::Completed(KeywordSummary::default())
        })
        .await;

        assert_eq!(results.len(), 6);
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn panicking_task_does_not_stop_siblings() {
        let results = run_with(tasks(&["boom", "cat", "dog"]), 1, |task| {
            if task.keyword == "boom" {
                panic!("driver exploded");
            }
            KeywordOutcome::Completed(KeywordSummary::default())
        })
        .await;

        assert_eq!(results.len(), 3);
        match &results[0].outcome {
            KeywordOutcome::Crashed(reason) => assert!(reason.contains("driver exploded")),
            other => panic!("expected Crashed, got {:?}", other),
        }
        assert!(matches!(results[1].outcome, KeywordOutcome::Completed(_)));
        assert!(matches!(results[2].outcome, KeywordOutcome::Completed(_)));
    }

    #[tokio::test]
    async fn no_tasks_returns_immediately() {
        let results = run_with(Vec::new(), 4, |_| {
            KeywordOutcome::Completed(KeywordSummary::default())
        })
        .await;
        assert!(results.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn zero_workers_still_runs() {
        let results = run_with(tasks(&["a", "b"]), 0, |_| {
            KeywordOutcome::ProviderFailed("offline".into())
        })
        .await;
        assert_eq!(results.len(), 2);
    }
}
