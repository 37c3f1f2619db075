//! Concurrent status loading with a fixed pool of workers

use futures::future::join_all;
use futures::FutureExt;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use super::config::worker_count;
use crate::git::{load_status, GitRepository, Status};

/// Loads statuses of many repositories at once
///
/// Workers pull repositories from a shared bounded queue and send finished
/// statuses back to the coordinator, which waits for all of them and sorts the
/// result by path.
pub struct StatusLoader {
    workers: Option<usize>,
    progress: Option<ProgressBar>,
}

impl StatusLoader {
    /// `workers` of `None` uses the default pool size
    pub fn new(workers: Option<usize>) -> Self {
        Self {
            workers,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Loads the status of every repository
    ///
    /// A failure inside one repository ends up in that status' `errors` and
    /// doesn't affect the others. The returned list is sorted by path.
    pub async fn load_all<R>(&self, repos: Vec<R>, fetch: bool) -> Vec<Status>
    where
        R: GitRepository + 'static,
    {
        let total = repos.len();
        if total == 0 {
            return Vec::new();
        }

        let workers = worker_count(self.workers, total);
        log::debug!("loading {total} repositories with {workers} workers");

        let (job_tx, job_rx) = mpsc::channel::<R>(workers);
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::channel::<Status>(workers);

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let job_rx = Arc::clone(&job_rx);
                let result_tx = result_tx.clone();
                tokio::spawn(async move {
                    loop {
                        let next = job_rx.lock().await.recv().await;
                        let Some(repo) = next else { break };
                        let status = match AssertUnwindSafe(load_status(&repo, fetch))
                            .catch_unwind()
                            .await
                        {
                            Ok(status) => status,
                            Err(payload) => crashed(&repo, payload),
                        };
                        if result_tx.send(status).await.is_err() {
                            break;
                        }
                    }
                })
            })
            .collect();
        // Workers hold the only remaining handles
        drop(job_rx);
        drop(result_tx);

        let feeder = tokio::spawn(async move {
            for repo in repos {
                if job_tx.send(repo).await.is_err() {
                    break;
                }
            }
        });

        let mut statuses = Vec::with_capacity(total);
        while statuses.len() < total {
            match result_rx.recv().await {
                Some(status) => {
                    if let Some(pb) = &self.progress {
                        pb.inc(1);
                    }
                    statuses.push(status);
                }
                None => {
                    log::error!(
                        "status loading stopped early: {} of {total} repositories missing",
                        total - statuses.len()
                    );
                    break;
                }
            }
        }

        for result in join_all(handles).await {
            if let Err(e) = result {
                log::error!("status worker failed: {e}");
            }
        }
        if let Err(e) = feeder.await {
            log::error!("status queue feeder failed: {e}");
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        statuses.par_sort_by(|a, b| a.path.as_os_str().cmp(b.path.as_os_str()));
        statuses
    }
}

/// Status of a repository whose loading panicked
fn crashed<R: GitRepository>(repo: &R, payload: Box<dyn Any + Send>) -> Status {
    let reason = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    log::error!("status loading panicked for {}: {reason}", repo.path().display());

    let mut status = Status::new(repo.path());
    status.errors.push(format!("status loading panicked: {reason}"));
    status
}
