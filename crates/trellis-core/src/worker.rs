//! Background execution of [`AlgorithmJob`]s on a thread pool.
//!
//! Jobs carry their own copy of the graph, so the live graph is never read from a worker
//! thread. There is no cancellation: a spawned job always runs to completion.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::executor::ThreadPool;
use futures::future::{self, BoxFuture};
use futures::task::SpawnExt;
use futures::FutureExt;

use crate::algorithm::{AlgorithmJob, AlgorithmKind, AlgorithmOutcome};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct AlgorithmWorker {
    pool: ThreadPool,
}

impl AlgorithmWorker {
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPool::builder()
            .pool_size(threads.max(1))
            .name_prefix("trellis-worker-")
            .create()
            .map_err(|err| Error::Worker {
                message: format!("failed to start worker pool: {err}"),
            })?;
        Ok(Self { pool })
    }

    /// Starts `job` in the background. Panics inside the job resolve to an
    /// [`Error::Worker`] outcome.
    pub fn spawn(&self, job: AlgorithmJob) -> AlgorithmTask {
        let kind = job.kind;
        let work = async move {
            let output = match std::panic::catch_unwind(AssertUnwindSafe(|| job.execute())) {
                Ok(output) => output,
                Err(payload) => Err(Error::Worker {
                    message: panic_message(payload.as_ref()),
                }),
            };
            AlgorithmOutcome { kind, output }
        };

        match self.pool.spawn_with_handle(work) {
            Ok(handle) => AlgorithmTask {
                kind,
                inner: handle.boxed(),
            },
            Err(err) => {
                tracing::warn!(%kind, error = %err, "failed to spawn algorithm job");
                AlgorithmTask::ready(AlgorithmOutcome {
                    kind,
                    output: Err(Error::Worker {
                        message: err.to_string(),
                    }),
                })
            }
        }
    }
}

/// Resolves to the outcome of a background job. Dropping the task also drops the job.
pub struct AlgorithmTask {
    kind: AlgorithmKind,
    inner: BoxFuture<'static, AlgorithmOutcome>,
}

impl AlgorithmTask {
    pub(crate) fn ready(outcome: AlgorithmOutcome) -> Self {
        Self {
            kind: outcome.kind,
            inner: future::ready(outcome).boxed(),
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }
}

impl std::fmt::Debug for AlgorithmTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmTask")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl Future for AlgorithmTask {
    type Output = AlgorithmOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "algorithm panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use trellis_graph::{Edge, Graph};

    use crate::algorithm::AlgorithmResult;

    fn job(kind: AlgorithmKind, graph: Graph) -> AlgorithmJob {
        AlgorithmJob {
            kind,
            graph,
            start: None,
            end: None,
            layout: Default::default(),
        }
    }

    #[test]
    fn runs_jobs_off_thread() {
        let mut g = Graph::new();
        g.add_vertex("a").unwrap();
        g.add_vertex("b").unwrap();
        g.add_edge(Edge::directed("a", "b")).unwrap();

        let worker = AlgorithmWorker::new(1).unwrap();
        let outcome = block_on(worker.spawn(job(AlgorithmKind::StronglyConnected, g)));
        assert_eq!(outcome.kind, AlgorithmKind::StronglyConnected);
        let AlgorithmResult::ConnectedComponents { components } = outcome.output.unwrap().result
        else {
            panic!("expected components");
        };
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn precondition_failures_come_back_as_errors() {
        let mut g = Graph::new();
        g.add_vertex("a").unwrap();
        g.add_vertex("b").unwrap();
        g.add_edge(Edge::directed("a", "b")).unwrap();
        let mut job = job(AlgorithmKind::ShortestPath, g);
        job.start = Some("a".into());
        job.end = Some("b".into());

        let worker = AlgorithmWorker::new(1).unwrap();
        let outcome = block_on(worker.spawn(job));
        assert!(matches!(outcome.output, Err(Error::Precondition(_))));
    }

    #[test]
    fn panic_payloads_are_readable() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
    }
}
