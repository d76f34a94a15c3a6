use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore, mpsc};
use tracing::{debug, warn};

use crate::error::ProbeError;

use super::probe::Probe;
use super::types::{EndpointResult, Target};

/// Counting gate bounding how many probes may be past admission at once.
///
/// Cloning shares the same slots, so one gate can bound a whole run that
/// spans several dispatchers. A ceiling of `0` disables the gate.
#[derive(Debug, Clone, Default)]
pub struct AdmissionGate {
    slots: Option<Arc<Semaphore>>,
}

impl AdmissionGate {
    #[must_use]
    pub fn new(ceiling: usize) -> Self {
        if ceiling == 0 {
            return Self::unbounded();
        }
        Self {
            slots: Some(Arc::new(Semaphore::new(ceiling))),
        }
    }

    #[must_use]
    pub const fn unbounded() -> Self {
        Self { slots: None }
    }

    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.slots.is_some()
    }

    /// Waits for a free slot. Waiters are admitted in FIFO order.
    pub async fn admit(&self) -> Option<OwnedSemaphorePermit> {
        let slots = self.slots.as_ref()?;
        match Arc::clone(slots).acquire_owned().await {
            Ok(permit) => Some(permit),
            Err(err) => {
                warn!("Admission gate closed, running ungated: {}", err);
                None
            }
        }
    }
}

/// Notified from the worker that finished a job, before its result is
/// handed to the collector.
pub trait JobObserver: Send + Sync {
    fn job_completed(&self, index: usize, result: &EndpointResult);
}

/// Fans a target's jobs out to one task each and gathers exactly one result
/// per job.
///
/// A dispatcher holds no per-target state, so one instance may serve any
/// number of targets concurrently.
pub struct Dispatcher<P> {
    probe: Arc<P>,
    gate: AdmissionGate,
}

impl<P> Clone for Dispatcher<P> {
    fn clone(&self) -> Self {
        Self {
            probe: Arc::clone(&self.probe),
            gate: self.gate.clone(),
        }
    }
}

impl<P> Dispatcher<P>
where
    P: Probe + 'static,
{
    #[must_use]
    pub fn new(probe: P, concurrency: usize) -> Self {
        Self::with_gate(Arc::new(probe), AdmissionGate::new(concurrency))
    }

    #[must_use]
    pub const fn with_gate(probe: Arc<P>, gate: AdmissionGate) -> Self {
        Self { probe, gate }
    }

    /// Runs every job of `target` and returns the results in job order.
    ///
    /// A failing job never affects its siblings; a target without jobs
    /// yields an empty vector.
    pub async fn dispatch(&self, target: Arc<Target>) -> Vec<EndpointResult> {
        self.dispatch_observed(target, None).await
    }

    pub async fn dispatch_observed(
        &self,
        target: Arc<Target>,
        observer: Option<Arc<dyn JobObserver>>,
    ) -> Vec<EndpointResult> {
        let jobs = target.jobs();
        let expected = jobs.len();
        if expected == 0 {
            debug!(target = %target.name, "Target has no jobs");
            return Vec::new();
        }
        debug!(
            target = %target.name,
            jobs = expected,
            bounded = self.gate.is_bounded(),
            "Dispatching jobs"
        );

        let (result_tx, mut result_rx) = mpsc::channel::<(usize, EndpointResult)>(expected);
        for job in &jobs {
            let job = job.clone();
            let result_tx = result_tx.clone();
            let probe = Arc::clone(&self.probe);
            let gate = self.gate.clone();
            let target = Arc::clone(&target);
            let observer = observer.clone();

            tokio::spawn(async move {
                let result = {
                    let _permit = gate.admit().await;
                    probe.probe(&job, &target).await
                };
                if let Some(observer) = observer.as_ref() {
                    observer.job_completed(job.index, &result);
                }
                if result_tx.send((job.index, result)).await.is_err() {
                    warn!("Result collector dropped before {} reported", job.url);
                }
            });
        }
        drop(result_tx);

        let mut slots: Vec<Option<EndpointResult>> = jobs.iter().map(|_| None).collect();
        let mut received: usize = 0;
        while received < expected {
            let Some((index, result)) = result_rx.recv().await else {
                break;
            };
            match slots.get_mut(index) {
                Some(slot) if slot.is_none() => {
                    *slot = Some(result);
                    received = received.saturating_add(1);
                }
                Some(_) | None => {
                    warn!("Discarding unexpected result for job {}", index);
                }
            }
        }

        jobs.into_iter()
            .zip(slots)
            .map(|(job, slot)| {
                slot.unwrap_or_else(|| {
                    warn!("Job for {} ended without a result", job.url);
                    let result =
                        EndpointResult::failed(job.url, ProbeError::Aborted, Duration::ZERO);
                    if let Some(observer) = observer.as_ref() {
                        observer.job_completed(job.index, &result);
                    }
                    result
                })
            })
            .collect()
    }
}
