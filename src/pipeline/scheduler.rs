//! Background task scheduling
//!
//! Pipelines hand their periodic work (composition ticks, stats flushes,
//! retransmit timers) to a shared scheduler instead of spawning threads of
//! their own. The mixer core only starts and stops it; registration happens
//! while pipelines are being wired up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Start/stop surface the mixer core drives
pub trait TaskScheduler: Send + Sync {
    /// Begin running registered jobs. Idempotent.
    fn start(&self);

    /// Stop all running jobs. Idempotent; jobs stay registered and run
    /// again on the next `start`.
    fn stop(&self);
}

struct TickJob {
    interval: Duration,
    run: Arc<dyn Fn() + Send + Sync>,
}

/// Tokio-backed scheduler running each registered job on its own interval.
///
/// `start` must be called inside a tokio runtime when jobs are registered;
/// with no jobs it is a flag flip and runs anywhere.
pub struct TickScheduler {
    jobs: Mutex<Vec<TickJob>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    running: AtomicBool,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
            handles: Mutex::new(Vec::new()),
            running: AtomicBool::new(false),
        }
    }

    /// Register a periodic job. If the scheduler is already running, the
    /// job starts ticking immediately.
    pub fn schedule(&self, interval: Duration, job: impl Fn() + Send + Sync + 'static) {
        let job = TickJob {
            interval,
            run: Arc::new(job),
        };
        if self.running.load(Ordering::Acquire) {
            self.handles.lock().push(Self::spawn(&job));
        }
        self.jobs.lock().push(job);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn spawn(job: &TickJob) -> JoinHandle<()> {
        let interval = job.interval;
        let run = Arc::clone(&job.run);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so a job fires
            // one interval after start, not at start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                run();
            }
        })
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskScheduler for TickScheduler {
    fn start(&self) {
        if self.running.swap(true, Ordering::AcqRel) {
            return;
        }
        let jobs = self.jobs.lock();
        let mut handles = self.handles.lock();
        for job in jobs.iter() {
            handles.push(Self::spawn(job));
        }
        tracing::debug!(jobs = jobs.len(), "task scheduler started");
    }

    fn stop(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        let mut handles = self.handles.lock();
        for handle in handles.drain(..) {
            handle.abort();
        }
        tracing::debug!("task scheduler stopped");
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    #[tokio::test(start_paused = true)]
    async fn test_job_ticks_after_start() {
        let scheduler = TickScheduler::new();
        let ticks = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&ticks);
        scheduler.schedule(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        scheduler.start();
        assert!(scheduler.is_running());

        tokio::time::sleep(Duration::from_millis(55)).await;
        tokio::task::yield_now().await;
        assert!(ticks.load(Ordering::Relaxed) >= 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_jobs_and_restart_resumes() {
        let scheduler = TickScheduler::new();
        let ticks = Arc::new(AtomicU64::new(0));

        let counter = Arc::clone(&ticks);
        scheduler.schedule(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(25)).await;
        scheduler.stop();
        tokio::task::yield_now().await;

        let after_stop = ticks.load(Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::Relaxed), after_stop);

        scheduler.start();
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert!(ticks.load(Ordering::Relaxed) > after_stop);
    }

    #[tokio::test]
    async fn test_schedule_while_running() {
        let scheduler = TickScheduler::new();
        scheduler.start();

        let ticks = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&ticks);
        scheduler.schedule(Duration::from_millis(1), move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(ticks.load(Ordering::Relaxed) > 0);
        scheduler.stop();
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        tokio_test::block_on(async {
            let scheduler = TickScheduler::new();
            scheduler.stop();
            scheduler.stop();
            assert!(!scheduler.is_running());

            // Starting with no jobs spawns nothing and stays cheap
            scheduler.start();
            scheduler.start();
            assert!(scheduler.is_running());
            scheduler.stop();
        });
    }
}
