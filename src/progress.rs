//! Progress reporting and cooperative cancellation consumed by every algorithm.
//!
//! Algorithms call [`ProgressSink::checkpoint`] at every outer fixpoint iteration and at
//! the start of every randomized trial. Inside single fixpoint steps, cancellation is
//! checked through `cancel_this::is_cancelled!`, so the usual `cancel_this` triggers
//! (e.g. [`cancel_this::on_timeout`]) work as well.
//!
//! `cancel_this` triggers are thread-local. Parallel trials therefore take a snapshot of
//! the caller's triggers before fanning out and run every trial under [`with_triggers`].

use cancel_this::{Cancellable, Cancelled, DynamicCancellationTrigger, is_cancelled};
use log::{debug, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// The receiving end of progress updates.
///
/// All methods take `&self` so that a single sink can be shared by parallel trials.
pub trait ProgressSink: Sync {
    fn set_tasks(&self, _title: &str, _subtitle: &str) {}

    fn set_maximum(&self, _maximum: u64) {}

    fn set_progress(&self, _progress: u64) {}

    fn increment_progress(&self) {}

    /// Return `true` once the caller asked for the computation to stop.
    fn is_cancelled(&self) -> bool {
        false
    }

    /// Fail with [`Cancelled`] if either this sink or an active `cancel_this` trigger
    /// requests cancellation.
    fn checkpoint(&self) -> Cancellable<()> {
        is_cancelled!()?;
        if self.is_cancelled() {
            Err(Cancelled::new("ProgressSink"))
        } else {
            Ok(())
        }
    }
}

/// Run `action` with `triggers` (usually [`cancel_this::active_triggers`] of the thread
/// that started a parallel computation) installed on the current thread.
pub fn with_triggers<T>(
    triggers: &DynamicCancellationTrigger,
    action: impl FnOnce() -> Cancellable<T>,
) -> Cancellable<T> {
    cancel_this::on_trigger(triggers.clone(), action)
}

/// A sink that ignores all updates and never cancels.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// A shared cancellation flag. Cloning yields a handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> CancelFlag {
        CancelFlag::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl ProgressSink for CancelFlag {
    fn is_cancelled(&self) -> bool {
        self.is_set()
    }
}

/// Forwards only cancellation requests to the wrapped sink.
///
/// Used for nested algorithm runs, which would otherwise overwrite the progress of the
/// outer computation.
#[derive(Copy, Clone)]
pub struct CancelOnly<'a>(pub &'a dyn ProgressSink);

impl ProgressSink for CancelOnly<'_> {
    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// A sink that reports progress through the `log` facade, one message per ten percent.
#[derive(Debug, Default)]
pub struct LogProgress {
    maximum: AtomicU64,
    progress: AtomicU64,
    reported: AtomicU64,
    cancel: CancelFlag,
}

impl LogProgress {
    pub fn new() -> LogProgress {
        LogProgress::default()
    }

    /// A sink that stops the computation once `cancel` is set.
    pub fn with_cancel_flag(cancel: CancelFlag) -> LogProgress {
        LogProgress {
            cancel,
            ..LogProgress::default()
        }
    }

    fn report(&self, progress: u64) {
        let maximum = self.maximum.load(Ordering::Relaxed);
        if maximum == 0 {
            return;
        }
        let decile = (progress.min(maximum) * 10) / maximum;
        if self.reported.fetch_max(decile, Ordering::Relaxed) < decile {
            debug!("Progress {}% ({progress}/{maximum}).", decile * 10);
        }
    }
}

impl ProgressSink for LogProgress {
    fn set_tasks(&self, title: &str, subtitle: &str) {
        info!("{title}: {subtitle}");
    }

    fn set_maximum(&self, maximum: u64) {
        self.maximum.store(maximum, Ordering::Relaxed);
        self.progress.store(0, Ordering::Relaxed);
        self.reported.store(0, Ordering::Relaxed);
    }

    fn set_progress(&self, progress: u64) {
        self.progress.store(progress, Ordering::Relaxed);
        self.report(progress);
    }

    fn increment_progress(&self) {
        let progress = self.progress.fetch_add(1, Ordering::Relaxed) + 1;
        self.report(progress);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_set()
    }
}

#[cfg(test)]
mod tests {
    use crate::progress::{
        CancelFlag, CancelOnly, LogProgress, NoProgress, ProgressSink, with_triggers,
    };
    use cancel_this::{CancelAtomic, Cancellable, is_cancelled};

    #[test]
    fn no_progress_never_cancels() {
        assert!(NoProgress.checkpoint().is_ok());
    }

    #[test]
    fn cancel_flag_is_shared_between_clones() {
        let flag = CancelFlag::new();
        let handle = flag.clone();
        assert!(flag.checkpoint().is_ok());
        handle.cancel();
        assert!(flag.checkpoint().is_err());
    }

    #[test]
    fn log_progress_observes_its_flag() {
        let flag = CancelFlag::new();
        let progress = LogProgress::with_cancel_flag(flag.clone());
        progress.set_maximum(4);
        progress.increment_progress();
        progress.set_progress(3);
        assert!(progress.checkpoint().is_ok());
        flag.cancel();
        assert!(progress.checkpoint().is_err());
    }

    #[test]
    fn triggers_reach_other_threads() {
        let trigger = CancelAtomic::new();
        trigger.cancel();
        let result: Cancellable<()> = cancel_this::on_atomic(trigger, || {
            assert!(is_cancelled!().is_err());
            let triggers = cancel_this::active_triggers();
            std::thread::scope(|scope| {
                let plain = scope.spawn(|| is_cancelled!().is_err());
                let installed =
                    scope.spawn(|| with_triggers(&triggers, || is_cancelled!()).is_err());
                assert!(!plain.join().unwrap());
                assert!(installed.join().unwrap());
            });
            Ok(())
        });
        assert!(result.is_ok());
    }

    #[test]
    fn cancel_only_forwards_cancellation() {
        let flag = CancelFlag::new();
        let nested = CancelOnly(&flag);
        nested.set_maximum(10);
        assert!(nested.checkpoint().is_ok());
        flag.cancel();
        assert!(nested.checkpoint().is_err());
    }
}
