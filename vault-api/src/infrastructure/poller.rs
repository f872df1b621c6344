//! Timer driven refresh of the two data sources behind the pending list.
//!
//! Each source has a [`Dependency`] whose generation is bumped on every tick.
//! Readers compare the generation they last fetched at and only go back to the
//! network when it moved.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct Dependency {
    name: &'static str,
    tx: Arc<watch::Sender<u64>>,
}

impl Dependency {
    pub fn new(name: &'static str) -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            name,
            tx: Arc::new(tx),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn invalidate(&self) {
        self.tx.send_modify(|generation| *generation += 1);
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

/// Spawns one polling loop. A failing cycle is logged and the loop carries on;
/// only `token` ends it.
pub fn spawn_poller<F, Fut>(
    dependency: Dependency,
    period: Duration,
    token: CancellationToken,
    refresh: Arc<Notify>,
    cycle: F,
) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), crate::ServiceError>> + Send,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(source = dependency.name(), ?period, "poller started");

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
                _ = refresh.notified() => {}
            }

            dependency.invalidate();
            if let Err(e) = cycle().await {
                tracing::warn!(source = dependency.name(), "poll cycle failed: {e}");
            }
        }

        tracing::debug!(source = dependency.name(), "poller stopped");
    })
}

/// Running pollers, one per source.
#[derive(Debug)]
pub struct PollerHandle {
    token: CancellationToken,
    refresh: Vec<Arc<Notify>>,
    tasks: Vec<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            refresh: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn spawn<F, Fut>(&mut self, dependency: Dependency, period: Duration, cycle: F)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), crate::ServiceError>> + Send,
    {
        let refresh = Arc::new(Notify::new());
        let task = spawn_poller(
            dependency,
            period,
            self.token.child_token(),
            refresh.clone(),
            cycle,
        );
        self.refresh.push(refresh);
        self.tasks.push(task);
    }

    /// Runs every loop's next cycle now instead of at its next tick.
    pub fn refresh(&self) {
        for notify in &self.refresh {
            notify.notify_one();
        }
    }

    pub async fn close(self) -> Result<(), crate::SystemError> {
        self.token.cancel();
        for task in self.tasks {
            task.await
                .map_err(|e| crate::SystemError::TaskJoin(e.to_string()))?;
        }
        Ok(())
    }
}
