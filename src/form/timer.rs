use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

type Restore = Box<dyn FnOnce() + Send + 'static>;

/// Runs a restoration closure once after a delay.
///
/// Dropping the timer before the delay elapses runs the closure right away,
/// so the button is never left disabled.
pub struct RestoreTimer {
    restore: Arc<Mutex<Option<Restore>>>,
    task: JoinHandle<()>,
}

impl RestoreTimer {
    /// Arm the timer. Must be called inside a tokio runtime.
    pub fn arm(delay: Duration, restore: impl FnOnce() + Send + 'static) -> Self {
        let restore: Restore = Box::new(restore);
        let restore = Arc::new(Mutex::new(Some(restore)));
        let pending = restore.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(&pending);
        });
        Self { restore, task }
    }

    /// Whether the closure has yet to run
    pub fn is_pending(&self) -> bool {
        self.restore
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

fn fire(slot: &Mutex<Option<Restore>>) {
    let restore = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(restore) = restore {
        restore();
    }
}

impl Drop for RestoreTimer {
    fn drop(&mut self) {
        self.task.abort();
        fire(&self.restore);
    }
}
