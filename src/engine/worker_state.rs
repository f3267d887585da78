use std::sync::{Arc, Mutex};

use var_bitmap::Bitmap;

/// Tracks which workers are idle so the engine can detect when the
/// session's task set is exhausted.
///
/// Worker ids are numbered from 1 to the number of workers. Idle
/// workers are marked `1` in the bitmap.
#[derive(Clone)]
pub(super) struct WorkerState {
    inner: Arc<Mutex<Bitmap>>,
}

impl WorkerState {
    pub fn new(num_workers: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Bitmap::with_size(num_workers))),
        }
    }

    pub fn set_busy(&self, worker_id: u32) {
        let mut idle_map = self.inner.lock().unwrap();
        idle_map.set((worker_id - 1) as usize, false);
    }

    pub fn set_idle(&self, worker_id: u32) {
        let mut idle_map = self.inner.lock().unwrap();
        idle_map.set((worker_id - 1) as usize, true);
    }

    pub fn all_idle(&self) -> bool {
        let idle_map = self.inner.lock().unwrap();
        (0..idle_map.size()).all(|idx| idle_map.get(idx))
    }
}
