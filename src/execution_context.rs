use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::SimulationError;

/// Worker pool the kernels are dispatched on.
///
/// Cloning shares the pool, so several simulations can run against one
/// context without any process-wide state.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    pool: Arc<ThreadPool>,
}

impl ExecutionContext {
    /// `num_threads == 0` lets rayon pick the thread count.
    pub fn new(num_threads: usize) -> Result<Self, SimulationError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|idx| format!("fbl-worker-{}", idx))
            .build()
            .map_err(|err| {
                SimulationError::configuration(format!("failed to build thread pool: {}", err))
            })?;

        log::debug!(
            "Created execution context with {} threads",
            pool.current_num_threads()
        );

        Ok(ExecutionContext {
            pool: Arc::new(pool),
        })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `op` inside the pool; parallel iterators used by `op` execute
    /// on this context's workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}
