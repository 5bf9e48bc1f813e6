pub mod unit;

use segtrace_core::config::Config;

pub use unit::UnitOfWork;

/// Entry point for recording trace segments in this process. Cheap to clone;
/// holds only the identity stamped into downstream refs.
#[derive(Debug, Clone)]
pub struct Tracer {
    config: Config,
}

impl Tracer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Open a unit of work under a freshly generated segment id. The
    /// returned recorder is single-owner; hand it to the thread doing the
    /// work and call `end` there when the work completes.
    pub fn begin(&self) -> UnitOfWork {
        UnitOfWork::open(self.config.clone())
    }
}
