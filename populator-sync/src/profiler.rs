//! Timing spans around units of work.
//!
//! [`Profiler::time`] runs a future inside a `tracing` span and reports the
//! elapsed wall time to a [`ProfileSink`]. The default sink logs at `debug`.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info_span, Instrument};

/// Receives one record per finished span.
pub trait ProfileSink: Send + Sync {
    fn record(&self, label: &str, elapsed: Duration);
}

/// Logs each span's duration through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProfileSink for TracingSink {
    fn record(&self, label: &str, elapsed: Duration) {
        debug!(label, elapsed_ms = elapsed.as_millis() as u64, "span finished");
    }
}

#[derive(Clone)]
pub struct Profiler {
    sink: Arc<dyn ProfileSink>,
}

impl Profiler {
    pub fn new(sink: Arc<dyn ProfileSink>) -> Self {
        Self { sink }
    }

    /// Await `work` inside a span named after `label`, then record its duration.
    pub async fn time<F>(&self, label: &str, work: F) -> F::Output
    where
        F: Future,
    {
        let span = info_span!("populate", label);
        let started = Instant::now();
        let output = work.instrument(span).await;
        self.sink.record(label, started.elapsed());
        output
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl fmt::Debug for Profiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profiler").finish_non_exhaustive()
    }
}
