//! Parallel discovery feeding a single registry.
//!
//! Each rayon worker owns a clone of a [`RequestSink`] (a channel sender).
//! The calling thread drains the channel into one [`RequestRegistry`], which
//! is the only place requests from different workers ever meet.

use crossbeam::channel::{self, Sender};
use icept_model::{InterceptionRequest, InvalidRequest, RawDiscovery};
use rayon::prelude::*;

use crate::{CollectError, RequestRegistry};

type Discovered = Result<InterceptionRequest, InvalidRequest>;

/// Finds interception declarations in one source unit.
///
/// Implementations must not share mutable state between units: `scan` is
/// called concurrently for different units.
pub trait Scanner: Sync {
    type Unit: Sync;

    fn scan(&self, unit: &Self::Unit, sink: &mut RequestSink);
}

/// Per-worker handle for submitting discoveries to the collector.
///
/// Validation happens on the worker, so the collector only ever sees
/// finished requests or finished errors.
#[derive(Clone)]
pub struct RequestSink {
    tx: Sender<Discovered>,
}

impl RequestSink {
    /// Validate a raw discovery tuple and submit the outcome.
    pub fn submit(&mut self, discovery: RawDiscovery) {
        self.send(discovery.into_request());
    }

    /// Submit a request the scanner already built.
    pub fn submit_request(&mut self, request: InterceptionRequest) {
        self.send(Ok(request));
    }

    fn send(&self, discovered: Discovered) {
        if self.tx.send(discovered).is_err() {
            tracing::warn!("discovery collector is gone; dropping request");
        }
    }
}

/// Scan every unit and collect the results into a fresh registry.
///
/// `num_threads == 0` uses rayon's global pool; anything else runs the scan
/// on a dedicated pool of that size.
pub fn collect<S: Scanner>(
    scanner: &S,
    units: &[S::Unit],
    num_threads: usize,
) -> Result<RequestRegistry, CollectError> {
    let _span = tracing::debug_span!("collect", units = units.len(), num_threads).entered();

    let (tx, rx) = channel::unbounded::<Discovered>();
    let sink = RequestSink { tx };
    let scan_all = move || {
        units
            .par_iter()
            .for_each_with(sink, |sink, unit| scanner.scan(unit, sink));
    };

    let mut registry = RequestRegistry::new();
    let outcome = std::thread::scope(|scope| {
        let producer = scope.spawn(move || run_on_pool(num_threads, scan_all));
        // Every sender lives inside `scan_all`; the loop ends once it has run.
        for discovered in &rx {
            registry.record(discovered);
        }
        producer.join()
    });

    match outcome {
        Ok(Ok(())) => {
            tracing::debug!(
                requests = registry.len(),
                signatures = registry.signature_count(),
                invalid = registry.invalid_count(),
                "discovery finished"
            );
            Ok(registry)
        }
        Ok(Err(err)) => Err(err),
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

fn run_on_pool(num_threads: usize, work: impl FnOnce() + Send) -> Result<(), CollectError> {
    if num_threads == 0 {
        work();
        return Ok(());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("icept-scan-{i}"))
        .build()?;
    pool.install(work);
    Ok(())
}
