//! Harness driver
//!
//! Pulls records from the corpus one at a time, drops the skipped ones,
//! resolves capabilities and hands each test to a bounded pool of worker
//! threads that call the subject and classify the result. The run ends only
//! after the corpus is exhausted and every dispatched test is classified.
//!
//! # Example
//!
//! ```no_run
//! use test262_parser_harness::{CommandSubject, Harness, HarnessConfig, Test262Stream};
//!
//! fn main() -> test262_parser_harness::Result<()> {
//!     let subject = CommandSubject::new(["node", "parse.js"])?;
//!     let harness = Harness::new(HarnessConfig::default(), subject)?;
//!     let report = harness.run(Test262Stream::open("build/test262")?)?;
//!     print!("{}", report.format_summary());
//!     Ok(())
//! }
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::allowlist::{Allowlist, AllowlistMode};
use crate::capabilities::UnmappedFeatures;
use crate::classify::{classify, Classification};
use crate::config::HarnessConfig;
use crate::corpus::TestRecord;
use crate::error::Result;
use crate::report::{FinalReport, RunReport};
use crate::subject::{ParseRequest, Subject, SubjectError, SubjectResult};

/// A test ready for the subject
struct Job<'c> {
    record: TestRecord,
    capabilities: Vec<&'c str>,
    allowlisted: bool,
}

/// Drives one conformance run against a subject
pub struct Harness<S> {
    config: HarnessConfig,
    subject: S,
    allowlist: Allowlist,
}

impl<S: Subject> Harness<S> {
    /// Create a harness, loading the allowlist from `config.allowlist_path`
    pub fn new(config: HarnessConfig, subject: S) -> Result<Self> {
        let allowlist = Allowlist::load(&config.allowlist_path)?;
        Ok(Self::with_allowlist(config, subject, allowlist))
    }

    /// Create a harness with an allowlist that is already in memory
    pub fn with_allowlist(config: HarnessConfig, subject: S, allowlist: Allowlist) -> Self {
        Self {
            config,
            subject,
            allowlist,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    /// Run the corpus and, in update mode, rewrite the allowlist file
    pub fn run<I>(&self, corpus: I) -> Result<FinalReport>
    where
        I: IntoIterator<Item = Result<TestRecord>>,
    {
        let report = self.evaluate(corpus)?;
        if self.config.mode == AllowlistMode::Update {
            report.updated_allowlist().save(&self.config.allowlist_path)?;
        }
        if !report.unmapped_features.is_empty() {
            tracing::warn!(
                count = report.unmapped_features.len(),
                "features are neither mapped nor ignored"
            );
        }
        Ok(report)
    }

    /// Run the corpus and reconcile against the allowlist without touching
    /// any file.
    ///
    /// A corpus error aborts the run; no partial report is returned.
    pub fn evaluate<I>(&self, corpus: I) -> Result<FinalReport>
    where
        I: IntoIterator<Item = Result<TestRecord>>,
    {
        let start = Instant::now();
        let jobs = self.config.jobs.max(1);
        tracing::info!(
            jobs,
            allowlisted = self.allowlist.len(),
            mapped = self.config.capabilities.mapped_len(),
            ignored = self.config.capabilities.ignored_len(),
            "starting conformance run"
        );

        let (job_tx, job_rx) = mpsc::sync_channel::<Job<'_>>(jobs * 2);
        let job_rx = Mutex::new(job_rx);
        let report = Mutex::new(RunReport::new());
        let processed = AtomicUsize::new(0);
        let mut unmapped = UnmappedFeatures::new();

        let fed = std::thread::scope(|s| {
            for _ in 0..jobs {
                s.spawn(|| self.work(&job_rx, &report, &processed));
            }
            // Returning drops the sender, which lets the workers drain the
            // queue and exit; the scope then joins them.
            self.feed(corpus, job_tx, &report, &mut unmapped)
        });
        fed?;

        let mut report = report.into_inner().unwrap_or_else(PoisonError::into_inner);
        report.elapsed = start.elapsed();
        tracing::info!(
            tests = report.total(),
            failed = report.failures.len(),
            skipped = report.skipped,
            elapsed = ?report.elapsed,
            "conformance run finished"
        );
        Ok(report.finalize(&self.allowlist, unmapped, self.config.mode))
    }

    /// Producer side: filter, resolve and dispatch
    fn feed<'c, I>(
        &'c self,
        corpus: I,
        jobs: SyncSender<Job<'c>>,
        report: &Mutex<RunReport>,
        unmapped: &mut UnmappedFeatures,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Result<TestRecord>>,
    {
        for record in corpus {
            let record = record?;
            if self.config.skip_rules.should_skip(&record.file_name) {
                tracing::trace!(id = %record.id, "skipped");
                lock(report).add_skip();
                continue;
            }

            let capabilities: Vec<&'c str> = self
                .config
                .capabilities
                .resolve(&record.features, unmapped)
                .collect();
            let allowlisted = self.allowlist.contains(&record.id);
            let job = Job {
                record,
                capabilities,
                allowlisted,
            };
            if jobs.send(job).is_err() {
                // Every worker is gone; the scope re-raises their panic.
                break;
            }
        }
        Ok(())
    }

    /// Consumer side: run jobs until the queue is closed and empty
    fn work(&self, jobs: &Mutex<Receiver<Job<'_>>>, report: &Mutex<RunReport>, processed: &AtomicUsize) {
        loop {
            let job = match lock(jobs).recv() {
                Ok(job) => job,
                Err(_) => break,
            };

            let classification = self.run_test(&job.record, &job.capabilities);
            lock(report).add_result(&job.record, classification, job.allowlisted);

            let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
            let interval = self.config.log_interval;
            if interval > 0 && done % interval == 0 {
                tracing::info!(processed = done, "progress");
            }
        }
    }

    /// Invoke the subject on one record and classify the result.
    ///
    /// A panicking subject is caught and classified as a crash.
    pub fn run_test(&self, record: &TestRecord, capabilities: &[&str]) -> Classification {
        let request = ParseRequest {
            source_text: &record.source_text,
            source_kind: record.source_kind,
            capabilities,
        };

        let result: SubjectResult = panic::catch_unwind(AssertUnwindSafe(|| self.subject.parse(&request)))
            .unwrap_or_else(|payload| Err(SubjectError::Crashed(panic_message(payload.as_ref()))));
        if let Err(SubjectError::Crashed(message)) = &result {
            tracing::warn!(id = %record.id, "parser crashed: {}", message);
        }

        let classification = classify(record.expectation, &result);
        tracing::debug!(id = %record.id, %classification, "classified");
        classification
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {}", s)
    } else {
        "panic (internal error)".to_string()
    }
}
