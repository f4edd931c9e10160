//! test262 parser conformance harness
//!
//! Runs every test of an ECMAScript test262 checkout against a parser and
//! compares the failures with a checked-in allowlist of known failures. A run
//! succeeds only when the allowlist matches the failures exactly, so both
//! regressions and newly fixed tests are reported.
//!
//! # Quick Start
//!
//! ```no_run
//! use test262_parser_harness::{Harness, HarnessConfig, ParseRequest, SubjectResult, Test262Stream};
//!
//! fn parse(request: &ParseRequest<'_>) -> SubjectResult {
//!     // hand request.source_text to the parser under test
//!     Ok(())
//! }
//!
//! fn main() -> test262_parser_harness::Result<()> {
//!     let harness = Harness::new(HarnessConfig::default(), parse)?;
//!     let report = harness.run(Test262Stream::open("build/test262")?)?;
//!     print!("{}", report.format_summary());
//!     std::process::exit(if report.success() { 0 } else { 1 });
//! }
//! ```
//!
//! # Module Overview
//!
//! Records flow: [`corpus`] → [`filter`] → [`capabilities`] → [`subject`] → [`classify`] → [`report`] / [`allowlist`]
//!
//! | Category | Modules |
//! |----------|---------|
//! | **Input** | [`corpus`], [`config`] |
//! | **Per test** | [`filter`], [`capabilities`], [`subject`], [`classify`] |
//! | **Per run** | [`harness`], [`report`], [`allowlist`] |

pub mod allowlist;
pub mod capabilities;
pub mod classify;
pub mod config;
pub mod corpus;
pub mod filter;
pub mod harness;
pub mod report;
pub mod subject;

mod error;

pub use allowlist::{Allowlist, AllowlistMode, Reconciliation};
pub use capabilities::{CapabilityMap, UnmappedFeatures};
pub use classify::{classify, Classification};
pub use config::{ConfigFile, HarnessConfig};
pub use corpus::{Expectation, Phase, SourceKind, Test262Stream, TestRecord};
pub use error::{Error, Result};
pub use filter::SkipRules;
pub use harness::Harness;
pub use report::{FinalReport, OutputFormat, RunReport};
pub use subject::command::CommandSubject;
pub use subject::{ParseRequest, Rejection, Subject, SubjectError, SubjectResult};

/// Harness version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
