//! End-to-end runs of the harness against in-memory parsers
//!
//! Tests are organized by concern:
//!   - allowlist reconciliation and the success rule
//!   - classification of negative tests
//!   - capability resolution and unmapped features
//!   - skip rules, crashes and corpus errors

mod common;

use common::{corpus, harness, test_config, ScriptedParser};
use test262_parser_harness::{
    Allowlist, AllowlistMode, Error, Expectation, Harness, ParseRequest, Phase, Rejection, SubjectError,
    SubjectResult, TestRecord,
};

fn record(name: &str, source: &str) -> TestRecord {
    TestRecord::new(format!("language/{}.js", name), "default", source)
}

mod reconciliation {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Allowlist {a, b}, failures {b, c}
    fn drifted_run(mode: AllowlistMode) -> test262_parser_harness::FinalReport {
        let allowlist: Allowlist = ["language/a.js(default)", "language/b.js(default)"].into_iter().collect();
        let mut config = test_config(2);
        config.mode = mode;
        Harness::with_allowlist(config, ScriptedParser::rejecting(&["!"]), allowlist)
            .evaluate(corpus(vec![record("a", "ok"), record("b", "!"), record("c", "!")]))
            .unwrap()
    }

    #[test]
    fn test_report_mode_lists_both_directions() {
        let report = drifted_run(AllowlistMode::Report);
        assert_eq!(report.reconciliation.still_failing, vec!["language/b.js(default)"]);
        assert_eq!(report.reconciliation.newly_failing, vec!["language/c.js(default)"]);
        assert_eq!(report.reconciliation.newly_fixed, vec!["language/a.js(default)"]);
        assert!(!report.success());

        let text = report.format_summary();
        assert!(text.contains("   language/c.js(default): "));
        assert!(text.contains("   language/a.js(default)\n"));
    }

    #[test]
    fn test_update_mode_writes_exact_failures() {
        let report = drifted_run(AllowlistMode::Update);
        assert!(report.success());
        assert_eq!(
            report.updated_allowlist().to_file_contents(),
            "language/b.js(default)\nlanguage/c.js(default)\n"
        );
    }

    #[test]
    fn test_matching_allowlist_succeeds() {
        let parser = ScriptedParser::rejecting(&["!"]);
        let harness = harness(parser, &["language/b.js(default)"]);
        let report = harness
            .evaluate(corpus(vec![record("a", "ok"), record("b", "!")]))
            .unwrap();
        assert!(report.success());
        assert_eq!(report.run.expected_failures, 1);
        assert!(report.format_summary().contains("All failures are in the allowlist."));
    }

    #[test]
    fn test_update_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allowlist.txt");
        let records = || corpus(vec![record("z", "!"), record("a", "!"), record("m", "ok")]);

        let mut config = test_config(3);
        config.allowlist_path = path.clone();
        config.mode = AllowlistMode::Update;
        let first = Harness::new(config.clone(), ScriptedParser::rejecting(&["!"])).unwrap();
        assert!(first.run(records()).unwrap().success());
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "language/a.js(default)\nlanguage/z.js(default)\n");

        let second = Harness::new(config.clone(), ScriptedParser::rejecting(&["!"])).unwrap();
        second.run(records()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);

        config.mode = AllowlistMode::Report;
        let check = Harness::new(config, ScriptedParser::rejecting(&["!"])).unwrap();
        assert!(check.run(records()).unwrap().success());
    }

    #[test]
    fn test_allowlisted_test_never_run_is_unrecognized() {
        let parser = ScriptedParser::rejecting(&[]);
        let harness = harness(parser, &["built-ins/RegExp/x.js(default)", "language/a.js(default)"]);
        let records = vec![
            TestRecord::new("built-ins/RegExp/x.js", "default", "!"),
            record("a", "ok"),
        ];
        let report = harness.evaluate(corpus(records)).unwrap();
        assert_eq!(
            report.reconciliation.newly_fixed,
            vec!["built-ins/RegExp/x.js(default)", "language/a.js(default)"]
        );
        assert_eq!(report.reconciliation.unrecognized, vec!["built-ins/RegExp/x.js(default)"]);
        assert!(report.format_summary().contains("built-ins/RegExp/x.js(default) (not run)"));
    }
}

mod classification {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_negative_parse_test_passes_when_rejected() {
        let harness = harness(ScriptedParser::rejecting(&["!"]), &[]);
        let records = vec![
            record("rejected", "!").expecting(Expectation::FailureAt(Phase::Parse)),
            record("accepted", "ok").expecting(Expectation::FailureAt(Phase::Parse)),
        ];
        let report = harness.evaluate(corpus(records)).unwrap();
        assert_eq!(report.run.passed, 1);
        assert_eq!(report.reconciliation.newly_failing, vec!["language/accepted.js(default)"]);
    }

    #[test]
    fn test_early_errors_satisfy_parse_expectations() {
        let early = |_: &ParseRequest<'_>| -> SubjectResult {
            Err(Rejection::new(Phase::Early, "duplicate binding").into())
        };
        let harness = harness(early, &[]);
        let records = vec![
            record("parse", "").expecting(Expectation::FailureAt(Phase::Parse)),
            record("early", "").expecting(Expectation::FailureAt(Phase::Early)),
            record("positive", ""),
        ];
        let report = harness.evaluate(corpus(records)).unwrap();
        assert_eq!(report.run.passed, 2);
        assert_eq!(report.run.failing_ids().into_iter().collect::<Vec<_>>(), vec!["language/positive.js(default)"]);
    }

    #[test]
    fn test_crashing_parser_fails_every_test() {
        let crashing =
            |_: &ParseRequest<'_>| -> SubjectResult { Err(SubjectError::Crashed("signal 11".to_string())) };
        let harness = harness(crashing, &[]);
        let records = vec![
            record("neg", "").expecting(Expectation::FailureAt(Phase::Parse)),
            record("pos", ""),
        ];
        let report = harness.evaluate(corpus(records)).unwrap();
        assert_eq!(report.run.passed, 0);
        assert!(report.run.failures.values().all(|reason| reason.contains("signal 11")));
    }

    #[test]
    fn test_panic_in_one_test_does_not_stop_the_run() {
        let panicky = |req: &ParseRequest<'_>| -> SubjectResult {
            if req.source_text == "boom" {
                panic!("internal parser error");
            }
            Ok(())
        };
        let harness = harness(panicky, &[]);
        let records = (0..20)
            .map(|i| record(&format!("t{:02}", i), if i == 7 { "boom" } else { "ok" }))
            .collect();
        let report = harness.evaluate(corpus(records)).unwrap();
        assert_eq!(report.run.total(), 20);
        assert_eq!(report.run.failing_ids().into_iter().collect::<Vec<_>>(), vec!["language/t07.js(default)"]);
    }
}

mod features {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mapped_feature_enables_capability() {
        let parser = ScriptedParser::default();
        let harness = harness(parser, &[]);
        let records = vec![
            record("assert", "import a from 'a' assert { type: 'json' }")
                .with_features(["BigInt", "import-assertions"]),
        ];
        let report = harness.evaluate(corpus(records)).unwrap();
        assert!(report.success());
    }

    #[test]
    fn test_ignored_feature_runs_normally() {
        let harness = harness(ScriptedParser::default(), &[]);
        let report = harness
            .evaluate(corpus(vec![record("big", "1n").with_features(["BigInt"])]))
            .unwrap();
        assert_eq!(report.run.passed, 1);
        assert!(report.unmapped_features.is_empty());
        assert!(report.success());
    }

    #[test]
    fn test_unmapped_feature_reported_once_and_fails_run() {
        let harness = harness(ScriptedParser::default(), &[]);
        let records = vec![
            record("p1", "x |> f").with_features(["pipeline"]),
            record("p2", "y |> f").with_features(["pipeline", "BigInt"]),
        ];
        let report = harness.evaluate(corpus(records)).unwrap();
        assert_eq!(report.run.passed, 2);
        assert_eq!(report.unmapped_features, vec!["pipeline"]);
        assert!(!report.success());
        assert!(report
            .format_summary()
            .contains("The following features are not currently mapped or ignored:\n   pipeline\n"));
    }
}

mod capabilities {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_capabilities_reach_the_parser_in_order() {
        let parser = Arc::new(ScriptedParser::default());
        let shared = Arc::clone(&parser);
        let subject = move |req: &ParseRequest<'_>| -> SubjectResult {
            test262_parser_harness::Subject::parse(shared.as_ref(), req)
        };
        let mut config = test_config(1);
        config.capabilities.map_feature("decorators", "decorators");
        let harness = Harness::with_allowlist(config, subject, Allowlist::new());

        let records = vec![record("d", "@dec class C {}").with_features(["import-assertions", "decorators"])];
        harness.evaluate(corpus(records)).unwrap();
        assert_eq!(
            parser.capabilities_for("@dec class C {}"),
            Some(vec!["importAssertions".to_string(), "decorators".to_string()])
        );
    }
}

mod corpus_handling {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_skipped_tests_never_reach_the_parser() {
        let parser = Arc::new(ScriptedParser::default());
        let shared = Arc::clone(&parser);
        let subject = move |req: &ParseRequest<'_>| -> SubjectResult {
            test262_parser_harness::Subject::parse(shared.as_ref(), req)
        };
        let harness = harness(subject, &[]);
        let records = vec![
            TestRecord::new("built-ins/RegExp/a.js", "default", "regexp-a"),
            TestRecord::new("language/literals/regexp/b.js", "strict mode", "regexp-b"),
            record("kept", "kept"),
        ];
        let report = harness.evaluate(corpus(records)).unwrap();
        assert_eq!(report.run.skipped, 2);
        assert_eq!(report.run.total(), 1);
        assert_eq!(parser.sources(), vec!["kept"]);
        assert!(report.run.failures.is_empty());
    }

    #[test]
    fn test_corpus_error_is_fatal() {
        let harness = harness(ScriptedParser::default(), &[]);
        let records = vec![
            Ok(record("a", "")),
            Err(Error::corpus("test/language/b.js", "unterminated front matter")),
        ];
        match harness.evaluate(records) {
            Err(Error::Corpus { message, .. }) => assert_eq!(message, "unterminated front matter"),
            other => panic!("expected corpus error, got {:?}", other.map(|r| r.success())),
        }
    }

    #[test]
    fn test_empty_corpus() {
        let harness = harness(ScriptedParser::default(), &[]);
        let report = harness.evaluate(Vec::new()).unwrap();
        assert_eq!(report.run.total(), 0);
        assert!(report.success());
    }
}
