//! End-to-end pipeline scenarios.
//!
//! Each test drives a small in-memory scanner through discovery, planning
//! and listing emission, then checks the complete rendered result.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use icept_compiler::{run_pipeline, ErrorPhase, GenerateOutput, PipelineConfig};
use icept_diagnostic::emitter::ColorMode;
use icept_diagnostic::ErrorCode;
use icept_emit::{ListingBackend, UnitListing};
use icept_model::{
    CallableKind, DiscoverySite, ExtraItem, RawCallable, RawDiscovery, RedirectionTarget,
};
use icept_registry::{collect, Competitor, RequestSink, Scanner};
use pretty_assertions::assert_eq;

/// Units are discovery tuples already; the scanner just forwards them.
struct Forward;

impl Scanner for Forward {
    type Unit = Vec<RawDiscovery>;

    fn scan(&self, unit: &Self::Unit, sink: &mut RequestSink) {
        for discovery in unit {
            sink.submit(discovery.clone());
        }
    }
}

fn instance(
    site: (&str, &str),
    callable: (&str, &str, &str),
    target: (&str, &str, &str),
    extras: Vec<ExtraItem>,
) -> RawDiscovery {
    RawDiscovery {
        site: DiscoverySite::new(site.0, site.1),
        callable: RawCallable::new(callable.0, callable.1, callable.2),
        kind: CallableKind::Instance,
        target: RawCallable::new(target.0, target.1, target.2),
        extras,
    }
}

fn run(units: &[Vec<RawDiscovery>], num_threads: usize) -> GenerateOutput<UnitListing> {
    let config = PipelineConfig {
        num_threads,
        color: ColorMode::Never,
    };
    run_pipeline(&Forward, units, &mut ListingBackend::new(), &config)
}

fn listing_text(output: &GenerateOutput<UnitListing>) -> String {
    output
        .artifacts
        .iter()
        .map(|listing| listing.text.as_str())
        .collect()
}

#[test]
fn duplicate_requests_merge_with_origin_marker() {
    let origin = ExtraItem::OriginatingElement {
        element: "A#foo".to_string(),
    };
    let units = vec![
        vec![instance(
            ("A.java", "A#foo"),
            ("A", "foo", "()V"),
            ("B", "fooImpl", "(LA;)V"),
            Vec::new(),
        )],
        vec![instance(
            ("Gen.java", "A#foo"),
            ("A", "foo", "()V"),
            ("B", "fooImpl", "(LA;)V"),
            vec![origin],
        )],
    ];

    let output = run(&units, 2);
    assert!(output.success, "{}", output.report);
    assert_eq!(
        listing_text(&output),
        [
            "interceptor unit B (1 interception)",
            "  intercept A.foo()V#instance",
            "    call B.fooImpl(LA;)V",
            "    receiver A",
            "    extra origin(A#foo)",
            "",
        ]
        .join("\n")
    );
    let stats = output.stats.unwrap();
    assert_eq!(stats.duplicates_merged, 1);
    assert_eq!(stats.groups, 1);
}

#[test]
fn conflicting_redirections_abort_without_plan() {
    let units = vec![
        vec![instance(("A.java", "first"), ("A", "foo", "()V"), ("B", "x", "()V"), Vec::new())],
        vec![instance(("A.java", "second"), ("A", "foo", "()V"), ("C", "y", "()V"), Vec::new())],
    ];

    let output = run(&units, 4);
    assert!(!output.success);
    assert_eq!(output.error_phase, Some(ErrorPhase::Plan));
    assert!(output.artifacts.is_empty());
    assert_eq!(output.diagnostics[0].code, ErrorCode::E2001);
    assert_eq!(
        output.report,
        [
            "error[E2001]: conflicting interception of `A.foo()V#instance`: \
             redirected to `B.x()V` and `C.y()V`",
            "  --> A.java: first: redirected to `B.x()V` here",
            "      A.java: second: redirected to `C.y()V` here",
            "  = note: `A.foo()V#instance` is owned by `A`; \
             a callable may only be redirected to one implementation",
            "  = help: remove all but one declaration, or make them agree on the implementation",
            "",
            "error: aborting due to previous error",
            "",
        ]
        .join("\n")
    );
}

#[test]
fn conflict_names_every_competing_target() {
    let units = vec![
        vec![instance(("A.java", "first"), ("A", "foo", "()V"), ("C", "y", "()V"), Vec::new())],
        vec![
            instance(("A.java", "second"), ("A", "foo", "()V"), ("B", "x", "()V"), Vec::new()),
            instance(("B.java", "third"), ("A", "foo", "()V"), ("B", "x", "()V"), Vec::new()),
        ],
    ];

    let errors = collect(&Forward, &units, 2).unwrap().into_plan().unwrap_err();
    let conflicts: Vec<_> = errors.conflicts().collect();
    assert_eq!(conflicts.len(), 1);

    let targets: Vec<&str> = conflicts[0].targets().map(RedirectionTarget::canonical).collect();
    assert_eq!(targets, ["B.x()V", "C.y()V"]);

    let sites: Vec<Vec<String>> = conflicts[0]
        .competitors()
        .iter()
        .map(|Competitor { sites, .. }| sites.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(
        sites,
        [
            vec!["A.java: second".to_string(), "B.java: third".to_string()],
            vec!["A.java: first".to_string()],
        ]
    );
}

#[test]
fn groups_are_emitted_in_owner_order() {
    let units: Vec<Vec<RawDiscovery>> = ["Z", "A", "M"]
        .into_iter()
        .map(|owner| {
            vec![instance(
                ("S.java", owner),
                ("S", format!("to{owner}").as_str(), "()V"),
                (owner, "hook", "(LS;)V"),
                Vec::new(),
            )]
        })
        .collect();

    let output = run(&units, 3);
    assert!(output.success, "{}", output.report);
    let owners: Vec<&str> = output
        .artifacts
        .iter()
        .map(|listing| listing.owner.internal_name())
        .collect();
    assert_eq!(owners, ["A", "M", "Z"]);
}

#[test]
fn thread_count_does_not_change_output() {
    let units: Vec<Vec<RawDiscovery>> = (0..24)
        .map(|u| {
            (0..6)
                .map(|m| {
                    let src = u % 5;
                    let owner = ["Hooks", "org/x/Y", "Z"][(src * 7 + m) % 3];
                    instance(
                        (format!("Unit{u}.java").as_str(), format!("m{m}").as_str()),
                        (format!("Src{src}").as_str(), format!("m{m}").as_str(), "(I)V"),
                        (
                            owner,
                            format!("m{m}_{src}").as_str(),
                            format!("(LSrc{src};I)V").as_str(),
                        ),
                        vec![ExtraItem::RequiresCapability {
                            capability: format!("cap{}", u % 2),
                        }],
                    )
                })
                .collect()
        })
        .collect();

    let baseline = run(&units, 1);
    assert!(baseline.success, "{}", baseline.report);
    assert_eq!(baseline.stats.unwrap().interceptions, 5 * 6);
    for threads in [0, 2, 8] {
        let output = run(&units, threads);
        assert_eq!(output.success, baseline.success);
        assert_eq!(output.report, baseline.report);
        assert_eq!(listing_text(&output), listing_text(&baseline));
    }
}

#[test]
fn every_problem_is_reported_together() {
    let units = vec![
        vec![instance(("Bad.java", "one"), ("A", "", "()V"), ("B", "x", "()V"), Vec::new())],
        vec![
            instance(("A.java", "1"), ("A", "foo", "()V"), ("B", "x", "()V"), Vec::new()),
            instance(("A.java", "2"), ("A", "foo", "()V"), ("C", "y", "()V"), Vec::new()),
        ],
        vec![instance(("Bad.java", "two"), ("A", "bar", "(V)V"), ("B", "x", "()V"), Vec::new())],
    ];

    let output = run(&units, 2);
    assert!(!output.success);
    assert_eq!(output.error_phase, Some(ErrorPhase::Discovery));
    let codes: Vec<ErrorCode> = output.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E1003, ErrorCode::E1003, ErrorCode::E2001]);
    assert_eq!(output.diagnostics[0].primary_location(), Some("Bad.java: one"));
    assert!(output.report.ends_with("error: aborting due to 3 previous errors\n"));
}
