#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use icept_model::{
    BinaryCompatibility, CallableKind, CallableSignature, DiscoverySite, ExtraItem,
    InterceptionRequest, RedirectionTarget,
};
use pretty_assertions::assert_eq;

use crate::RequestRegistry;

use super::*;

fn plan_of(requests: Vec<InterceptionRequest>) -> GenerationPlan {
    let mut registry = RequestRegistry::new();
    registry.extend(requests);
    registry.into_plan().unwrap()
}

#[test]
fn test_render_format() {
    let foo = CallableSignature::parse("A", "foo", "()V", CallableKind::Instance).unwrap();
    let make = CallableSignature::parse("p/Widget", "<init>", "(I)V", CallableKind::Constructor)
        .unwrap();

    let plan = plan_of(vec![
        InterceptionRequest::new(
            foo,
            RedirectionTarget::parse("B", "fooImpl", "(LA;)V").unwrap(),
            [ExtraItem::OriginatingElement {
                element: "A#foo".to_string(),
            }],
        ),
        InterceptionRequest::new(
            make,
            RedirectionTarget::parse("B", "newWidget", "(I)Lp/Widget;").unwrap(),
            [
                ExtraItem::RequiresCapability {
                    capability: "reflection".to_string(),
                },
                ExtraItem::BinaryCompatibility(BinaryCompatibility::AccessorsKept),
            ],
        )
        .discovered_at(DiscoverySite::new("Widget.java", "Widget")),
    ]);

    assert_eq!(
        plan.render(),
        [
            "group B",
            "  A.foo()V#instance -> B.fooImpl(LA;)V [origin(A#foo)]",
            "  p/Widget.<init>(I)V#constructor -> B.newWidget(I)Lp/Widget; \
             [requires-capability(reflection), binary-compatibility(accessors-kept)]",
            "",
        ]
        .join("\n")
    );
}

#[test]
fn test_stats_and_accessors() {
    let sig = |name: &str| CallableSignature::parse("S", name, "()V", CallableKind::Static).unwrap();
    let target = |owner: &str| RedirectionTarget::parse(owner, "impl", "()V").unwrap();
    let no_extras = Vec::<ExtraItem>::new;

    let plan = plan_of(vec![
        InterceptionRequest::new(sig("a"), target("X"), no_extras()),
        InterceptionRequest::new(sig("a"), target("X"), no_extras()),
        InterceptionRequest::new(sig("b"), target("Y"), no_extras()),
    ]);

    assert!(!plan.is_empty());
    assert_eq!(
        plan.stats(),
        PlanStats {
            requests: 3,
            duplicates_merged: 1,
            interceptions: 2,
            groups: 2,
        }
    );

    let x = &plan.groups()[0];
    assert_eq!(x.owner().internal_name(), "X");
    assert!(!x.is_empty());
    assert_eq!(x.members()[0].sites(), &[DiscoverySite::unknown(), DiscoverySite::unknown()]);
}

#[test]
fn test_default_plan_is_empty() {
    let plan = GenerationPlan::default();
    assert!(plan.is_empty());
    assert_eq!(plan.stats(), PlanStats::default());
    assert_eq!(plan.render(), "");
}
