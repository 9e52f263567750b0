//! Text listing backend.
//!
//! Renders each interceptor unit as a deterministic, human-readable listing
//! of what a bytecode backend would generate for it. Useful for tests,
//! snapshot comparisons and `--dry-run` style tooling.

use std::fmt::Write;

use icept_model::{ExtraKind, TypeRef};
use icept_registry::{PlannedInterception, RequestGroup};

use crate::{BackendError, EmissionBackend};

/// The listing for one interceptor unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitListing {
    pub owner: TypeRef,
    pub text: String,
}

/// Backend producing [`UnitListing`]s. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct ListingBackend;

impl ListingBackend {
    pub fn new() -> Self {
        ListingBackend
    }
}

impl EmissionBackend for ListingBackend {
    type Artifact = UnitListing;

    fn emit_unit(&mut self, group: &RequestGroup) -> Result<UnitListing, BackendError> {
        let mut text = String::new();
        let plural = if group.len() == 1 { "" } else { "s" };
        let _ = writeln!(
            text,
            "interceptor unit {} ({} interception{plural})",
            group.owner(),
            group.len()
        );
        for member in group.members() {
            write_member(&mut text, member);
        }
        Ok(UnitListing {
            owner: group.owner().clone(),
            text,
        })
    }
}

fn write_member(out: &mut String, member: &PlannedInterception) {
    let signature = member.signature();
    let _ = writeln!(out, "  intercept {signature}");
    let _ = writeln!(out, "    call {}", member.target());
    if signature.kind().has_receiver() {
        let _ = writeln!(out, "    receiver {}", signature.owner());
    }
    // Extras keep their insertion order; only the line prefix depends on kind.
    for item in member.extras() {
        let prefix = match item.kind() {
            ExtraKind::InterceptJvmCalls | ExtraKind::InterceptGroovyCalls => "dispatch",
            ExtraKind::OriginatingElement
            | ExtraKind::RequiresCapability
            | ExtraKind::BinaryCompatibility => "extra",
        };
        let _ = writeln!(out, "    {prefix} {item}");
    }
}
