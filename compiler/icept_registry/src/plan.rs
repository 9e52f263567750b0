//! The ordered, validated output of the registry.

use std::fmt::Write;

use icept_model::{
    CallableSignature, DiscoverySite, ExtrasContainer, RedirectionTarget, TypeRef,
};

/// A request after duplicate merging: one per intercepted signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedInterception {
    signature: CallableSignature,
    target: RedirectionTarget,
    extras: ExtrasContainer,
    sites: Vec<DiscoverySite>,
}

impl PlannedInterception {
    pub(crate) fn new(
        signature: CallableSignature,
        target: RedirectionTarget,
        extras: ExtrasContainer,
        sites: Vec<DiscoverySite>,
    ) -> Self {
        debug_assert!(!sites.is_empty(), "planned interception without a site");
        PlannedInterception {
            signature,
            target,
            extras,
            sites,
        }
    }

    pub fn signature(&self) -> &CallableSignature {
        &self.signature
    }

    pub fn target(&self) -> &RedirectionTarget {
        &self.target
    }

    pub fn extras(&self) -> &ExtrasContainer {
        &self.extras
    }

    /// Sites of every request merged into this one, in merge order.
    pub fn sites(&self) -> &[DiscoverySite] {
        &self.sites
    }
}

/// All planned interceptions redirected into one owner type.
///
/// This is the unit the emitter hands to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestGroup {
    owner: TypeRef,
    members: Vec<PlannedInterception>,
}

impl RequestGroup {
    pub(crate) fn new(owner: TypeRef, members: Vec<PlannedInterception>) -> Self {
        RequestGroup { owner, members }
    }

    pub fn owner(&self) -> &TypeRef {
        &self.owner
    }

    /// Members sorted by canonical signature.
    pub fn members(&self) -> &[PlannedInterception] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Counters describing how a plan was built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanStats {
    /// Valid requests handed to the registry.
    pub requests: usize,
    /// Requests folded into an earlier identical signature+target.
    pub duplicates_merged: usize,
    /// Interceptions in the plan after merging.
    pub interceptions: usize,
    pub groups: usize,
}

/// Ordered request groups, ready for emission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationPlan {
    groups: Vec<RequestGroup>,
    stats: PlanStats,
}

impl GenerationPlan {
    pub(crate) fn new(groups: Vec<RequestGroup>, stats: PlanStats) -> Self {
        GenerationPlan { groups, stats }
    }

    /// Groups sorted by owner type.
    pub fn groups(&self) -> &[RequestGroup] {
        &self.groups
    }

    pub fn stats(&self) -> PlanStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Canonical text form of the plan.
    ///
    /// Two plans built from the same request set render to the same bytes.
    ///
    /// ```text
    /// group B
    ///   A.foo()V#instance -> B.fooImpl(LA;)V [origin(A#foo)]
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        for group in &self.groups {
            let _ = writeln!(out, "group {}", group.owner);
            for member in &group.members {
                let _ = writeln!(
                    out,
                    "  {} -> {} {}",
                    member.signature, member.target, member.extras
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests;
