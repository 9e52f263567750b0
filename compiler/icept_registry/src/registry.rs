//! Accumulation point for discovered requests.

use std::collections::BTreeMap;

use icept_model::{CallableSignature, InterceptionRequest, InvalidRequest, TypeRef};
use rustc_hash::FxHashMap;

use crate::merge;
use crate::{GenerationPlan, PlanError, PlanErrors, PlanStats, PlannedInterception, RequestGroup};

/// Collects requests keyed by intercepted signature.
///
/// Requests are moved in and never handed back, so nothing can mutate a
/// request after it has been registered. The registry itself is single-owner;
/// concurrent discovery funnels into it through [`collect`](crate::collect).
#[derive(Debug, Default)]
pub struct RequestRegistry {
    by_signature: FxHashMap<CallableSignature, Vec<InterceptionRequest>>,
    invalid: Vec<InvalidRequest>,
    requests: usize,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, request: InterceptionRequest) {
        tracing::trace!(
            signature = %request.signature(),
            target = %request.target(),
            site = %request.site(),
            "registering interception request"
        );
        self.requests += 1;
        self.by_signature
            .entry(request.signature().clone())
            .or_default()
            .push(request);
    }

    /// Remember a discovery that failed validation. It fails the plan later,
    /// together with every other problem.
    pub fn insert_invalid(&mut self, invalid: InvalidRequest) {
        tracing::debug!(site = %invalid.site(), error = %invalid.error(), "invalid discovery");
        self.invalid.push(invalid);
    }

    /// Record the outcome of validating one discovery tuple.
    pub fn record(&mut self, discovered: Result<InterceptionRequest, InvalidRequest>) {
        match discovered {
            Ok(request) => self.insert(request),
            Err(invalid) => self.insert_invalid(invalid),
        }
    }

    /// Number of valid requests registered so far, duplicates included.
    pub fn len(&self) -> usize {
        self.requests
    }

    pub fn is_empty(&self) -> bool {
        self.requests == 0
    }

    /// Number of distinct intercepted signatures.
    pub fn signature_count(&self) -> usize {
        self.by_signature.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    /// Merge, validate, group and order everything registered.
    ///
    /// Fails with every invalid request and every conflict found; in that
    /// case no plan is produced at all.
    pub fn into_plan(self) -> Result<GenerationPlan, PlanErrors> {
        let _span = tracing::debug_span!("build_plan", requests = self.requests).entered();

        let mut errors: Vec<PlanError> = self
            .invalid
            .into_iter()
            .map(PlanError::InvalidRequest)
            .collect();

        let mut by_owner: BTreeMap<TypeRef, Vec<PlannedInterception>> = BTreeMap::new();
        for (signature, candidates) in self.by_signature {
            match merge::resolve(signature, candidates) {
                Ok(planned) => by_owner
                    .entry(planned.target().owner().clone())
                    .or_default()
                    .push(planned),
                Err(conflict) => errors.push(PlanError::ConflictingInterception(conflict)),
            }
        }

        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "generation plan rejected");
            return Err(PlanErrors::new(errors));
        }

        let mut stats = PlanStats {
            requests: self.requests,
            ..PlanStats::default()
        };
        let groups: Vec<RequestGroup> = by_owner
            .into_iter()
            .map(|(owner, mut members)| {
                members.sort_by(|a, b| a.signature().cmp(b.signature()));
                stats.interceptions += members.len();
                RequestGroup::new(owner, members)
            })
            .collect();
        stats.groups = groups.len();
        stats.duplicates_merged = stats.requests - stats.interceptions;

        tracing::debug!(
            groups = stats.groups,
            interceptions = stats.interceptions,
            duplicates_merged = stats.duplicates_merged,
            "generation plan built"
        );
        Ok(GenerationPlan::new(groups, stats))
    }
}

impl Extend<InterceptionRequest> for RequestRegistry {
    fn extend<I: IntoIterator<Item = InterceptionRequest>>(&mut self, iter: I) {
        for request in iter {
            self.insert(request);
        }
    }
}
