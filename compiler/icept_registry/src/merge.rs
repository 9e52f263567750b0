//! Resolution of all requests that share one intercepted signature.

use icept_model::{CallableSignature, ExtrasContainer, InterceptionRequest};

use crate::{Competitor, ConflictingInterception, PlannedInterception};

/// Collapse the candidates for `signature` into one planned interception.
///
/// Candidates are sorted by target, then discovery site, then extras
/// before anything else happens, so the result never depends on the
/// order they were inserted in. Identical targets are merged by
/// concatenating extras in that order; distinct targets are a conflict.
pub(crate) fn resolve(
    signature: CallableSignature,
    mut candidates: Vec<InterceptionRequest>,
) -> Result<PlannedInterception, ConflictingInterception> {
    debug_assert!(!candidates.is_empty());

    candidates.sort_by_cached_key(|request| {
        (
            request.target().clone(),
            request.site().clone(),
            request.extras().clone(),
        )
    });

    let [Competitor { target, sites }] = match <[Competitor; 1]>::try_from(competitors(&candidates))
    {
        Ok(single) => single,
        Err(competitors) => {
            tracing::debug!(
                signature = %signature,
                targets = competitors.len(),
                "conflicting interception"
            );
            return Err(ConflictingInterception::new(signature, competitors));
        }
    };

    if sites.len() > 1 {
        tracing::trace!(
            signature = %signature,
            merged = sites.len(),
            "merged duplicate interception requests"
        );
    }

    let mut extras = ExtrasContainer::new();
    for request in candidates {
        let (_, _, request_extras, _) = request.into_parts();
        extras.extend(request_extras);
    }
    Ok(PlannedInterception::new(signature, target, extras, sites))
}

/// Group sorted candidates into runs of equal targets.
fn competitors(sorted: &[InterceptionRequest]) -> Vec<Competitor> {
    let mut out: Vec<Competitor> = Vec::new();
    for request in sorted {
        match out.last_mut() {
            Some(last) if &last.target == request.target() => last.sites.push(request.site().clone()),
            _ => out.push(Competitor {
                target: request.target().clone(),
                sites: vec![request.site().clone()],
            }),
        }
    }
    out
}
