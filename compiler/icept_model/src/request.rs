//! Interception requests and the raw discovery tuples they are built from.

use std::fmt;

use crate::{
    CallableKind, CallableSignature, ExtraItem, ExtrasContainer, InvalidRequest,
    RedirectionTarget,
};

/// Where a request was discovered: a source unit and a declaration within it.
///
/// Sites are ordered lexicographically by unit, then element. The registry
/// relies on that order to merge duplicates the same way on every run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscoverySite {
    unit: String,
    element: String,
}

impl DiscoverySite {
    pub fn new(unit: impl Into<String>, element: impl Into<String>) -> Self {
        DiscoverySite {
            unit: unit.into(),
            element: element.into(),
        }
    }

    /// Placeholder for requests built without scanner context.
    pub fn unknown() -> Self {
        Self::new("<unknown>", "")
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn element(&self) -> &str {
        &self.element
    }
}

impl fmt::Display for DiscoverySite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.element.is_empty() {
            f.write_str(&self.unit)
        } else {
            write!(f, "{}: {}", self.unit, self.element)
        }
    }
}

/// One validated "redirect this call to that implementation" fact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterceptionRequest {
    signature: CallableSignature,
    target: RedirectionTarget,
    extras: ExtrasContainer,
    site: DiscoverySite,
}

impl InterceptionRequest {
    /// Build a request. The extras are moved into a container owned by the
    /// request, which hands out shared access only.
    pub fn new(
        signature: CallableSignature,
        target: RedirectionTarget,
        extras: impl IntoIterator<Item = ExtraItem>,
    ) -> Self {
        InterceptionRequest {
            signature,
            target,
            extras: extras.into_iter().collect(),
            site: DiscoverySite::unknown(),
        }
    }

    #[must_use]
    pub fn discovered_at(mut self, site: DiscoverySite) -> Self {
        self.site = site;
        self
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

    pub fn site(&self) -> &DiscoverySite {
        &self.site
    }

    pub fn into_parts(
        self,
    ) -> (
        CallableSignature,
        RedirectionTarget,
        ExtrasContainer,
        DiscoverySite,
    ) {
        (self.signature, self.target, self.extras, self.site)
    }
}

/// An owner/name/descriptor triple as reported by a scanner, not yet validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCallable {
    pub owner: String,
    pub name: String,
    pub descriptor: String,
}

impl RawCallable {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        RawCallable {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

/// A discovery tuple straight from the scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDiscovery {
    pub site: DiscoverySite,
    pub callable: RawCallable,
    pub kind: CallableKind,
    pub target: RawCallable,
    pub extras: Vec<ExtraItem>,
}

impl RawDiscovery {
    /// Validate the tuple into a request, or report what is wrong with it
    /// and where it was found.
    pub fn into_request(self) -> Result<InterceptionRequest, InvalidRequest> {
        let RawDiscovery {
            site,
            callable,
            kind,
            target,
            extras,
        } = self;

        let invalid = |error| InvalidRequest::new(site.clone(), error);
        let signature =
            CallableSignature::parse(&callable.owner, &callable.name, &callable.descriptor, kind)
                .map_err(invalid)?;
        let target = RedirectionTarget::parse(&target.owner, &target.name, &target.descriptor)
            .map_err(invalid)?;

        Ok(InterceptionRequest::new(signature, target, extras).discovered_at(site))
    }
}
