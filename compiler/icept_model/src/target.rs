//! Redirection targets: the implementation an intercepted call is routed to.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::signature::{is_special_name, validate_method_name};
use crate::{ModelError, TypeDescriptor, TypeRef};

/// Where an intercepted call is redirected: `<owner>.<name><descriptor>`.
///
/// The owner is also the grouping key of the generation plan: every target
/// with the same owner ends up in the same interceptor unit.
#[derive(Clone)]
pub struct RedirectionTarget {
    owner: TypeRef,
    implementation_name: Box<str>,
    implementation_descriptor: TypeDescriptor,
    canonical: Box<str>,
}

impl RedirectionTarget {
    pub fn new(
        owner: TypeRef,
        implementation_name: impl Into<String>,
        implementation_descriptor: TypeDescriptor,
    ) -> Result<Self, ModelError> {
        let name = implementation_name.into();
        let invalid = |reason: &str| ModelError::InvalidTarget {
            callable: format!("{owner}.{name}{implementation_descriptor}"),
            reason: reason.to_string(),
        };

        validate_method_name(&name).map_err(invalid)?;
        if is_special_name(&name) {
            return Err(invalid("implementations must be ordinary methods"));
        }

        let canonical = format!("{owner}.{name}{implementation_descriptor}").into_boxed_str();
        Ok(RedirectionTarget {
            owner,
            implementation_name: name.into_boxed_str(),
            implementation_descriptor,
            canonical,
        })
    }

    /// Validate and build a target from unparsed text.
    pub fn parse(owner: &str, name: &str, descriptor: &str) -> Result<Self, ModelError> {
        let invalid = |err: ModelError| ModelError::InvalidTarget {
            callable: format!("{owner}.{name}{descriptor}"),
            reason: err.to_string(),
        };
        let owner_ref = TypeRef::new(owner).map_err(invalid)?;
        let descriptor = TypeDescriptor::parse(descriptor).map_err(invalid)?;
        Self::new(owner_ref, name, descriptor)
    }

    pub fn owner(&self) -> &TypeRef {
        &self.owner
    }

    pub fn implementation_name(&self) -> &str {
        &self.implementation_name
    }

    pub fn implementation_descriptor(&self) -> &TypeDescriptor {
        &self.implementation_descriptor
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for RedirectionTarget {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for RedirectionTarget {}

impl Hash for RedirectionTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for RedirectionTarget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RedirectionTarget {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for RedirectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl fmt::Debug for RedirectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedirectionTarget({})", self.canonical)
    }
}
