//! Intercepted callable signatures.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{ModelError, TypeDescriptor, TypeRef};

pub(crate) const CONSTRUCTOR_NAME: &str = "<init>";
pub(crate) const CLASS_INITIALIZER_NAME: &str = "<clinit>";

/// How the intercepted callable is invoked at the call site.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallableKind {
    Static,
    Instance,
    Constructor,
}

impl CallableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CallableKind::Static => "static",
            CallableKind::Instance => "instance",
            CallableKind::Constructor => "constructor",
        }
    }

    /// Whether the call site passes a receiver that the interceptor must accept.
    pub fn has_receiver(self) -> bool {
        matches!(self, CallableKind::Instance)
    }
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared method-name rules for intercepted callables and targets.
pub(crate) fn validate_method_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    if name == CONSTRUCTOR_NAME || name == CLASS_INITIALIZER_NAME {
        return Ok(());
    }
    if name.contains(['.', ';', '[', '/', '<', '>']) {
        return Err("name contains one of `.`, `;`, `[`, `/`, `<`, `>`");
    }
    if name.chars().any(char::is_whitespace) {
        return Err("name contains whitespace");
    }
    Ok(())
}

pub(crate) fn is_special_name(name: &str) -> bool {
    name == CONSTRUCTOR_NAME || name == CLASS_INITIALIZER_NAME
}

/// The call being intercepted: owner, name, descriptor and call kind.
///
/// Equality, hashing and ordering use the canonical form
/// `<owner>.<name><descriptor>#<kind>`, so two signatures found at different
/// discovery sites compare equal whenever they describe the same call.
#[derive(Clone)]
pub struct CallableSignature {
    owner: TypeRef,
    name: Box<str>,
    descriptor: TypeDescriptor,
    kind: CallableKind,
    canonical: Box<str>,
}

impl CallableSignature {
    pub fn new(
        owner: TypeRef,
        name: impl Into<String>,
        descriptor: TypeDescriptor,
        kind: CallableKind,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        let invalid = |reason: &str| ModelError::InvalidSignature {
            callable: format!("{owner}.{name}{descriptor}"),
            reason: reason.to_string(),
        };

        validate_method_name(&name).map_err(invalid)?;
        match kind {
            CallableKind::Constructor => {
                if name != CONSTRUCTOR_NAME {
                    return Err(invalid("constructors must be named `<init>`"));
                }
                if !descriptor.return_type().is_void() {
                    return Err(invalid("constructors must return `V`"));
                }
            }
            CallableKind::Static | CallableKind::Instance => {
                if is_special_name(&name) {
                    return Err(invalid(
                        "`<init>` and `<clinit>` may only name constructors",
                    ));
                }
            }
        }

        let canonical = format!("{owner}.{name}{descriptor}#{kind}").into_boxed_str();
        Ok(CallableSignature {
            owner,
            name: name.into_boxed_str(),
            descriptor,
            kind,
            canonical,
        })
    }

    /// Validate and build a signature from unparsed text.
    pub fn parse(
        owner: &str,
        name: &str,
        descriptor: &str,
        kind: CallableKind,
    ) -> Result<Self, ModelError> {
        let invalid = |err: ModelError| ModelError::InvalidSignature {
            callable: format!("{owner}.{name}{descriptor}"),
            reason: err.to_string(),
        };
        let owner_ref = TypeRef::new(owner).map_err(invalid)?;
        let descriptor = TypeDescriptor::parse(descriptor).map_err(invalid)?;
        Self::new(owner_ref, name, descriptor, kind)
    }

    pub fn owner(&self) -> &TypeRef {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    pub fn kind(&self) -> CallableKind {
        self.kind
    }

    /// Canonical string, used as the conflict key and the in-group sort key.
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for CallableSignature {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for CallableSignature {}

impl Hash for CallableSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for CallableSignature {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CallableSignature {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for CallableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl fmt::Debug for CallableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallableSignature({})", self.canonical)
    }
}
