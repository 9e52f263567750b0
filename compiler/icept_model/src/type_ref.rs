//! References to JVM types by internal binary name.

use std::fmt;

use crate::ModelError;

/// Characters that may not appear inside a name segment.
///
/// `(` and `)` are excluded so canonical `owner.name(descriptor)` strings
/// stay unambiguous.
const FORBIDDEN: &[char] = &['.', ';', '[', '<', '>', '(', ')'];

/// A type identified by its internal binary name (`java/lang/String`).
///
/// Ordering is lexicographic on the internal name, which is also the
/// canonical string used for plan ordering.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeRef(Box<str>);

impl TypeRef {
    pub fn new(internal_name: impl Into<String>) -> Result<Self, ModelError> {
        let name = internal_name.into();
        match validate_internal_name(&name) {
            Ok(()) => Ok(TypeRef(name.into_boxed_str())),
            Err(reason) => Err(ModelError::InvalidTypeRef { name, reason }),
        }
    }

    #[inline]
    pub fn internal_name(&self) -> &str {
        &self.0
    }

    /// The last path segment (`String` for `java/lang/String`).
    pub fn simple_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(&*self.0, |(_, simple)| simple)
    }

    /// The package path, if the type is not in the default package.
    pub fn package(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(package, _)| package)
    }

    /// Field descriptor form (`Ljava/lang/String;`).
    pub fn descriptor(&self) -> String {
        format!("L{};", self.0)
    }
}

fn validate_internal_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("name is empty");
    }
    for segment in name.split('/') {
        if segment.is_empty() {
            return Err("name has an empty path segment");
        }
        if segment.contains(FORBIDDEN) {
            return Err("name contains one of `.`, `;`, `[`, `<`, `>`, `(`, `)`");
        }
        if segment.chars().any(char::is_whitespace) {
            return Err("name contains whitespace");
        }
    }
    Ok(())
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.0)
    }
}

#[cfg(test)]
mod tests;
