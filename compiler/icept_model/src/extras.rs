//! Request extras: ordered, kind-indexed metadata attached to a request.
//!
//! The set of extra kinds is closed so backends can match exhaustively on
//! [`ExtraItem`]. The container is an append-only multiset: duplicates are
//! legal and kept, and insertion order is part of the generated output.

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use crate::TypeRef;

/// Discriminant of an [`ExtraItem`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtraKind {
    OriginatingElement,
    RequiresCapability,
    BinaryCompatibility,
    InterceptJvmCalls,
    InterceptGroovyCalls,
}

impl ExtraKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtraKind::OriginatingElement => "origin",
            ExtraKind::RequiresCapability => "requires-capability",
            ExtraKind::BinaryCompatibility => "binary-compatibility",
            ExtraKind::InterceptJvmCalls => "jvm-interceptor",
            ExtraKind::InterceptGroovyCalls => "groovy-interceptor",
        }
    }
}

impl fmt::Display for ExtraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an upgraded API stays binary compatible with old callers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryCompatibility {
    /// Old accessors remain on the type; calls are intercepted anyway.
    AccessorsKept,
    /// Old accessors were removed and only exist through interception.
    AccessorsReplaced,
}

impl BinaryCompatibility {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryCompatibility::AccessorsKept => "accessors-kept",
            BinaryCompatibility::AccessorsReplaced => "accessors-replaced",
        }
    }
}

/// One piece of metadata on an interception request.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtraItem {
    /// The declaration the request was derived from.
    OriginatingElement { element: String },
    /// The redirect only applies when the named capability is present.
    RequiresCapability { capability: String },
    BinaryCompatibility(BinaryCompatibility),
    /// Generate a bytecode-level interceptor in `implementation_class`.
    InterceptJvmCalls { implementation_class: TypeRef },
    /// Generate a dynamic call-site interceptor in `implementation_class`.
    InterceptGroovyCalls { implementation_class: TypeRef },
}

impl ExtraItem {
    pub fn kind(&self) -> ExtraKind {
        match self {
            ExtraItem::OriginatingElement { .. } => ExtraKind::OriginatingElement,
            ExtraItem::RequiresCapability { .. } => ExtraKind::RequiresCapability,
            ExtraItem::BinaryCompatibility(_) => ExtraKind::BinaryCompatibility,
            ExtraItem::InterceptJvmCalls { .. } => ExtraKind::InterceptJvmCalls,
            ExtraItem::InterceptGroovyCalls { .. } => ExtraKind::InterceptGroovyCalls,
        }
    }
}

impl fmt::Display for ExtraItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            ExtraItem::OriginatingElement { element } => write!(f, "{kind}({element})"),
            ExtraItem::RequiresCapability { capability } => write!(f, "{kind}({capability})"),
            ExtraItem::BinaryCompatibility(compat) => write!(f, "{kind}({})", compat.as_str()),
            ExtraItem::InterceptJvmCalls {
                implementation_class,
            }
            | ExtraItem::InterceptGroovyCalls {
                implementation_class,
            } => write!(f, "{kind}({implementation_class})"),
        }
    }
}

/// Ordered multiset of [`ExtraItem`]s.
///
/// Ordering compares items element by element, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtrasContainer {
    items: Vec<ExtraItem>,
}

impl ExtrasContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. No deduplication happens here.
    pub fn add(&mut self, item: ExtraItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, ExtraItem> {
        self.items.iter()
    }

    /// All items of `kind`, in insertion order.
    ///
    /// The view is lazy and can be restarted by cloning it or calling this
    /// again; it always reflects the container as of the call.
    pub fn items_of_kind(&self, kind: ExtraKind) -> ItemsOfKind<'_> {
        ItemsOfKind {
            items: self.items.iter(),
            kind,
        }
    }

    /// The first item of `kind`, for callers that only expect one.
    pub fn first_of_kind(&self, kind: ExtraKind) -> Option<&ExtraItem> {
        self.items_of_kind(kind).next()
    }

    pub fn contains_kind(&self, kind: ExtraKind) -> bool {
        self.first_of_kind(kind).is_some()
    }
}

impl Extend<ExtraItem> for ExtrasContainer {
    fn extend<I: IntoIterator<Item = ExtraItem>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl FromIterator<ExtraItem> for ExtrasContainer {
    fn from_iter<I: IntoIterator<Item = ExtraItem>>(iter: I) -> Self {
        ExtrasContainer {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ExtrasContainer {
    type Item = ExtraItem;
    type IntoIter = std::vec::IntoIter<ExtraItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtrasContainer {
    type Item = &'a ExtraItem;
    type IntoIter = slice::Iter<'a, ExtraItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for ExtrasContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

/// Iterator returned by [`ExtrasContainer::items_of_kind`].
#[derive(Clone, Debug)]
pub struct ItemsOfKind<'a> {
    items: slice::Iter<'a, ExtraItem>,
    kind: ExtraKind,
}

impl<'a> Iterator for ItemsOfKind<'a> {
    type Item = &'a ExtraItem;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.kind;
        self.items.find(|item| item.kind() == kind)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.items.size_hint().1)
    }
}

impl DoubleEndedIterator for ItemsOfKind<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let kind = self.kind;
        self.items.rfind(|item| item.kind() == kind)
    }
}

impl FusedIterator for ItemsOfKind<'_> {}
