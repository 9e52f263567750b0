//! Method descriptors in JVM syntax.
//!
//! ```text
//! descriptor  := '(' field-type* ')' return-type
//! return-type := 'V' | field-type
//! field-type  := 'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z'
//!              | 'L' internal-name ';'
//!              | '[' field-type
//! ```
//!
//! Parsing is strict: the rendered form of a parsed descriptor is exactly the
//! input text, so two descriptors are equal iff their text is equal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::{ModelError, TypeRef};

/// Upper bound on array nesting, as imposed by the class file format.
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// The shape of a single parameter or non-void return value.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum FieldType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Object(TypeRef),
    /// One array dimension; nested for multi-dimensional arrays.
    Array(Box<FieldType>),
}

impl FieldType {
    fn primitive(tag: u8) -> Option<FieldType> {
        let ty = match tag {
            b'B' => FieldType::Byte,
            b'C' => FieldType::Char,
            b'D' => FieldType::Double,
            b'F' => FieldType::Float,
            b'I' => FieldType::Int,
            b'J' => FieldType::Long,
            b'S' => FieldType::Short,
            b'Z' => FieldType::Boolean,
            _ => return None,
        };
        Some(ty)
    }

    pub fn array_of(element: FieldType) -> FieldType {
        FieldType::Array(Box::new(element))
    }

    /// Number of array dimensions (0 for non-arrays).
    pub fn dimensions(&self) -> usize {
        let mut dims = 0;
        let mut ty = self;
        while let FieldType::Array(element) = ty {
            dims += 1;
            ty = element;
        }
        dims
    }

    fn write_descriptor(&self, out: &mut String) {
        match self {
            FieldType::Byte => out.push('B'),
            FieldType::Char => out.push('C'),
            FieldType::Double => out.push('D'),
            FieldType::Float => out.push('F'),
            FieldType::Int => out.push('I'),
            FieldType::Long => out.push('J'),
            FieldType::Short => out.push('S'),
            FieldType::Boolean => out.push('Z'),
            FieldType::Object(ty) => {
                out.push('L');
                out.push_str(ty.internal_name());
                out.push(';');
            }
            FieldType::Array(element) => {
                out.push('[');
                element.write_descriptor(out);
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        self.write_descriptor(&mut text);
        f.write_str(&text)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ReturnType {
    Void,
    Value(FieldType),
}

impl ReturnType {
    pub fn is_void(&self) -> bool {
        matches!(self, ReturnType::Void)
    }
}

/// A parsed method descriptor such as `(Ljava/lang/String;I)V`.
#[derive(Clone)]
pub struct TypeDescriptor {
    params: SmallVec<[FieldType; 4]>,
    ret: ReturnType,
    text: Box<str>,
}

impl TypeDescriptor {
    pub fn parse(text: &str) -> Result<Self, ModelError> {
        let (params, ret) = Parser { src: text, pos: 0 }.method()?;
        Ok(TypeDescriptor {
            params,
            ret,
            text: text.into(),
        })
    }

    /// Build a descriptor from already-validated parts.
    pub fn from_parts(params: impl IntoIterator<Item = FieldType>, ret: ReturnType) -> Self {
        let params: SmallVec<[FieldType; 4]> = params.into_iter().collect();
        let mut text = String::from("(");
        for param in &params {
            param.write_descriptor(&mut text);
        }
        text.push(')');
        match &ret {
            ReturnType::Void => text.push('V'),
            ReturnType::Value(ty) => ty.write_descriptor(&mut text),
        }
        TypeDescriptor {
            params,
            ret,
            text: text.into_boxed_str(),
        }
    }

    pub fn params(&self) -> &[FieldType] {
        &self.params
    }

    pub fn return_type(&self) -> &ReturnType {
        &self.ret
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for TypeDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.text)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn error(&self, reason: impl Into<String>) -> ModelError {
        ModelError::InvalidDescriptor {
            descriptor: self.src.to_string(),
            reason: reason.into(),
        }
    }

    // `pos` only ever advances past ASCII bytes, so it is always a char boundary.
    fn unexpected(&self) -> ModelError {
        match self.src[self.pos..].chars().next() {
            Some(c) => self.error(format!("unexpected `{c}` at offset {}", self.pos)),
            None => self.error("unexpected end of descriptor"),
        }
    }

    fn method(mut self) -> Result<(SmallVec<[FieldType; 4]>, ReturnType), ModelError> {
        if self.peek() != Some(b'(') {
            return Err(self.error("descriptor must start with `(`"));
        }
        self.pos += 1;

        let mut params = SmallVec::new();
        loop {
            match self.peek() {
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error("unterminated parameter list")),
                Some(_) => params.push(self.field_type()?),
            }
        }

        let ret = if self.peek() == Some(b'V') {
            self.pos += 1;
            ReturnType::Void
        } else {
            ReturnType::Value(self.field_type()?)
        };

        if self.pos != self.src.len() {
            return Err(self.error(format!(
                "trailing characters after return type at offset {}",
                self.pos
            )));
        }
        Ok((params, ret))
    }

    fn field_type(&mut self) -> Result<FieldType, ModelError> {
        let mut dimensions = 0;
        while self.peek() == Some(b'[') {
            dimensions += 1;
            self.pos += 1;
        }
        if dimensions > MAX_ARRAY_DIMENSIONS {
            return Err(self.error(format!(
                "array type exceeds {MAX_ARRAY_DIMENSIONS} dimensions"
            )));
        }

        let mut ty = match self.peek() {
            Some(b'L') => self.object_type()?,
            Some(b'V') => {
                return Err(self.error(format!(
                    "`V` at offset {} is only valid as a return type",
                    self.pos
                )))
            }
            Some(tag) => match FieldType::primitive(tag) {
                Some(ty) => {
                    self.pos += 1;
                    ty
                }
                None => return Err(self.unexpected()),
            },
            None => return Err(self.unexpected()),
        };

        for _ in 0..dimensions {
            ty = FieldType::array_of(ty);
        }
        Ok(ty)
    }

    fn object_type(&mut self) -> Result<FieldType, ModelError> {
        let src = self.src;
        let start = self.pos + 1;
        let Some(len) = src[start..].find(';') else {
            return Err(self.error(format!(
                "unterminated object type at offset {}",
                self.pos
            )));
        };
        let ty = TypeRef::new(&src[start..start + len]).map_err(|err| {
            self.error(format!("bad object type at offset {}: {err}", self.pos))
        })?;
        self.pos = start + len + 1;
        Ok(FieldType::Object(ty))
    }
}
