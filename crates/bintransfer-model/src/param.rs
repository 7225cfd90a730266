//! Compiled container parameters.

use crate::generic::GenericType;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Kind and modifiers of a param.
    ///
    /// Exactly one of `GENERIC`, `VECTOR` and `NON_GENERIC` is set.
    /// `STRICT_SIZE` only accompanies `GENERIC`; `OPTIONAL` may accompany any kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[repr(transparent)]
    pub struct ParamFlags: u8 {
        /// Primitive wire value
        const GENERIC = 0b0000_0001;
        /// Length-prefixed sequence
        const VECTOR = 0b0000_0010;
        /// Nested container
        const NON_GENERIC = 0b0000_0100;
        /// Exact byte or character length
        const STRICT_SIZE = 0b0000_1000;
        /// Preceded by a presence flag on the wire
        const OPTIONAL = 0b0001_0000;
    }
}

impl ParamFlags {
    /// Bits selecting the param kind.
    pub const KIND: ParamFlags = ParamFlags::GENERIC
        .union(ParamFlags::VECTOR)
        .union(ParamFlags::NON_GENERIC);
}

/// One field of a container, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub doc: Vec<String>,
    #[serde(rename = "type")]
    pub flags: ParamFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_type: Option<GenericType>,
    /// Element type: a generic name, or a container type/constructor/trait name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_of: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// Element of a vector param.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorItem<'a> {
    Generic(GenericType),
    Container(&'a str),
}

/// Wire layout of a param, ignoring the optional modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape<'a> {
    Generic(GenericType),
    StrictSize(GenericType, u32),
    Vector(VectorItem<'a>),
    Reference(&'a str),
}

impl Param {
    fn with_flags(name: impl Into<String>, flags: ParamFlags) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            flags,
            generic_type: None,
            vector_of: None,
            container_reference: None,
            size: None,
        }
    }

    /// Primitive param.
    pub fn generic(name: impl Into<String>, generic_type: GenericType) -> Self {
        Self {
            generic_type: Some(generic_type),
            ..Self::with_flags(name, ParamFlags::GENERIC)
        }
    }

    /// Primitive param with an exact length.
    pub fn strict(name: impl Into<String>, generic_type: GenericType, size: u32) -> Self {
        Self {
            generic_type: Some(generic_type),
            size: Some(size),
            ..Self::with_flags(name, ParamFlags::GENERIC | ParamFlags::STRICT_SIZE)
        }
    }

    /// `Vector<of>` param.
    pub fn vector(name: impl Into<String>, of: impl Into<String>) -> Self {
        Self {
            vector_of: Some(of.into()),
            ..Self::with_flags(name, ParamFlags::VECTOR)
        }
    }

    /// Nested container param.
    pub fn reference(name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            container_reference: Some(reference.into()),
            ..Self::with_flags(name, ParamFlags::NON_GENERIC)
        }
    }

    /// Set or clear the optional modifier.
    pub fn optional(mut self, optional: bool) -> Self {
        self.flags.set(ParamFlags::OPTIONAL, optional);
        self
    }

    pub fn with_doc(mut self, doc: Vec<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.flags.contains(ParamFlags::OPTIONAL)
    }

    /// Wire layout, or `None` if the flags and fields disagree.
    pub fn shape(&self) -> Option<ParamShape<'_>> {
        let kind = self.flags.intersection(ParamFlags::KIND);
        if kind == ParamFlags::GENERIC {
            let generic = self.generic_type?;
            if self.flags.contains(ParamFlags::STRICT_SIZE) {
                Some(ParamShape::StrictSize(generic, self.size?))
            } else {
                Some(ParamShape::Generic(generic))
            }
        } else if kind == ParamFlags::VECTOR && !self.flags.contains(ParamFlags::STRICT_SIZE) {
            let of = self.vector_of.as_deref()?;
            Some(ParamShape::Vector(match GenericType::from_name(of) {
                Some(generic) => VectorItem::Generic(generic),
                None => VectorItem::Container(of),
            }))
        } else if kind == ParamFlags::NON_GENERIC && !self.flags.contains(ParamFlags::STRICT_SIZE) {
            Some(ParamShape::Reference(self.container_reference.as_deref()?))
        } else {
            None
        }
    }

    /// Canonical text contributing to the owning container's ID.
    ///
    /// `name?:kind#target` with the optional marker only when set.
    pub fn signature(&self) -> String {
        let marker = if self.is_optional() { "?" } else { "" };
        let tag = match self.shape() {
            Some(ParamShape::Generic(g)) => format!("generic#{}", g),
            Some(ParamShape::StrictSize(g, size)) => format!("generic#{}[{}]", g, size),
            Some(ParamShape::Vector(VectorItem::Generic(g))) => format!("vector#{}", g),
            Some(ParamShape::Vector(VectorItem::Container(of))) => format!("vector#{}", of),
            Some(ParamShape::Reference(r)) => format!("non_generic#{}", r),
            None => format!("invalid#{}", self.flags.bits()),
        };
        format!("{}{}:{}", self.name, marker, tag)
    }
}
