//! Compiled containers and their structural IDs.

use crate::param::Param;
use serde::{Deserialize, Serialize};

/// One compiled constructor: a concrete encodable record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// CRC32 of [`Container::signature`]
    pub id: u32,
    /// Fully-qualified constructor name, unique within a model
    pub name: String,
    /// Fully-qualified type name, shared by every member of a type group
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub doc: Vec<String>,
}

impl Container {
    /// Create a container with no params and an ID matching its signature.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let mut container = Self {
            id: 0,
            name: name.into(),
            type_name: type_name.into(),
            traits: Vec::new(),
            params: Vec::new(),
            doc: Vec::new(),
        };
        container.assign_id();
        container
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self.assign_id();
        self
    }

    pub fn with_traits(mut self, traits: Vec<String>) -> Self {
        self.traits = traits;
        self.assign_id();
        self
    }

    pub fn with_doc(mut self, doc: Vec<String>) -> Self {
        self.doc = doc;
        self
    }

    /// Canonical structural signature.
    ///
    /// `name:type`, then ` implements a,b` when traits are present, then a
    /// space and the space-separated [`Param::signature`]s in declaration
    /// order. Docs never contribute.
    pub fn signature(&self) -> String {
        let mut signature = format!("{}:{}", self.name, self.type_name);
        if !self.traits.is_empty() {
            signature.push_str(" implements ");
            signature.push_str(&self.traits.join(","));
        }
        signature.push(' ');
        let params: Vec<String> = self.params.iter().map(Param::signature).collect();
        signature.push_str(&params.join(" "));
        signature
    }

    /// CRC32 (IEEE) of the signature.
    pub fn compute_id(&self) -> u32 {
        crc32fast::hash(self.signature().as_bytes())
    }

    /// Recompute `id` after the structural fields changed.
    pub fn assign_id(&mut self) {
        self.id = self.compute_id();
    }

    pub fn implements(&self, trait_name: &str) -> bool {
        self.traits.iter().any(|t| t == trait_name)
    }
}

/// One independently compiled list of containers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSet {
    pub containers: Vec<Container>,
}

impl ModelSet {
    pub fn new(containers: Vec<Container>) -> Self {
        Self { containers }
    }

    pub fn get(&self, name: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.name == name)
    }
}

impl From<Vec<Container>> for ModelSet {
    fn from(containers: Vec<Container>) -> Self {
        Self::new(containers)
    }
}
