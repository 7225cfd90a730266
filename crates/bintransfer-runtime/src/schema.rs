//! Container registry and the public encode/decode entry points.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::value::Value;
use bintransfer_codec::{Deserializer, Serializer};
use bintransfer_model::{Container, ModelSet};
use indexmap::IndexMap;
use tracing::debug;

/// Compiled model indexed for encoding and decoding.
///
/// Read-only after construction; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Schema {
    containers: Vec<Container>,
    by_name: IndexMap<String, usize>,
    by_id: IndexMap<u32, usize>,
    by_type: IndexMap<String, Vec<usize>>,
    by_trait: IndexMap<String, Vec<usize>>,
    config: EngineConfig,
}

impl Schema {
    /// Merge several compiled models with the default configuration.
    pub fn new(sets: &[ModelSet]) -> Result<Self> {
        Self::with_config(sets, EngineConfig::default())
    }

    /// Merge several compiled models.
    ///
    /// Names and IDs must be unique across all sets.
    pub fn with_config(sets: &[ModelSet], config: EngineConfig) -> Result<Self> {
        let containers = sets
            .iter()
            .flat_map(|set| set.containers.iter().cloned())
            .collect();
        Self::from_containers(containers, config)
    }

    pub fn from_containers(containers: Vec<Container>, config: EngineConfig) -> Result<Self> {
        let mut by_name = IndexMap::with_capacity(containers.len());
        let mut by_id: IndexMap<u32, usize> = IndexMap::with_capacity(containers.len());
        let mut by_type: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut by_trait: IndexMap<String, Vec<usize>> = IndexMap::new();

        for (index, container) in containers.iter().enumerate() {
            if by_name.insert(container.name.clone(), index).is_some() {
                return Err(EngineError::DuplicateContainerName(container.name.clone()));
            }
            if let Some(first) = by_id.insert(container.id, index) {
                return Err(EngineError::DuplicateContainerId {
                    id: container.id,
                    first: containers[first].name.clone(),
                    second: container.name.clone(),
                });
            }
            by_type
                .entry(container.type_name.clone())
                .or_default()
                .push(index);
            for trait_name in &container.traits {
                by_trait.entry(trait_name.clone()).or_default().push(index);
            }
        }

        debug!(
            containers = containers.len(),
            types = by_type.len(),
            structural_validation = config.structural_validation,
            "schema registry built"
        );

        Ok(Self {
            containers,
            by_name,
            by_id,
            by_type,
            by_trait,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, name: &str) -> Option<&Container> {
        self.by_name.get(name).map(|&i| &self.containers[i])
    }

    pub fn container_by_id(&self, id: u32) -> Option<&Container> {
        self.by_id.get(&id).map(|&i| &self.containers[i])
    }

    /// Containers sharing a type name.
    pub fn containers_of_type<'a>(&'a self, type_name: &str) -> impl Iterator<Item = &'a Container> + 'a {
        self.by_type
            .get(type_name)
            .into_iter()
            .flatten()
            .map(move |&i| &self.containers[i])
    }

    /// IDs a param referencing `reference` may hold.
    ///
    /// A constructor name yields its one ID. Otherwise every container whose
    /// type or traits match contributes. Empty when nothing matches.
    pub fn possible_ids(&self, reference: &str) -> Vec<u32> {
        if let Some(&i) = self.by_name.get(reference) {
            return vec![self.containers[i].id];
        }
        let mut ids: Vec<u32> = Vec::new();
        let by_type = self.by_type.get(reference).into_iter().flatten();
        let by_trait = self.by_trait.get(reference).into_iter().flatten();
        for &i in by_type.chain(by_trait) {
            let id = self.containers[i].id;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Encode a tagged object, dispatching on its `_name`.
    ///
    /// A bare string is taken as the name of a container with no values.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let mut ser = Serializer::new();
        self.encode_value(value, &mut ser, "root", 0)?;
        Ok(ser.into_bytes())
    }

    /// Encode `value` as the container called `name`.
    ///
    /// `Value::Null` encodes a container whose params are all absent.
    pub fn encode_named(&self, name: &str, value: &Value) -> Result<Vec<u8>> {
        let container = self
            .container(name)
            .ok_or_else(|| EngineError::UnknownContainerName(name.to_string()))?;
        let mut ser = Serializer::new();
        self.encode_container(container, value, &mut ser, 0)?;
        Ok(ser.into_bytes())
    }

    /// Decode one container from the start of `bytes`.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
        let mut de = Deserializer::new(bytes);
        self.decode_from(&mut de)
    }

    /// Decode one container at the cursor, leaving it after the container.
    pub fn decode_from(&self, de: &mut Deserializer<'_>) -> Result<Value> {
        self.decode_container(de, 0)
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(EngineError::NestingTooDeep(self.config.max_depth));
        }
        Ok(())
    }

    pub(crate) fn lookup_id(&self, id: u32) -> Result<&Container> {
        self.container_by_id(id)
            .ok_or(EngineError::UnknownContainerId(id))
    }
}
