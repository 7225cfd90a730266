//! Integration test harness for bintransfer.
//!
//! Drives the whole pipeline from schema source: Lex → Parse → Compile →
//! Encode → Decode.

use bintransfer::{Container, EngineConfig, ModelSet, Schema, SchemaParser, Value};
use serde_json::Value as Json;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process.
///
/// Filtering follows `RUST_LOG`; nothing is printed when it is unset.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A compiled schema ready to encode and decode.
pub struct SchemaHarness {
    model: ModelSet,
    schema: Schema,
}

impl SchemaHarness {
    /// Compile `source` with the default engine configuration.
    ///
    /// # Panics
    ///
    /// Panics if lexing, parsing, compiling or registry construction fails.
    pub fn from_source(source: &str) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    /// Compile `source` for a specific engine configuration.
    pub fn with_config(source: &str, config: EngineConfig) -> Self {
        init_tracing();
        let model = match SchemaParser::new().parse(source) {
            Ok(model) => model,
            Err(err) => panic!("{}", bintransfer::format_error(source, &err)),
        };
        let schema = Schema::with_config(std::slice::from_ref(&model), config)
            .expect("registry construction failed");
        Self { model, schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn containers(&self) -> &[Container] {
        &self.model.containers
    }

    /// Compiled container by fully-qualified name.
    ///
    /// # Panics
    ///
    /// Panics if no such container exists.
    pub fn container(&self, name: &str) -> &Container {
        self.model
            .get(name)
            .unwrap_or_else(|| panic!("no container named {}", name))
    }

    pub fn id(&self, name: &str) -> u32 {
        self.container(name).id
    }

    /// Encode a JSON object graph.
    pub fn encode(&self, input: Json) -> Vec<u8> {
        self.schema
            .encode(&Value::from(input))
            .expect("encode failed")
    }

    /// Decode and convert back to JSON for comparison.
    pub fn decode(&self, bytes: &[u8]) -> Json {
        let value = self.schema.decode(bytes).expect("decode failed");
        serde_json::to_value(value).expect("decoded value is always representable")
    }

    /// Encode then decode.
    pub fn round_trip(&self, input: Json) -> Json {
        let bytes = self.encode(input);
        self.decode(&bytes)
    }
}
