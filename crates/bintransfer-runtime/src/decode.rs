//! Bytes to object graph.

use crate::error::{EngineError, Result};
use crate::schema::Schema;
use crate::value::{Object, Value};
use bintransfer_codec::Deserializer;
use bintransfer_model::{GenericType, ParamShape, VectorItem};
use tracing::trace;

impl Schema {
    pub(crate) fn decode_container(&self, de: &mut Deserializer<'_>, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        let id = de.read_uint()?;
        let container = self.lookup_id(id)?;
        trace!(name = %container.name, id, offset = de.offset(), "decoding container");

        let mut object = Object::with_capacity(container.params.len() + 3);
        object.insert("_name".to_string(), Value::String(container.name.clone()));
        object.insert("_type".to_string(), Value::String(container.type_name.clone()));
        object.insert(
            "_traits".to_string(),
            Value::Array(container.traits.iter().cloned().map(Value::String).collect()),
        );

        for param in &container.params {
            if param.is_optional() && !de.read_bool()? {
                continue;
            }

            let shape = param.shape().ok_or_else(|| EngineError::MalformedParam {
                container: container.name.clone(),
                param: param.name.clone(),
            })?;

            let value = match shape {
                ParamShape::Generic(generic) => read_generic(de, generic)?,
                ParamShape::StrictSize(GenericType::Bytes, size) => {
                    Value::Bytes(de.read_raw(size as usize)?.to_vec())
                }
                ParamShape::StrictSize(_, _) => Value::String(de.read_string()?),
                ParamShape::Vector(item) => {
                    let len = de.read_uint()? as usize;
                    let mut items = Vec::with_capacity(len.min(de.remaining()));
                    for _ in 0..len {
                        let element = match item {
                            VectorItem::Generic(generic) => read_generic(de, generic)?,
                            VectorItem::Container(reference) => {
                                self.validate_header(de, reference, &param.name)?;
                                self.decode_container(de, depth + 1)?
                            }
                        };
                        items.push(element);
                    }
                    Value::Array(items)
                }
                ParamShape::Reference(reference) => {
                    self.validate_header(de, reference, &param.name)?;
                    self.decode_container(de, depth + 1)?
                }
            };
            object.insert(param.name.clone(), value);
        }

        Ok(Value::Object(object))
    }

    /// Check the upcoming header against what `reference` may hold.
    fn validate_header(&self, de: &Deserializer<'_>, reference: &str, param: &str) -> Result<()> {
        if !self.config().structural_validation {
            return Ok(());
        }
        let expected = self.possible_ids(reference);
        if expected.is_empty() {
            return Ok(());
        }
        let found = de.peek_uint()?;
        if !expected.contains(&found) {
            return Err(EngineError::InvalidHeaderForParam {
                param: param.to_string(),
                expected,
                found,
            });
        }
        Ok(())
    }
}

fn read_generic(de: &mut Deserializer<'_>, generic: GenericType) -> Result<Value> {
    let value = match generic {
        GenericType::Int => Value::Int(i64::from(de.read_int()?)),
        GenericType::Uint => Value::Int(i64::from(de.read_uint()?)),
        GenericType::Short => Value::Int(i64::from(de.read_short()?)),
        GenericType::Ushort => Value::Int(i64::from(de.read_ushort()?)),
        GenericType::Float => Value::Float(f64::from(de.read_float()?)),
        GenericType::Double => Value::Float(de.read_double()?),
        GenericType::Long => Value::String(de.read_long()?),
        GenericType::Ulong => Value::String(de.read_ulong()?),
        GenericType::Bool => Value::Bool(de.read_bool()?),
        GenericType::String => Value::String(de.read_string()?),
        GenericType::Bytes => Value::Bytes(de.read_bytes()?.to_vec()),
    };
    Ok(value)
}
