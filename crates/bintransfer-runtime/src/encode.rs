//! Object graph to bytes.

use crate::error::{EngineError, Result};
use crate::schema::Schema;
use crate::value::Value;
use bintransfer_codec::{CodecError, LongInput, Serializer};
use bintransfer_model::{Container, GenericType, ParamShape, VectorItem};
use std::borrow::Cow;
use tracing::trace;

impl Schema {
    /// Encode a nested value: a tagged object or a bare constructor name.
    pub(crate) fn encode_value(
        &self,
        value: &Value,
        ser: &mut Serializer,
        param: &str,
        depth: usize,
    ) -> Result<()> {
        let name = match value {
            Value::String(name) => name.as_str(),
            Value::Object(_) => value.name().ok_or_else(|| EngineError::MissingRequiredProperty {
                container: format!("value of \"{}\"", param),
                property: "_name".to_string(),
            })?,
            other => {
                return Err(EngineError::TypeMismatch {
                    param: param.to_string(),
                    expected: "object",
                    found: other.kind(),
                })
            }
        };
        let container = self
            .container(name)
            .ok_or_else(|| EngineError::UnknownContainerName(name.to_string()))?;
        self.encode_container(container, value, ser, depth)
    }

    /// Header, then every param in declaration order.
    pub(crate) fn encode_container(
        &self,
        container: &Container,
        value: &Value,
        ser: &mut Serializer,
        depth: usize,
    ) -> Result<()> {
        self.check_depth(depth)?;
        trace!(name = %container.name, id = container.id, "encoding container");
        ser.write_uint(i64::from(container.id))?;

        for param in &container.params {
            let field = value.get(&param.name).filter(|v| !v.is_null());

            if param.is_optional() {
                ser.write_bool(field.is_some());
                if field.is_none() {
                    continue;
                }
            }

            let shape = param.shape().ok_or_else(|| EngineError::MalformedParam {
                container: container.name.clone(),
                param: param.name.clone(),
            })?;

            let missing = || EngineError::MissingRequiredProperty {
                container: container.name.clone(),
                property: param.name.clone(),
            };

            match shape {
                ParamShape::Generic(generic) => write_generic(ser, generic, field, &param.name)?,
                ParamShape::StrictSize(generic, size) => {
                    write_strict(ser, generic, size, field.ok_or_else(missing)?, &param.name)?
                }
                ParamShape::Vector(item) => {
                    let items = match field.ok_or_else(missing)? {
                        Value::Array(items) => items,
                        other => {
                            return Err(EngineError::TypeMismatch {
                                param: param.name.clone(),
                                expected: "array",
                                found: other.kind(),
                            })
                        }
                    };
                    let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
                    ser.write_uint(len)?;
                    for element in items {
                        match item {
                            VectorItem::Generic(generic) => {
                                write_generic(ser, generic, Some(element), &param.name)?
                            }
                            VectorItem::Container(_) => {
                                self.encode_value(element, ser, &param.name, depth + 1)?
                            }
                        }
                    }
                }
                ParamShape::Reference(_) => {
                    self.encode_value(field.ok_or_else(missing)?, ser, &param.name, depth + 1)?
                }
            }
        }

        Ok(())
    }
}

fn mismatch(param: &str, expected: &'static str, found: &Value) -> EngineError {
    EngineError::TypeMismatch {
        param: param.to_string(),
        expected,
        found: found.kind(),
    }
}

/// Integral value of a number; integral floats are accepted.
fn integer(value: &Value, param: &str, kind: &'static str) -> Result<i64> {
    match value {
        Value::Int(v) => Ok(*v),
        Value::UInt(v) => i64::try_from(*v).map_err(|_| {
            CodecError::OutOfRange {
                kind,
                value: v.to_string(),
            }
            .into()
        }),
        Value::Float(f) if f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 => Ok(*f as i64),
        other => Err(mismatch(param, "integer", other)),
    }
}

fn float(value: &Value, param: &str) -> Result<f64> {
    match value {
        Value::Int(v) => Ok(*v as f64),
        Value::UInt(v) => Ok(*v as f64),
        Value::Float(f) => Ok(*f),
        other => Err(mismatch(param, "number", other)),
    }
}

fn long_input(value: &Value, param: &str) -> Result<LongInput> {
    match value {
        Value::Int(v) => Ok(LongInput::Int(*v)),
        Value::UInt(v) => Ok(LongInput::UInt(*v)),
        Value::String(s) => Ok(LongInput::Str(s.clone())),
        Value::Float(_) => integer(value, param, "long").map(LongInput::Int),
        other => Err(mismatch(param, "long", other)),
    }
}

/// Write a primitive; a missing value writes the type's zero value.
fn write_generic(
    ser: &mut Serializer,
    generic: GenericType,
    value: Option<&Value>,
    param: &str,
) -> Result<()> {
    let Some(value) = value else {
        return write_default(ser, generic);
    };

    match generic {
        GenericType::Int => ser.write_int(integer(value, param, "int")?)?,
        GenericType::Uint => ser.write_uint(integer(value, param, "uint")?)?,
        GenericType::Short => ser.write_short(integer(value, param, "short")?)?,
        GenericType::Ushort => ser.write_ushort(integer(value, param, "ushort")?)?,
        GenericType::Float => ser.write_float(float(value, param)? as f32),
        GenericType::Double => ser.write_double(float(value, param)?),
        GenericType::Long => ser.write_long(long_input(value, param)?)?,
        GenericType::Ulong => ser.write_ulong(long_input(value, param)?)?,
        GenericType::Bool => match value {
            Value::Bool(b) => ser.write_bool(*b),
            other => return Err(mismatch(param, "bool", other)),
        },
        GenericType::String => match value {
            Value::String(s) => ser.write_string(s)?,
            other => return Err(mismatch(param, "string", other)),
        },
        GenericType::Bytes => ser.write_bytes(&coerce_bytes(value, param)?)?,
    }
    Ok(())
}

fn write_default(ser: &mut Serializer, generic: GenericType) -> Result<()> {
    match generic {
        GenericType::Int => ser.write_int(0)?,
        GenericType::Uint => ser.write_uint(0)?,
        GenericType::Short => ser.write_short(0)?,
        GenericType::Ushort => ser.write_ushort(0)?,
        GenericType::Float => ser.write_float(0.0),
        GenericType::Double => ser.write_double(0.0),
        GenericType::Long => ser.write_long(0i64)?,
        GenericType::Ulong => ser.write_ulong(0u64)?,
        GenericType::Bool => ser.write_bool(false),
        GenericType::String => ser.write_string("")?,
        GenericType::Bytes => ser.write_bytes(&[])?,
    }
    Ok(())
}

/// `string[N]` keeps its framing and is measured in characters;
/// `bytes[N]` is written raw and measured in bytes.
fn write_strict(
    ser: &mut Serializer,
    generic: GenericType,
    size: u32,
    value: &Value,
    param: &str,
) -> Result<()> {
    let expected = size as usize;
    match generic {
        GenericType::String => {
            let s = value.as_str().ok_or_else(|| mismatch(param, "string", value))?;
            let actual = s.chars().count();
            if actual != expected {
                return Err(EngineError::InvalidParamSize {
                    param: param.to_string(),
                    expected,
                    actual,
                });
            }
            ser.write_string(s)?;
        }
        GenericType::Bytes => {
            let bytes = coerce_bytes(value, param)?;
            if bytes.len() != expected {
                return Err(EngineError::InvalidParamSize {
                    param: param.to_string(),
                    expected,
                    actual: bytes.len(),
                });
            }
            ser.write_raw(&bytes);
        }
        other => {
            return Err(EngineError::TypeMismatch {
                param: param.to_string(),
                expected: "string or bytes",
                found: other.as_str(),
            })
        }
    }
    Ok(())
}

/// Normalize byte-like input: raw bytes, an array of octets, a `0x` hex
/// string, or any other string as UTF-8.
pub fn coerce_bytes<'v>(value: &'v Value, param: &str) -> Result<Cow<'v, [u8]>> {
    let invalid = |found: &'static str| EngineError::InvalidBufferType {
        param: param.to_string(),
        found,
    };

    match value {
        Value::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_slice())),
        Value::String(s) => match s.strip_prefix("0x") {
            Some(digits) => hex::decode(digits)
                .map(Cow::Owned)
                .map_err(|_| invalid("malformed hex string")),
            None => Ok(Cow::Borrowed(s.as_bytes())),
        },
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_i64()
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| invalid("array with non-octet elements"))
            })
            .collect::<Result<Vec<u8>>>()
            .map(Cow::Owned),
        other => Err(invalid(other.kind())),
    }
}
