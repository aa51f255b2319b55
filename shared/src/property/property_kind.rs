use crate::{
    constants::*,
    property::{error::PropertyError, track::Track},
    world::reflection::FieldKind,
};

/// The closed set of property variants, chosen once at construction from the
/// field's reflected kind
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    Name,
    Text,
    Enum {
        name: String,
        variants: Vec<String>,
        width: usize,
    },
    Vec2,
    Vec3,
    Vec4,
    Vec4f,
    Quat,
    Rotator,
    Transform,
    Track,
    /// Render-target reference, streamed through the texture share
    Texture,
    /// Aggregates and unsupported object references, present only as a
    /// grouping pin without a value
    Void,
}

impl PropertyKind {
    /// Dispatch from a reflected field kind. Object references are resolved
    /// by the factory, which needs the live target, and unsupported kinds
    /// produce no proxy at all.
    pub fn from_field_kind(kind: &FieldKind) -> Option<PropertyKind> {
        let kind = match kind {
            FieldKind::Bool => PropertyKind::Bool,
            FieldKind::Int8 => PropertyKind::Int8,
            FieldKind::Int16 => PropertyKind::Int16,
            FieldKind::Int32 => PropertyKind::Int32,
            FieldKind::Int64 => PropertyKind::Int64,
            FieldKind::UInt8 => PropertyKind::UInt8,
            FieldKind::UInt16 => PropertyKind::UInt16,
            FieldKind::UInt32 => PropertyKind::UInt32,
            FieldKind::UInt64 => PropertyKind::UInt64,
            FieldKind::Float => PropertyKind::Float,
            FieldKind::Double => PropertyKind::Double,
            FieldKind::String => PropertyKind::String,
            FieldKind::Name => PropertyKind::Name,
            FieldKind::Text => PropertyKind::Text,
            FieldKind::Enum {
                name,
                variants,
                width,
            } => {
                if !matches!(width, 1 | 2 | 4 | 8) {
                    return None;
                }
                PropertyKind::Enum {
                    name: name.clone(),
                    variants: variants.clone(),
                    width: *width,
                }
            }
            FieldKind::Vec2 => PropertyKind::Vec2,
            FieldKind::Vec3 => PropertyKind::Vec3,
            FieldKind::Vec4 => PropertyKind::Vec4,
            FieldKind::Vec4f => PropertyKind::Vec4f,
            FieldKind::Quat => PropertyKind::Quat,
            FieldKind::Rotator => PropertyKind::Rotator,
            FieldKind::Transform => PropertyKind::Transform,
            FieldKind::Track => PropertyKind::Track,
            FieldKind::Struct { .. } => PropertyKind::Void,
            FieldKind::Object | FieldKind::Unsupported(_) => return None,
        };
        Some(kind)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyKind::Bool => TYPE_BOOL,
            PropertyKind::Int8 => TYPE_INT8,
            PropertyKind::Int16 => TYPE_INT16,
            PropertyKind::Int32 => TYPE_INT32,
            PropertyKind::Int64 => TYPE_INT64,
            PropertyKind::UInt8 => TYPE_UINT8,
            PropertyKind::UInt16 => TYPE_UINT16,
            PropertyKind::UInt32 => TYPE_UINT32,
            PropertyKind::UInt64 => TYPE_UINT64,
            PropertyKind::Float => TYPE_FLOAT,
            PropertyKind::Double => TYPE_DOUBLE,
            PropertyKind::String
            | PropertyKind::Name
            | PropertyKind::Text
            | PropertyKind::Enum { .. } => TYPE_STRING,
            PropertyKind::Vec2 => TYPE_VEC2D,
            PropertyKind::Vec3 | PropertyKind::Rotator => TYPE_VEC3D,
            PropertyKind::Vec4 | PropertyKind::Quat => TYPE_VEC4D,
            PropertyKind::Vec4f => TYPE_VEC4F,
            PropertyKind::Transform => TYPE_TRANSFORM,
            PropertyKind::Track => TYPE_TRACK,
            PropertyKind::Texture => TYPE_TEXTURE,
            PropertyKind::Void => TYPE_VOID,
        }
    }

    /// Fixed storage size in bytes, `None` for variable-length payloads
    pub fn storage_size(&self) -> Option<usize> {
        match self {
            PropertyKind::Bool | PropertyKind::Int8 | PropertyKind::UInt8 => Some(1),
            PropertyKind::Int16 | PropertyKind::UInt16 => Some(2),
            PropertyKind::Int32 | PropertyKind::UInt32 | PropertyKind::Float => Some(4),
            PropertyKind::Int64 | PropertyKind::UInt64 | PropertyKind::Double => Some(8),
            PropertyKind::Enum { width, .. } => Some(*width),
            PropertyKind::Vec2 => Some(16),
            PropertyKind::Vec3 | PropertyKind::Rotator => Some(24),
            PropertyKind::Vec4 | PropertyKind::Quat => Some(32),
            PropertyKind::Vec4f => Some(16),
            PropertyKind::Transform => Some(72),
            PropertyKind::Track => Some(Track::ENCODED_LEN),
            PropertyKind::String
            | PropertyKind::Name
            | PropertyKind::Text
            | PropertyKind::Texture
            | PropertyKind::Void => None,
        }
    }

    /// Fixed wire payload size; string-like and enum pins are variable
    pub fn wire_size(&self) -> Option<usize> {
        match self {
            PropertyKind::Enum { .. } => None,
            other => other.storage_size(),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, PropertyKind::Void)
    }

    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            PropertyKind::String | PropertyKind::Name | PropertyKind::Text | PropertyKind::Enum { .. }
        )
    }

    /// Converts live storage bytes into the pin payload
    pub fn to_wire(&self, storage: &[u8]) -> Vec<u8> {
        match self {
            PropertyKind::String | PropertyKind::Name | PropertyKind::Text => {
                null_terminated(storage)
            }
            PropertyKind::Enum { variants, .. } => {
                let name = read_unsigned(storage)
                    .and_then(|index| variants.get(index as usize))
                    .map(String::as_str)
                    .unwrap_or("");
                null_terminated(name.as_bytes())
            }
            PropertyKind::Rotator => {
                // storage (pitch, yaw, roll) -> wire (roll, pitch, yaw)
                permute_doubles(storage, [2, 0, 1])
            }
            PropertyKind::Void => Vec::new(),
            _ => storage.to_vec(),
        }
    }

    /// Converts a pin payload into live storage bytes
    pub fn to_storage(&self, property: &str, wire: &[u8]) -> Result<Vec<u8>, PropertyError> {
        match self {
            PropertyKind::String | PropertyKind::Name | PropertyKind::Text => {
                Ok(strip_null(property, wire)?.into_bytes())
            }
            PropertyKind::Enum {
                name,
                variants,
                width,
            } => {
                let variant = strip_null(property, wire)?;
                let index = variants
                    .iter()
                    .position(|candidate| *candidate == variant)
                    .ok_or_else(|| PropertyError::UnknownEnumVariant {
                        enum_name: name.clone(),
                        variant,
                    })?;
                Ok((index as u64).to_le_bytes()[..*width].to_vec())
            }
            PropertyKind::Rotator => {
                // wire (roll, pitch, yaw) -> storage (pitch, yaw, roll)
                Ok(permute_doubles(wire, [1, 2, 0]))
            }
            PropertyKind::Void => Err(PropertyError::NotWritable {
                property: property.to_string(),
                type_name: self.type_name().to_string(),
            }),
            _ => Ok(wire.to_vec()),
        }
    }

    /// Parses `UIMin`/`UIMax` style text into a pin payload of this kind
    pub fn parse_limit(&self, text: &str) -> Option<Vec<u8>> {
        let value: f64 = text.trim().parse().ok()?;
        let bytes = match self {
            PropertyKind::Int8 => (value as i8).to_le_bytes().to_vec(),
            PropertyKind::Int16 => (value as i16).to_le_bytes().to_vec(),
            PropertyKind::Int32 => (value as i32).to_le_bytes().to_vec(),
            PropertyKind::Int64 => (value as i64).to_le_bytes().to_vec(),
            PropertyKind::UInt8 => (value as u8).to_le_bytes().to_vec(),
            PropertyKind::UInt16 => (value as u16).to_le_bytes().to_vec(),
            PropertyKind::UInt32 => (value as u32).to_le_bytes().to_vec(),
            PropertyKind::UInt64 => (value as u64).to_le_bytes().to_vec(),
            PropertyKind::Float => (value as f32).to_le_bytes().to_vec(),
            PropertyKind::Double => value.to_le_bytes().to_vec(),
            PropertyKind::Vec2 => repeat_double(value, 2),
            PropertyKind::Vec3 => repeat_double(value, 3),
            PropertyKind::Vec4 => repeat_double(value, 4),
            _ => return None,
        };
        Some(bytes)
    }

    /// Limits every pin of this kind carries regardless of metadata
    pub fn fixed_limits(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        match self {
            PropertyKind::Rotator => Some((
                repeat_double(ROTATOR_MIN, 3),
                repeat_double(ROTATOR_MAX, 3),
            )),
            _ => None,
        }
    }
}

fn null_terminated(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 1);
    out.extend_from_slice(bytes);
    out.push(0);
    out
}

fn strip_null(property: &str, wire: &[u8]) -> Result<String, PropertyError> {
    let end = wire.iter().position(|byte| *byte == 0).unwrap_or(wire.len());
    String::from_utf8(wire[..end].to_vec()).map_err(|_| PropertyError::InvalidUtf8 {
        property: property.to_string(),
    })
}

fn read_unsigned(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() || bytes.len() > 8 {
        return None;
    }
    let mut raw = [0u8; 8];
    raw[..bytes.len()].copy_from_slice(bytes);
    Some(u64::from_le_bytes(raw))
}

fn permute_doubles(bytes: &[u8], order: [usize; 3]) -> Vec<u8> {
    if bytes.len() != 24 {
        return bytes.to_vec();
    }
    let mut out = Vec::with_capacity(24);
    for index in order {
        out.extend_from_slice(&bytes[index * 8..index * 8 + 8]);
    }
    out
}

fn repeat_double(value: f64, count: usize) -> Vec<u8> {
    (0..count).flat_map(|_| value.to_le_bytes()).collect()
}
