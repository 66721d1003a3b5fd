use byteorder::{ByteOrder, LittleEndian};
use num_traits::{Float, NumCast};

use crate::data_buffer::DataBuffer;
use crate::draco_types::DataType;
use crate::geometry_indices::{AttributeValueIndex, PointIndex, INVALID_ATTRIBUTE_VALUE_INDEX};
use crate::status::{DracoError, Status};

/// Semantic of a point attribute as stored in the bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryAttributeType {
    Invalid = -1,
    Position = 0,
    Normal,
    Color,
    TexCoord,
    Generic,
    Tangent,
    Material,
    Joints,
    Weights,
}

impl GeometryAttributeType {
    pub fn name(&self) -> &'static str {
        match self {
            GeometryAttributeType::Invalid => "INVALID",
            GeometryAttributeType::Position => "POSITION",
            GeometryAttributeType::Normal => "NORMAL",
            GeometryAttributeType::Color => "COLOR",
            GeometryAttributeType::TexCoord => "TEX_COORD",
            GeometryAttributeType::Generic => "GENERIC",
            GeometryAttributeType::Tangent => "TANGENT",
            GeometryAttributeType::Material => "MATERIAL",
            GeometryAttributeType::Joints => "JOINTS",
            GeometryAttributeType::Weights => "WEIGHTS",
        }
    }
}

impl TryFrom<u8> for GeometryAttributeType {
    type Error = DracoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => GeometryAttributeType::Position,
            1 => GeometryAttributeType::Normal,
            2 => GeometryAttributeType::Color,
            3 => GeometryAttributeType::TexCoord,
            4 => GeometryAttributeType::Generic,
            5 => GeometryAttributeType::Tangent,
            6 => GeometryAttributeType::Material,
            7 => GeometryAttributeType::Joints,
            8 => GeometryAttributeType::Weights,
            _ => {
                return Err(DracoError::DracoError(format!(
                    "Invalid attribute type: {}",
                    value
                )))
            }
        })
    }
}

/// Descriptor of an attribute as declared in the attributes decoder header.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryAttribute {
    pub attribute_type: GeometryAttributeType,
    pub data_type: DataType,
    pub num_components: u8,
    pub normalized: bool,
    pub unique_id: u32,
}

impl GeometryAttribute {
    pub fn byte_stride(&self) -> usize {
        self.num_components as usize * self.data_type.byte_length()
    }
}

/// Decoded attribute values plus the mapping from points to values.
#[derive(Debug, Clone)]
pub struct PointAttribute {
    descriptor: GeometryAttribute,
    buffer: DataBuffer,
    indices_map: Vec<AttributeValueIndex>,
    identity_mapping: bool,
    num_unique_entries: usize,
}

impl PointAttribute {
    pub fn new(descriptor: GeometryAttribute) -> Self {
        Self {
            descriptor,
            buffer: DataBuffer::new(),
            indices_map: Vec::new(),
            identity_mapping: true,
            num_unique_entries: 0,
        }
    }

    /// Resizes the value storage to hold `num_attribute_values` entries.
    pub fn reset(&mut self, num_attribute_values: usize) -> Status {
        let size = num_attribute_values
            .checked_mul(self.byte_stride())
            .ok_or_else(|| DracoError::BufferError("Too many attribute values".into()))?;
        self.buffer.resize(size)?;
        self.num_unique_entries = num_attribute_values;
        Ok(())
    }

    pub fn descriptor(&self) -> &GeometryAttribute {
        &self.descriptor
    }

    pub fn attribute_type(&self) -> GeometryAttributeType {
        self.descriptor.attribute_type
    }

    pub fn data_type(&self) -> DataType {
        self.descriptor.data_type
    }

    pub fn num_components(&self) -> u8 {
        self.descriptor.num_components
    }

    pub fn normalized(&self) -> bool {
        self.descriptor.normalized
    }

    pub fn unique_id(&self) -> u32 {
        self.descriptor.unique_id
    }

    pub fn set_unique_id(&mut self, id: u32) {
        self.descriptor.unique_id = id;
    }

    pub fn byte_stride(&self) -> usize {
        self.descriptor.byte_stride()
    }

    /// Number of attribute values (not points).
    pub fn size(&self) -> usize {
        self.num_unique_entries
    }

    pub fn buffer(&self) -> &DataBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut DataBuffer {
        &mut self.buffer
    }

    pub fn is_identity_mapping(&self) -> bool {
        self.identity_mapping
    }

    pub fn set_identity_mapping(&mut self) {
        self.identity_mapping = true;
        self.indices_map.clear();
    }

    pub fn set_explicit_mapping(&mut self, num_points: usize) {
        self.identity_mapping = false;
        self.indices_map.clear();
        self.indices_map.resize(num_points, INVALID_ATTRIBUTE_VALUE_INDEX);
    }

    /// Sets the value used by `point_index`. Ignored while the mapping is identity.
    pub fn set_point_map_entry(&mut self, point_index: PointIndex, entry_index: AttributeValueIndex) {
        if let Some(slot) = self.indices_map.get_mut(point_index.0 as usize) {
            *slot = entry_index;
        }
    }

    pub fn mapped_index(&self, point_index: PointIndex) -> AttributeValueIndex {
        if self.identity_mapping {
            AttributeValueIndex(point_index.0)
        } else {
            self.indices_map
                .get(point_index.0 as usize)
                .copied()
                .unwrap_or(INVALID_ATTRIBUTE_VALUE_INDEX)
        }
    }

    /// Raw bytes of the value at `index`.
    pub fn value_bytes(&self, index: AttributeValueIndex) -> Option<&[u8]> {
        if index.0 as usize >= self.num_unique_entries {
            return None;
        }
        let stride = self.byte_stride();
        self.buffer.read(index.0 as usize * stride, stride)
    }

    /// Converts the value at `index` into `out.len()` floating point components.
    ///
    /// Normalized integer attributes are divided by the maximum of their type.
    /// Output components beyond `num_components` are zero-filled.
    pub fn convert_value<T: Float>(
        &self,
        index: AttributeValueIndex,
        out: &mut [T],
    ) -> Result<(), DracoError> {
        let bytes = self.value_bytes(index).ok_or_else(|| {
            DracoError::InvalidParameter(format!(
                "Attribute value index {} out of range ({} values)",
                index.0, self.num_unique_entries
            ))
        })?;
        let data_type = self.data_type();
        let width = data_type.byte_length();
        let num_components = self.num_components() as usize;
        let normalize = self.normalized() && data_type.is_integral();

        for (c, slot) in out.iter_mut().enumerate() {
            if c >= num_components {
                *slot = T::zero();
                continue;
            }
            let raw = &bytes[c * width..(c + 1) * width];
            let mut value = read_component(data_type, raw)?;
            if normalize {
                value /= integral_max(data_type);
            }
            *slot = <T as NumCast>::from(value).ok_or_else(|| {
                DracoError::InvalidParameter(format!(
                    "Component value {} cannot be represented",
                    value
                ))
            })?;
        }
        Ok(())
    }
}

fn read_component(data_type: DataType, raw: &[u8]) -> Result<f64, DracoError> {
    Ok(match data_type {
        DataType::Int8 => raw[0] as i8 as f64,
        DataType::Uint8 => raw[0] as f64,
        DataType::Bool => (raw[0] != 0) as u8 as f64,
        DataType::Int16 => LittleEndian::read_i16(raw) as f64,
        DataType::Uint16 => LittleEndian::read_u16(raw) as f64,
        DataType::Int32 => LittleEndian::read_i32(raw) as f64,
        DataType::Uint32 => LittleEndian::read_u32(raw) as f64,
        DataType::Int64 => LittleEndian::read_i64(raw) as f64,
        DataType::Uint64 => LittleEndian::read_u64(raw) as f64,
        DataType::Float32 => LittleEndian::read_f32(raw) as f64,
        DataType::Float64 => LittleEndian::read_f64(raw),
        DataType::Invalid => {
            return Err(DracoError::InvalidParameter(
                "Cannot convert values of an invalid data type".into(),
            ))
        }
    })
}

fn integral_max(data_type: DataType) -> f64 {
    match data_type {
        DataType::Int8 => i8::MAX as f64,
        DataType::Uint8 => u8::MAX as f64,
        DataType::Int16 => i16::MAX as f64,
        DataType::Uint16 => u16::MAX as f64,
        DataType::Int32 => i32::MAX as f64,
        DataType::Uint32 => u32::MAX as f64,
        DataType::Int64 => i64::MAX as f64,
        DataType::Uint64 => u64::MAX as f64,
        _ => 1.0,
    }
}
