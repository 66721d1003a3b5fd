use crate::status::DracoError;

/// Component data type of a point attribute, with the bitstream ids of Draco.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Invalid = 0,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Bool,
}

impl DataType {
    pub fn byte_length(&self) -> usize {
        match self {
            DataType::Invalid => 0,
            DataType::Int8 | DataType::Uint8 | DataType::Bool => 1,
            DataType::Int16 | DataType::Uint16 => 2,
            DataType::Int32 | DataType::Uint32 | DataType::Float32 => 4,
            DataType::Int64 | DataType::Uint64 | DataType::Float64 => 8,
        }
    }

    pub fn is_integral(&self) -> bool {
        !matches!(self, DataType::Float32 | DataType::Float64 | DataType::Invalid)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Invalid => "invalid",
            DataType::Int8 => "int8",
            DataType::Uint8 => "uint8",
            DataType::Int16 => "int16",
            DataType::Uint16 => "uint16",
            DataType::Int32 => "int32",
            DataType::Uint32 => "uint32",
            DataType::Int64 => "int64",
            DataType::Uint64 => "uint64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Bool => "bool",
        }
    }
}

impl TryFrom<u8> for DataType {
    type Error = DracoError;

    /// Only concrete types are accepted; `Invalid` (0) is rejected like any unknown id.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => DataType::Int8,
            2 => DataType::Uint8,
            3 => DataType::Int16,
            4 => DataType::Uint16,
            5 => DataType::Int32,
            6 => DataType::Uint32,
            7 => DataType::Int64,
            8 => DataType::Uint64,
            9 => DataType::Float32,
            10 => DataType::Float64,
            11 => DataType::Bool,
            _ => {
                return Err(DracoError::DracoError(format!(
                    "Invalid attribute data type: {}",
                    value
                )))
            }
        })
    }
}
