use crate::decoder_buffer::DecoderBuffer;
use crate::geometry_attribute::PointAttribute;
use crate::sequential_attribute_decoder::{SequentialAttributeDecoder, SequentialAttributeDecoderKind};
use crate::status::{DracoError, Status};

/// Copies `byte_stride` raw bytes per point into the attribute.
#[derive(Debug, Default)]
pub struct SequentialGenericAttributeDecoder;

impl SequentialGenericAttributeDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl SequentialAttributeDecoder for SequentialGenericAttributeDecoder {
    fn kind(&self) -> SequentialAttributeDecoderKind {
        SequentialAttributeDecoderKind::Generic
    }

    fn decode_portable_attribute(
        &mut self,
        attribute: &mut PointAttribute,
        buffer: &mut DecoderBuffer,
    ) -> Status {
        let total = attribute
            .size()
            .checked_mul(attribute.byte_stride())
            .ok_or_else(|| DracoError::BufferError("Attribute data size overflows".into()))?;
        let data = buffer.decode_slice(total)?;
        attribute.buffer_mut().write(0, data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draco_types::DataType;
    use crate::geometry_attribute::{GeometryAttribute, GeometryAttributeType};
    use crate::geometry_indices::AttributeValueIndex;

    fn attribute(num_values: usize) -> PointAttribute {
        let mut att = PointAttribute::new(GeometryAttribute {
            attribute_type: GeometryAttributeType::Generic,
            data_type: DataType::Uint16,
            num_components: 2,
            normalized: false,
            unique_id: 0,
        });
        att.reset(num_values).unwrap();
        att
    }

    #[test]
    fn test_copies_raw_values() {
        let data = [1u8, 0, 2, 0, 3, 0, 4, 0, 0xff];
        let mut buffer = DecoderBuffer::new(&data);
        let mut att = attribute(2);
        SequentialGenericAttributeDecoder::new()
            .decode_portable_attribute(&mut att, &mut buffer)
            .unwrap();
        assert_eq!(buffer.remaining_size(), 1);
        assert_eq!(att.value_bytes(AttributeValueIndex(1)), Some(&[3u8, 0, 4, 0][..]));
    }

    #[test]
    fn test_truncated_input() {
        let data = [1u8, 0, 2];
        let mut buffer = DecoderBuffer::new(&data);
        let mut att = attribute(1);
        assert!(SequentialGenericAttributeDecoder::new()
            .decode_portable_attribute(&mut att, &mut buffer)
            .is_err());
    }
}
