use crate::decoder_buffer::DecoderBuffer;
use crate::draco_types::DataType;
use crate::geometry_attribute::PointAttribute;
use crate::quantization_utils::Dequantizer;
use crate::sequential_attribute_decoder::{SequentialAttributeDecoder, SequentialAttributeDecoderKind};
use crate::sequential_integer_attribute_decoder::{
    create_wrap_prediction_scheme, SequentialIntegerAttributeDecoder,
};
use crate::status::{DracoError, Status};

/// Parameters of the quantization transform stored after the portable values.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AttributeQuantizationParams {
    pub min_values: Vec<f32>,
    pub range: f32,
    pub quantization_bits: u8,
}

impl AttributeQuantizationParams {
    pub fn decode(num_components: usize, buffer: &mut DecoderBuffer) -> Result<Self, DracoError> {
        let mut min_values = Vec::with_capacity(num_components);
        for _ in 0..num_components {
            min_values.push(buffer.decode_f32()?);
        }
        let range = buffer.decode_f32()?;
        let quantization_bits = buffer.decode_u8()?;
        if !(1..=30).contains(&quantization_bits) {
            return Err(DracoError::DracoError(format!(
                "Invalid quantization bits: {}",
                quantization_bits
            )));
        }
        Ok(Self {
            min_values,
            range,
            quantization_bits,
        })
    }

    pub fn max_quantized_value(&self) -> i32 {
        ((1u32 << self.quantization_bits) - 1) as i32
    }
}

/// Float attribute stored as quantized integers.
#[derive(Debug, Default)]
pub struct SequentialQuantizationAttributeDecoder {
    integer: SequentialIntegerAttributeDecoder,
    params: Option<AttributeQuantizationParams>,
}

impl SequentialQuantizationAttributeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(&self) -> Option<&AttributeQuantizationParams> {
        self.params.as_ref()
    }
}

impl SequentialAttributeDecoder for SequentialQuantizationAttributeDecoder {
    fn kind(&self) -> SequentialAttributeDecoderKind {
        SequentialAttributeDecoderKind::Quantization
    }

    fn init(&mut self, attribute: &PointAttribute) -> Status {
        if attribute.data_type() != DataType::Float32 {
            return Err(DracoError::DracoError(format!(
                "Quantized attributes must be float32, got {}",
                attribute.data_type().name()
            )));
        }
        Ok(())
    }

    fn decode_portable_attribute(
        &mut self,
        attribute: &mut PointAttribute,
        buffer: &mut DecoderBuffer,
    ) -> Status {
        self.integer.decode_values(
            attribute.size(),
            attribute.num_components() as usize,
            buffer,
            create_wrap_prediction_scheme,
        )
    }

    fn decode_data_needed_by_portable_transform(
        &mut self,
        attribute: &PointAttribute,
        buffer: &mut DecoderBuffer,
    ) -> Status {
        self.params = Some(AttributeQuantizationParams::decode(
            attribute.num_components() as usize,
            buffer,
        )?);
        Ok(())
    }

    fn transform_attribute_to_original_format(&mut self, attribute: &mut PointAttribute) -> Status {
        let params = self
            .params
            .as_ref()
            .ok_or_else(|| DracoError::DracoError("Quantization parameters missing".into()))?;
        let mut dequantizer = Dequantizer::new();
        dequantizer.init(params.range, params.max_quantized_value())?;

        let num_components = params.min_values.len();
        let values = self.integer.values();
        let mut bytes = Vec::with_capacity(values.len() * 4);
        for entry in values.chunks_exact(num_components) {
            for (&q, &min) in entry.iter().zip(&params.min_values) {
                let value = dequantizer.dequantize_float(q) + min;
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
        attribute.buffer_mut().write(0, &bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_attribute::{GeometryAttribute, GeometryAttributeType};
    use crate::geometry_indices::AttributeValueIndex;

    fn position(num_values: usize) -> PointAttribute {
        let mut att = PointAttribute::new(GeometryAttribute {
            attribute_type: GeometryAttributeType::Position,
            data_type: DataType::Float32,
            num_components: 2,
            normalized: false,
            unique_id: 0,
        });
        att.reset(num_values).unwrap();
        att
    }

    #[test]
    fn test_rejects_integer_attribute() {
        let att = PointAttribute::new(GeometryAttribute {
            attribute_type: GeometryAttributeType::Position,
            data_type: DataType::Int32,
            num_components: 3,
            normalized: false,
            unique_id: 0,
        });
        assert!(SequentialQuantizationAttributeDecoder::new().init(&att).is_err());
    }

    #[test]
    fn test_dequantizes_values() {
        // No prediction, raw 2-byte zig-zag values: 510 -> 255 (2 entries x 2 comps).
        let mut data = vec![0xfe, 0, 2];
        data.extend_from_slice(&[0, 0, 0, 0, 0xfe, 0x01, 0, 0]);
        // Parameters: min (-1, 2), range 2, 8 bits.
        let mut params = Vec::new();
        params.extend_from_slice(&(-1.0f32).to_le_bytes());
        params.extend_from_slice(&2.0f32.to_le_bytes());
        params.extend_from_slice(&2.0f32.to_le_bytes());
        params.push(8);

        let mut att = position(2);
        let mut decoder = SequentialQuantizationAttributeDecoder::new();
        decoder.init(&att).unwrap();
        let mut buffer = DecoderBuffer::new(&data);
        decoder.decode_portable_attribute(&mut att, &mut buffer).unwrap();
        assert_eq!(decoder.integer.values(), &[0, 0, 255, 0]);
        let mut buffer = DecoderBuffer::new(&params);
        decoder
            .decode_data_needed_by_portable_transform(&att, &mut buffer)
            .unwrap();
        decoder.transform_attribute_to_original_format(&mut att).unwrap();

        let mut out = [0f32; 2];
        att.convert_value(AttributeValueIndex(0), &mut out).unwrap();
        assert_eq!(out, [-1.0, 2.0]);
        att.convert_value(AttributeValueIndex(1), &mut out).unwrap();
        assert!((out[0] - 1.0).abs() < 1e-6);
        assert_eq!(out[1], 2.0);
    }

    #[test]
    fn test_invalid_bits() {
        let mut data = Vec::new();
        data.extend_from_slice(&0.0f32.to_le_bytes());
        data.extend_from_slice(&1.0f32.to_le_bytes());
        data.push(31);
        let mut buffer = DecoderBuffer::new(&data);
        assert!(AttributeQuantizationParams::decode(1, &mut buffer).is_err());
    }
}
