use crate::decoder_buffer::DecoderBuffer;
use crate::geometry_attribute::PointAttribute;
use crate::sequential_generic_attribute_decoder::SequentialGenericAttributeDecoder;
use crate::sequential_integer_attribute_decoder::SequentialIntegerAttributeDecoder;
use crate::sequential_normal_attribute_decoder::SequentialNormalAttributeDecoder;
use crate::sequential_quantization_attribute_decoder::SequentialQuantizationAttributeDecoder;
use crate::status::{DracoError, Status};

/// Decoder kind byte stored per attribute after the attribute descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequentialAttributeDecoderKind {
    Generic = 0,
    Integer = 1,
    Quantization = 2,
    Normals = 3,
}

impl TryFrom<u8> for SequentialAttributeDecoderKind {
    type Error = DracoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SequentialAttributeDecoderKind::Generic),
            1 => Ok(SequentialAttributeDecoderKind::Integer),
            2 => Ok(SequentialAttributeDecoderKind::Quantization),
            3 => Ok(SequentialAttributeDecoderKind::Normals),
            _ => Err(DracoError::DracoError(format!(
                "Unknown sequential attribute decoder kind: {}",
                value
            ))),
        }
    }
}

/// Decodes the values of one attribute in three phases.
///
/// All attributes of a decoder first decode their portable (integer) form, then
/// read the parameters of their portable transform, and finally convert the
/// portable values into the attribute's declared format.
pub trait SequentialAttributeDecoder {
    fn kind(&self) -> SequentialAttributeDecoderKind;

    /// Rejects attributes this decoder cannot produce.
    fn init(&mut self, _attribute: &PointAttribute) -> Status {
        Ok(())
    }

    /// `attribute` has already been reset to one value per point.
    fn decode_portable_attribute(
        &mut self,
        attribute: &mut PointAttribute,
        buffer: &mut DecoderBuffer,
    ) -> Status;

    fn decode_data_needed_by_portable_transform(
        &mut self,
        _attribute: &PointAttribute,
        _buffer: &mut DecoderBuffer,
    ) -> Status {
        Ok(())
    }

    fn transform_attribute_to_original_format(&mut self, _attribute: &mut PointAttribute) -> Status {
        Ok(())
    }
}

pub fn create_sequential_decoder(
    kind: SequentialAttributeDecoderKind,
) -> Box<dyn SequentialAttributeDecoder> {
    match kind {
        SequentialAttributeDecoderKind::Generic => Box::new(SequentialGenericAttributeDecoder::new()),
        SequentialAttributeDecoderKind::Integer => Box::new(SequentialIntegerAttributeDecoder::new()),
        SequentialAttributeDecoderKind::Quantization => {
            Box::new(SequentialQuantizationAttributeDecoder::new())
        }
        SequentialAttributeDecoderKind::Normals => Box::new(SequentialNormalAttributeDecoder::new()),
    }
}
