use crate::decoder_buffer::DecoderBuffer;
use crate::draco_types::DataType;
use crate::geometry_attribute::PointAttribute;
use crate::normal_compression_utils::OctahedronToolBox;
use crate::prediction_scheme::{
    PredictionSchemeDecoder, PredictionSchemeMethod, PredictionSchemeTransformType,
};
use crate::prediction_scheme_delta::PredictionSchemeDeltaDecoder;
use crate::prediction_scheme_normal_octahedron::{
    PredictionSchemeNormalOctahedronCanonicalizedDecodingTransform,
    PredictionSchemeNormalOctahedronDecodingTransform,
};
use crate::sequential_attribute_decoder::{SequentialAttributeDecoder, SequentialAttributeDecoderKind};
use crate::sequential_integer_attribute_decoder::SequentialIntegerAttributeDecoder;
use crate::status::{unsupported, DracoError, Status};

/// Unit normals stored as two octahedral coordinates per point.
#[derive(Debug, Default)]
pub struct SequentialNormalAttributeDecoder {
    integer: SequentialIntegerAttributeDecoder,
    quantization_bits: Option<u8>,
}

impl SequentialNormalAttributeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantization_bits(&self) -> Option<u8> {
        self.quantization_bits
    }
}

impl SequentialAttributeDecoder for SequentialNormalAttributeDecoder {
    fn kind(&self) -> SequentialAttributeDecoderKind {
        SequentialAttributeDecoderKind::Normals
    }

    fn init(&mut self, attribute: &PointAttribute) -> Status {
        if attribute.num_components() != 3 {
            return Err(DracoError::DracoError(format!(
                "Normal attributes need 3 components, got {}",
                attribute.num_components()
            )));
        }
        if attribute.data_type() != DataType::Float32 {
            return Err(DracoError::DracoError(format!(
                "Normal attributes must be float32, got {}",
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
        self.integer
            .decode_values(attribute.size(), 2, buffer, create_normal_prediction_scheme)
    }

    fn decode_data_needed_by_portable_transform(
        &mut self,
        _attribute: &PointAttribute,
        buffer: &mut DecoderBuffer,
    ) -> Status {
        let quantization_bits = buffer.decode_u8()?;
        if !(2..=30).contains(&quantization_bits) {
            return Err(DracoError::DracoError(format!(
                "Invalid normal quantization bits: {}",
                quantization_bits
            )));
        }
        self.quantization_bits = Some(quantization_bits);
        Ok(())
    }

    fn transform_attribute_to_original_format(&mut self, attribute: &mut PointAttribute) -> Status {
        let quantization_bits = self
            .quantization_bits
            .ok_or_else(|| DracoError::DracoError("Normal quantization bits missing".into()))?;
        let mut tool_box = OctahedronToolBox::new();
        tool_box.set_quantization_bits(quantization_bits as i32)?;

        let values = self.integer.values();
        let mut bytes = Vec::with_capacity(values.len() / 2 * 12);
        for coords in values.chunks_exact(2) {
            let normal = tool_box.quantized_octahedral_coords_to_unit_vector(coords[0], coords[1]);
            for component in normal {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        attribute.buffer_mut().write(0, &bytes);
        Ok(())
    }
}

fn create_normal_prediction_scheme(
    method: PredictionSchemeMethod,
    transform_type: PredictionSchemeTransformType,
) -> Result<Box<dyn PredictionSchemeDecoder>, DracoError> {
    match transform_type {
        PredictionSchemeTransformType::NormalOctahedron => Ok(Box::new(
            PredictionSchemeDeltaDecoder::new(method, PredictionSchemeNormalOctahedronDecodingTransform::new()),
        )),
        PredictionSchemeTransformType::NormalOctahedronCanonicalized => {
            Ok(Box::new(PredictionSchemeDeltaDecoder::new(
                method,
                PredictionSchemeNormalOctahedronCanonicalizedDecodingTransform::new(),
            )))
        }
        other => Err(unsupported(format!(
            "Prediction transform {:?} is not supported for normals",
            other
        ))),
    }
}
