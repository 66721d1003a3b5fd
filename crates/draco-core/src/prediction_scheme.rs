use crate::decoder_buffer::DecoderBuffer;
use crate::status::{DracoError, Status};

/// Prediction method ids as stored (`i8`) in the bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSchemeMethod {
    None = -2,
    Undefined = -1,
    Difference = 0,
    MeshPredictionParallelogram = 1,
    MeshPredictionMultiParallelogram = 2,
    MeshPredictionTexCoordsDeprecated = 3,
    MeshPredictionConstrainedMultiParallelogram = 4,
    MeshPredictionTexCoordsPortable = 5,
    MeshPredictionGeometricNormal = 6,
}

impl TryFrom<i8> for PredictionSchemeMethod {
    type Error = DracoError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Ok(match value {
            -2 => PredictionSchemeMethod::None,
            -1 => PredictionSchemeMethod::Undefined,
            0 => PredictionSchemeMethod::Difference,
            1 => PredictionSchemeMethod::MeshPredictionParallelogram,
            2 => PredictionSchemeMethod::MeshPredictionMultiParallelogram,
            3 => PredictionSchemeMethod::MeshPredictionTexCoordsDeprecated,
            4 => PredictionSchemeMethod::MeshPredictionConstrainedMultiParallelogram,
            5 => PredictionSchemeMethod::MeshPredictionTexCoordsPortable,
            6 => PredictionSchemeMethod::MeshPredictionGeometricNormal,
            _ => {
                return Err(DracoError::DracoError(format!(
                    "Invalid prediction scheme method: {}",
                    value
                )))
            }
        })
    }
}

/// Prediction transform ids as stored (`i8`) in the bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSchemeTransformType {
    None = -1,
    Delta = 0,
    Wrap = 1,
    NormalOctahedron = 2,
    NormalOctahedronCanonicalized = 3,
}

impl TryFrom<i8> for PredictionSchemeTransformType {
    type Error = DracoError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Ok(match value {
            -1 => PredictionSchemeTransformType::None,
            0 => PredictionSchemeTransformType::Delta,
            1 => PredictionSchemeTransformType::Wrap,
            2 => PredictionSchemeTransformType::NormalOctahedron,
            3 => PredictionSchemeTransformType::NormalOctahedronCanonicalized,
            _ => {
                return Err(DracoError::DracoError(format!(
                    "Invalid prediction transform type: {}",
                    value
                )))
            }
        })
    }
}

/// Turns a prediction plus a correction back into the original value.
pub trait PredictionSchemeDecodingTransform {
    fn transform_type(&self) -> PredictionSchemeTransformType;

    fn init(&mut self, num_components: usize);

    /// Reads the transform parameters stored after the corrections.
    fn decode_transform_data(&mut self, buffer: &mut DecoderBuffer) -> Status;

    fn compute_original_value(&self, predicted: &[i32], corrections: &[i32], out: &mut [i32]);

    /// True when corrections are stored without zig-zag coding.
    fn are_corrections_positive(&self) -> bool {
        false
    }
}

/// A prediction scheme that reconstructs integer attribute values in place.
pub trait PredictionSchemeDecoder {
    fn prediction_method(&self) -> PredictionSchemeMethod;

    fn transform_type(&self) -> PredictionSchemeTransformType;

    fn are_corrections_positive(&self) -> bool;

    fn decode_prediction_data(&mut self, buffer: &mut DecoderBuffer) -> Status;

    /// `values` holds corrections on input and original values on output.
    fn compute_original_values(&mut self, values: &mut [i32], num_components: usize) -> Status;
}
