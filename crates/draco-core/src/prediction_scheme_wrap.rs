use crate::decoder_buffer::DecoderBuffer;
use crate::prediction_scheme::{PredictionSchemeDecodingTransform, PredictionSchemeTransformType};
use crate::status::{DracoError, Status};

/// Wrap transform: predictions are clamped to the value range and sums that leave
/// the range wrap around to the other side.
#[derive(Debug, Default, Clone)]
pub struct PredictionSchemeWrapDecodingTransform {
    num_components: usize,
    min_value: i32,
    max_value: i32,
    max_dif: i32,
}

impl PredictionSchemeWrapDecodingTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }
}

impl PredictionSchemeDecodingTransform for PredictionSchemeWrapDecodingTransform {
    fn transform_type(&self) -> PredictionSchemeTransformType {
        PredictionSchemeTransformType::Wrap
    }

    fn init(&mut self, num_components: usize) {
        self.num_components = num_components;
    }

    fn decode_transform_data(&mut self, buffer: &mut DecoderBuffer) -> Status {
        let min_value = buffer.decode_i32()?;
        let max_value = buffer.decode_i32()?;
        if min_value > max_value {
            return Err(DracoError::DracoError(format!(
                "Wrap bounds out of order: min {} > max {}",
                min_value, max_value
            )));
        }
        let dif = max_value as i64 - min_value as i64;
        if dif >= i32::MAX as i64 {
            return Err(DracoError::DracoError(format!(
                "Wrap range {} is too large",
                dif
            )));
        }
        self.min_value = min_value;
        self.max_value = max_value;
        self.max_dif = 1 + dif as i32;
        Ok(())
    }

    fn compute_original_value(&self, predicted: &[i32], corrections: &[i32], out: &mut [i32]) {
        for i in 0..self.num_components {
            let pred = predicted[i].clamp(self.min_value, self.max_value);
            let mut val = pred.wrapping_add(corrections[i]);
            if val > self.max_value {
                val = val.wrapping_sub(self.max_dif);
            } else if val < self.min_value {
                val = val.wrapping_add(self.max_dif);
            }
            out[i] = val;
        }
    }
}
