use crate::decoder_buffer::DecoderBuffer;
use crate::prediction_scheme::{
    PredictionSchemeDecoder, PredictionSchemeDecodingTransform, PredictionSchemeMethod,
    PredictionSchemeTransformType,
};
use crate::status::{DracoError, Status};

/// Delta prediction: every value is predicted by the previous one, the first by zero.
///
/// This is also what the sequential profile falls back to for mesh-based methods,
/// since no connectivity is available to drive them.
pub struct PredictionSchemeDeltaDecoder<T> {
    method: PredictionSchemeMethod,
    transform: T,
}

impl<T: PredictionSchemeDecodingTransform> PredictionSchemeDeltaDecoder<T> {
    pub fn new(method: PredictionSchemeMethod, transform: T) -> Self {
        Self { method, transform }
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }
}

impl<T: PredictionSchemeDecodingTransform> PredictionSchemeDecoder for PredictionSchemeDeltaDecoder<T> {
    fn prediction_method(&self) -> PredictionSchemeMethod {
        self.method
    }

    fn transform_type(&self) -> PredictionSchemeTransformType {
        self.transform.transform_type()
    }

    fn are_corrections_positive(&self) -> bool {
        self.transform.are_corrections_positive()
    }

    fn decode_prediction_data(&mut self, buffer: &mut DecoderBuffer) -> Status {
        self.transform.decode_transform_data(buffer)
    }

    fn compute_original_values(&mut self, values: &mut [i32], num_components: usize) -> Status {
        if num_components == 0 || values.len() % num_components != 0 {
            return Err(DracoError::InvalidParameter(format!(
                "{} values cannot be split into {}-component entries",
                values.len(),
                num_components
            )));
        }
        if values.is_empty() {
            return Ok(());
        }
        self.transform.init(num_components);

        let zero = vec![0i32; num_components];
        let mut corr = values[..num_components].to_vec();
        self.transform
            .compute_original_value(&zero, &corr, &mut values[..num_components]);

        for i in (num_components..values.len()).step_by(num_components) {
            corr.copy_from_slice(&values[i..i + num_components]);
            let (prev, cur) = values.split_at_mut(i);
            self.transform.compute_original_value(
                &prev[i - num_components..],
                &corr,
                &mut cur[..num_components],
            );
        }
        Ok(())
    }
}
