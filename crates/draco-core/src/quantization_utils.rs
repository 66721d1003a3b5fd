use crate::status::DracoError;

/// Maps quantized integers back onto a float range.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dequantizer {
    delta: f32,
}

impl Dequantizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `range` into `max_quantized_value` equal steps.
    pub fn init(&mut self, range: f32, max_quantized_value: i32) -> Result<(), DracoError> {
        if max_quantized_value <= 0 {
            return Err(DracoError::InvalidParameter(format!(
                "Max quantized value must be positive, got {}",
                max_quantized_value
            )));
        }
        self.delta = range / max_quantized_value as f32;
        Ok(())
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn dequantize_float(&self, val: i32) -> f32 {
        val as f32 * self.delta
    }
}
