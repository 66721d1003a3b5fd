use tracing::{debug, trace};

use crate::data_buffer::try_alloc_vec;
use crate::decoder_buffer::DecoderBuffer;
use crate::draco_types::DataType;
use crate::geometry_attribute::PointAttribute;
use crate::prediction_scheme::{
    PredictionSchemeDecoder, PredictionSchemeMethod, PredictionSchemeTransformType,
};
use crate::prediction_scheme_delta::PredictionSchemeDeltaDecoder;
use crate::prediction_scheme_wrap::PredictionSchemeWrapDecodingTransform;
use crate::sequential_attribute_decoder::{SequentialAttributeDecoder, SequentialAttributeDecoderKind};
use crate::status::{unsupported, DracoError, Status};
use crate::symbol_decoding::{convert_symbols_to_signed_ints, decode_symbols};

/// Builds the prediction scheme for a method/transform pair read from the stream.
pub(crate) type PredictionSchemeFactory = fn(
    PredictionSchemeMethod,
    PredictionSchemeTransformType,
) -> Result<Box<dyn PredictionSchemeDecoder>, DracoError>;

/// Decodes entropy coded integer values, optionally reconstructed by a prediction scheme.
///
/// The quantization and normal decoders reuse this for their portable values.
#[derive(Debug, Default)]
pub struct SequentialIntegerAttributeDecoder {
    values: Vec<i32>,
}

impl SequentialIntegerAttributeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Portable values decoded so far, `num_components` per entry.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub(crate) fn decode_values(
        &mut self,
        num_entries: usize,
        num_components: usize,
        buffer: &mut DecoderBuffer,
        create_scheme: PredictionSchemeFactory,
    ) -> Status {
        let method = PredictionSchemeMethod::try_from(buffer.decode_i8()?)?;
        let mut scheme = None;
        if method != PredictionSchemeMethod::None {
            let transform_type = PredictionSchemeTransformType::try_from(buffer.decode_i8()?)?;
            trace!(?method, ?transform_type, "integer attribute prediction");
            scheme = Some(create_scheme(method, transform_type)?);
        }
        self.decode_integer_values(num_entries, num_components, buffer, scheme)
    }

    fn decode_integer_values(
        &mut self,
        num_entries: usize,
        num_components: usize,
        buffer: &mut DecoderBuffer,
        mut scheme: Option<Box<dyn PredictionSchemeDecoder>>,
    ) -> Status {
        if num_components == 0 {
            return Err(DracoError::InvalidParameter(
                "Integer attribute has no components".into(),
            ));
        }
        let num_values = num_entries
            .checked_mul(num_components)
            .ok_or_else(|| DracoError::BufferError("Too many attribute values".into()))?;

        let mut symbols = try_alloc_vec::<u32>(num_values)?;
        let compressed = buffer.decode_u8()?;
        if compressed > 0 {
            decode_symbols(num_values, num_components, buffer, &mut symbols)?;
        } else {
            let num_bytes = buffer.decode_u8()? as usize;
            if num_bytes > 4 {
                return Err(DracoError::DracoError(format!(
                    "Raw integer values cannot use {} bytes",
                    num_bytes
                )));
            }
            if num_bytes > 0 {
                let total = num_bytes
                    .checked_mul(num_values)
                    .ok_or_else(|| DracoError::BufferError("Too many attribute values".into()))?;
                let data = buffer.decode_slice(total)?;
                for (symbol, chunk) in symbols.iter_mut().zip(data.chunks_exact(num_bytes)) {
                    let mut bytes = [0u8; 4];
                    bytes[..num_bytes].copy_from_slice(chunk);
                    *symbol = u32::from_le_bytes(bytes);
                }
            }
        }

        self.values = try_alloc_vec(num_values)?;
        let corrections_positive = scheme
            .as_ref()
            .map_or(false, |scheme| scheme.are_corrections_positive());
        if corrections_positive {
            for (value, symbol) in self.values.iter_mut().zip(&symbols) {
                *value = *symbol as i32;
            }
        } else {
            convert_symbols_to_signed_ints(&symbols, &mut self.values);
        }

        if let Some(scheme) = scheme.as_mut() {
            scheme.decode_prediction_data(buffer)?;
            if num_values > 0 {
                scheme.compute_original_values(&mut self.values, num_components)?;
            }
        }
        Ok(())
    }

    fn store_values(&self, attribute: &mut PointAttribute) -> Status {
        let data_type = attribute.data_type();
        let mut bytes = Vec::with_capacity(self.values.len() * data_type.byte_length());
        match data_type {
            DataType::Uint8 => bytes.extend(self.values.iter().map(|&v| v as u8)),
            DataType::Int8 => bytes.extend(self.values.iter().map(|&v| v as i8 as u8)),
            DataType::Uint16 => {
                for &v in &self.values {
                    bytes.extend_from_slice(&(v as u16).to_le_bytes());
                }
            }
            DataType::Int16 => {
                for &v in &self.values {
                    bytes.extend_from_slice(&(v as i16).to_le_bytes());
                }
            }
            DataType::Uint32 => {
                for &v in &self.values {
                    bytes.extend_from_slice(&(v as u32).to_le_bytes());
                }
            }
            DataType::Int32 => {
                for &v in &self.values {
                    bytes.extend_from_slice(&v.to_le_bytes());
                }
            }
            other => {
                return Err(DracoError::DracoError(format!(
                    "Integer values cannot be stored as {}",
                    other.name()
                )))
            }
        }
        attribute.buffer_mut().write(0, &bytes);
        Ok(())
    }
}

impl SequentialAttributeDecoder for SequentialIntegerAttributeDecoder {
    fn kind(&self) -> SequentialAttributeDecoderKind {
        SequentialAttributeDecoderKind::Integer
    }

    fn decode_portable_attribute(
        &mut self,
        attribute: &mut PointAttribute,
        buffer: &mut DecoderBuffer,
    ) -> Status {
        self.decode_values(
            attribute.size(),
            attribute.num_components() as usize,
            buffer,
            create_wrap_prediction_scheme,
        )
    }

    fn transform_attribute_to_original_format(&mut self, attribute: &mut PointAttribute) -> Status {
        self.store_values(attribute)
    }
}

/// Prediction for plain integer and quantized attributes: delta with the wrap transform.
///
/// Mesh-based methods need connectivity the sequential profile does not carry, so
/// they are decoded as delta.
pub(crate) fn create_wrap_prediction_scheme(
    method: PredictionSchemeMethod,
    transform_type: PredictionSchemeTransformType,
) -> Result<Box<dyn PredictionSchemeDecoder>, DracoError> {
    if transform_type != PredictionSchemeTransformType::Wrap {
        return Err(unsupported(format!(
            "Prediction transform {:?} is not supported for integer attributes",
            transform_type
        )));
    }
    if method != PredictionSchemeMethod::Difference {
        debug!(?method, "decoding prediction method as delta");
    }
    Ok(Box::new(PredictionSchemeDeltaDecoder::new(
        method,
        PredictionSchemeWrapDecodingTransform::new(),
    )))
}
