use tracing::{debug, trace};

use crate::decoder_buffer::DecoderBuffer;
use crate::draco_types::DataType;
use crate::geometry_attribute::{GeometryAttribute, GeometryAttributeType, PointAttribute};
use crate::point_cloud::PointCloud;
use crate::sequential_attribute_decoder::{
    create_sequential_decoder, SequentialAttributeDecoder, SequentialAttributeDecoderKind,
};
use crate::status::{DracoError, Status};

/// Decodes a group of attributes that share one point sequence.
///
/// The sequential profile visits points in order `0..num_points`, so every
/// attribute gets an identity point-to-value mapping.
#[derive(Default)]
pub struct AttributesDecoder {
    point_attribute_ids: Vec<usize>,
    sequential_decoders: Vec<Box<dyn SequentialAttributeDecoder>>,
}

impl AttributesDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_attributes(&self) -> usize {
        self.point_attribute_ids.len()
    }

    /// Point cloud attribute id of the `i`-th attribute handled by this decoder.
    pub fn attribute_id(&self, i: usize) -> Option<usize> {
        self.point_attribute_ids.get(i).copied()
    }

    /// Reads the attribute descriptors and creates one value decoder per attribute.
    ///
    /// The attributes are added to `point_cloud` without values.
    pub fn decode_attributes_decoder_data(
        &mut self,
        point_cloud: &mut PointCloud,
        buffer: &mut DecoderBuffer,
    ) -> Status {
        let num_attributes = buffer.decode_varint_u32()? as usize;
        if num_attributes == 0 {
            return Err(DracoError::DracoError(
                "Attributes decoder declares no attributes".into(),
            ));
        }
        // Every descriptor takes at least 5 bytes.
        if num_attributes > 5 * buffer.remaining_size() {
            return Err(DracoError::BufferError(format!(
                "{} attributes cannot fit in {} bytes",
                num_attributes,
                buffer.remaining_size()
            )));
        }

        self.point_attribute_ids.clear();
        for _ in 0..num_attributes {
            let attribute_type = GeometryAttributeType::try_from(buffer.decode_u8()?)?;
            let data_type = DataType::try_from(buffer.decode_u8()?)?;
            let num_components = buffer.decode_u8()?;
            if num_components == 0 {
                return Err(DracoError::DracoError(
                    "Attribute declares zero components".into(),
                ));
            }
            let normalized = buffer.decode_u8()? > 0;
            let unique_id = buffer.decode_varint_u32()?;
            trace!(
                attribute_type = attribute_type.name(),
                data_type = data_type.name(),
                num_components,
                unique_id,
                "attribute descriptor"
            );
            let att_id = point_cloud.add_attribute(PointAttribute::new(GeometryAttribute {
                attribute_type,
                data_type,
                num_components,
                normalized,
                unique_id,
            }));
            self.point_attribute_ids.push(att_id);
        }

        self.sequential_decoders.clear();
        for &att_id in &self.point_attribute_ids {
            let kind = SequentialAttributeDecoderKind::try_from(buffer.decode_u8()?)?;
            let mut decoder = create_sequential_decoder(kind);
            decoder.init(attribute(point_cloud, att_id)?)?;
            debug!(att_id, ?kind, "created attribute decoder");
            self.sequential_decoders.push(decoder);
        }
        Ok(())
    }

    /// Decodes the values of every attribute of this decoder.
    pub fn decode_attributes(
        &mut self,
        point_cloud: &mut PointCloud,
        buffer: &mut DecoderBuffer,
    ) -> Status {
        let num_points = point_cloud.num_points();
        for (decoder, &att_id) in self.sequential_decoders.iter().zip(&self.point_attribute_ids) {
            let attribute = attribute_mut(point_cloud, att_id)?;
            // Raw values must all be present in the remaining input.
            if decoder.kind() == SequentialAttributeDecoderKind::Generic {
                let size = num_points.checked_mul(attribute.byte_stride());
                if size.map_or(true, |size| size > buffer.remaining_size()) {
                    return Err(DracoError::BufferError(format!(
                        "Attribute {} needs more data than remains for {} points",
                        attribute.unique_id(),
                        num_points
                    )));
                }
            }
            attribute.set_identity_mapping();
            attribute.reset(num_points)?;
        }

        for (decoder, &att_id) in self.sequential_decoders.iter_mut().zip(&self.point_attribute_ids) {
            decoder.decode_portable_attribute(attribute_mut(point_cloud, att_id)?, buffer)?;
        }
        for (decoder, &att_id) in self.sequential_decoders.iter_mut().zip(&self.point_attribute_ids) {
            decoder.decode_data_needed_by_portable_transform(attribute(point_cloud, att_id)?, buffer)?;
        }
        for (decoder, &att_id) in self.sequential_decoders.iter_mut().zip(&self.point_attribute_ids) {
            decoder.transform_attribute_to_original_format(attribute_mut(point_cloud, att_id)?)?;
        }
        Ok(())
    }
}

/// Decodes all attribute groups that follow the geometry data.
///
/// Descriptors of every group are read before any values.
pub fn decode_point_attributes(point_cloud: &mut PointCloud, buffer: &mut DecoderBuffer) -> Status {
    let num_decoders = buffer.decode_u8()?;
    debug!(num_decoders, "decoding point attributes");
    let mut decoders: Vec<AttributesDecoder> =
        (0..num_decoders).map(|_| AttributesDecoder::new()).collect();
    for decoder in decoders.iter_mut() {
        decoder.decode_attributes_decoder_data(point_cloud, buffer)?;
    }
    for decoder in decoders.iter_mut() {
        decoder.decode_attributes(point_cloud, buffer)?;
    }
    Ok(())
}

fn attribute(point_cloud: &PointCloud, att_id: usize) -> Result<&PointAttribute, DracoError> {
    point_cloud
        .attribute(att_id)
        .ok_or_else(|| DracoError::InvalidParameter(format!("No attribute with id {}", att_id)))
}

fn attribute_mut(
    point_cloud: &mut PointCloud,
    att_id: usize,
) -> Result<&mut PointAttribute, DracoError> {
    point_cloud
        .attribute_mut(att_id)
        .ok_or_else(|| DracoError::InvalidParameter(format!("No attribute with id {}", att_id)))
}
