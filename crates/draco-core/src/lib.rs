//! Draco Core Library
//!
//! Decoder for the sequential profile of the Draco 3D geometry bitstream:
//! triangle meshes and point clouds with generic, integer, quantized and
//! octahedral-normal attributes, plus optional metadata.
//!
//! ```ignore
//! let mesh = draco_core::decode_mesh(&bytes)?;
//! let position = mesh.named_attribute(draco_core::GeometryAttributeType::Position);
//! ```

#![allow(clippy::needless_range_loop)]

// =============================================================================
// Geometry model
// =============================================================================

pub mod data_buffer;
pub mod draco_types;
pub mod geometry_attribute;
pub mod geometry_indices;
pub mod mesh;
pub mod metadata;
pub mod point_cloud;
pub mod status;
pub mod version;

// =============================================================================
// Bitstream decoding
// =============================================================================

pub mod ans;
pub mod attributes_decoder;
pub mod decoder_buffer;
pub mod mesh_decoder;
pub mod normal_compression_utils;
pub mod point_cloud_decoder;
pub mod prediction_scheme;
pub mod prediction_scheme_delta;
pub mod prediction_scheme_normal_octahedron;
pub mod prediction_scheme_wrap;
pub mod quantization_utils;
pub mod rans_symbol_coding;
pub mod rans_symbol_decoder;
pub mod sequential_attribute_decoder;
pub mod sequential_generic_attribute_decoder;
pub mod sequential_integer_attribute_decoder;
pub mod sequential_normal_attribute_decoder;
pub mod sequential_quantization_attribute_decoder;
pub mod symbol_decoding;

// =============================================================================
// Re-exports
// =============================================================================

pub use data_buffer::DataBuffer;
pub use decoder_buffer::DecoderBuffer;
pub use draco_types::DataType;
pub use geometry_attribute::{GeometryAttribute, GeometryAttributeType, PointAttribute};
pub use geometry_indices::{AttributeValueIndex, FaceIndex, PointIndex};
pub use mesh::{Face, Mesh};
pub use mesh_decoder::decode_mesh;
pub use metadata::{GeometryMetadata, Metadata};
pub use normal_compression_utils::OctahedronToolBox;
pub use point_cloud::PointCloud;
pub use point_cloud_decoder::{decode_point_cloud, peek_header, DracoHeader, EncodedGeometryType};
pub use prediction_scheme::{PredictionSchemeMethod, PredictionSchemeTransformType};
pub use sequential_attribute_decoder::SequentialAttributeDecoderKind;
pub use status::{DracoError, Status};
