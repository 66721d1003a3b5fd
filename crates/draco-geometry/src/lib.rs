//! Draco mesh to renderer geometry adapter.
//!
//! Decodes a Draco compressed mesh with [`draco_core`] and republishes it as
//! the structures a draw pipeline consumes:
//!
//! - one [`GeometrySource`] per mapped attribute, every component converted to `f32`,
//! - one triangle [`GeometryElement`] with `u32` indices.
//!
//! Attributes are selected by glTF semantic name through an [`AttributeMap`],
//! usually taken from a primitive's `KHR_draco_mesh_compression` extension.
//!
//! ```ignore
//! use draco_geometry::{decode_draco_data, AttributeMap, GeometrySourceSemantic};
//!
//! let map = AttributeMap::from([("POSITION".to_string(), 0), ("NORMAL".to_string(), 1)]);
//! let geometry = decode_draco_data(&bytes, &map)?;
//! let positions = geometry.source(GeometrySourceSemantic::Vertex).unwrap().floats();
//! let indices = geometry.elements[0].indices();
//! ```

pub mod element;
pub mod error;
pub mod gltf;
pub mod loader;
pub mod semantic;
pub mod source;

pub use element::{GeometryElement, GeometryPrimitiveType};
pub use error::{GeometryError, Result};
pub use gltf::DracoMeshCompression;
pub use loader::{convert_mesh, decode_draco_data, process_attribute, AttributeMap, DecodedGeometry};
pub use semantic::GeometrySourceSemantic;
pub use source::GeometrySource;
