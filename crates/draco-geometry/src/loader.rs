//! Draco mesh to geometry source / element conversion.

use std::collections::BTreeMap;

use draco_core::{decode_mesh, Mesh, PointAttribute, PointIndex};
use tracing::{debug, warn};

use crate::element::GeometryElement;
use crate::error::{GeometryError, Result};
use crate::semantic::GeometrySourceSemantic;
use crate::source::GeometrySource;

/// glTF semantic name to Draco attribute unique id.
///
/// Sources are produced in the map's (lexical) key order.
pub type AttributeMap = BTreeMap<String, u32>;

/// Geometry ready for a renderer: one source per mapped attribute and a single
/// triangle element indexing into all of them.
#[derive(Debug, Clone, Default)]
pub struct DecodedGeometry {
    pub sources: Vec<GeometrySource>,
    pub elements: Vec<GeometryElement>,
}

impl DecodedGeometry {
    pub fn source(&self, semantic: GeometrySourceSemantic) -> Option<&GeometrySource> {
        self.sources.iter().find(|source| source.semantic() == semantic)
    }

    pub fn vertex_count(&self) -> usize {
        self.sources.first().map_or(0, GeometrySource::vertex_count)
    }
}

/// Decodes a Draco mesh and republishes the attributes named in `attributes`.
///
/// Attributes missing from the mesh and names without a known semantic are
/// skipped; only a failure to decode the mesh itself is an error.
pub fn decode_draco_data(data: &[u8], attributes: &AttributeMap) -> Result<DecodedGeometry> {
    let mesh = decode_mesh(data).map_err(|err| {
        warn!("Failed to decode Draco mesh: {}", err);
        err
    })?;
    convert_mesh(&mesh, attributes)
}

/// Same as [`decode_draco_data`] for a mesh that is already decoded.
pub fn convert_mesh(mesh: &Mesh, attributes: &AttributeMap) -> Result<DecodedGeometry> {
    let mut geometry = DecodedGeometry::default();
    for (name, &unique_id) in attributes {
        let Some(attribute) = mesh.attribute_by_unique_id(unique_id) else {
            warn!(
                "Draco mesh does not contain attribute with unique ID {} (semantic {})",
                unique_id, name
            );
            continue;
        };
        let Some(semantic) = GeometrySourceSemantic::from_gltf_semantic(name) else {
            debug!(semantic = %name, unique_id, "skipping attribute without geometry semantic");
            continue;
        };
        geometry.sources.push(process_attribute(mesh, attribute, semantic)?);
    }

    geometry.elements.push(triangle_element(mesh));
    debug!(
        num_sources = geometry.sources.len(),
        num_faces = mesh.num_faces(),
        num_points = mesh.num_points(),
        "converted Draco mesh"
    );
    Ok(geometry)
}

/// Converts every point's value of `attribute` into floats.
///
/// Values that cannot be converted are left as zeros. Fails only when the
/// float storage cannot be allocated.
pub fn process_attribute(
    mesh: &Mesh,
    attribute: &PointAttribute,
    semantic: GeometrySourceSemantic,
) -> Result<GeometrySource> {
    let components = attribute.num_components() as usize;
    let vertex_count = mesh.num_points();
    let len = vertex_count
        .checked_mul(components)
        .ok_or(GeometryError::Allocation { vertex_count, components })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| GeometryError::Allocation { vertex_count, components })?;
    data.resize(len, 0f32);

    if components > 0 {
        for (i, vertex) in data.chunks_exact_mut(components).enumerate() {
            let value_index = attribute.mapped_index(PointIndex(i as u32));
            if attribute.convert_value(value_index, vertex).is_err() {
                warn!("Failed to convert Draco attribute value at index {}", i);
                vertex.fill(0.0);
            }
        }
    }

    Ok(GeometrySource::new(data, semantic, vertex_count, components))
}

fn triangle_element(mesh: &Mesh) -> GeometryElement {
    let indices = mesh
        .faces()
        .iter()
        .flat_map(|face| face.iter().map(|point| point.0))
        .collect();
    GeometryElement::triangles(indices)
}
