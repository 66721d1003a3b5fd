//! Serializable summaries printed by the CLI.

use draco_core::{DracoHeader, GeometryMetadata, PointCloud};
use draco_geometry::{
    DecodedGeometry, GeometryElement, GeometryPrimitiveType, GeometrySource, GeometrySourceSemantic,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub version: String,
    pub geometry_type: &'static str,
    pub method: &'static str,
    pub num_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_faces: Option<usize>,
    pub attributes: Vec<AttributeReport>,
    pub metadata_entries: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AttributeReport {
    pub unique_id: u32,
    pub attribute_type: &'static str,
    pub data_type: &'static str,
    pub num_components: u8,
    pub normalized: bool,
}

impl InspectReport {
    pub fn new(header: &DracoHeader, point_cloud: &PointCloud, num_faces: Option<usize>) -> Self {
        let attributes = point_cloud
            .attributes()
            .iter()
            .map(|att| AttributeReport {
                unique_id: att.unique_id(),
                attribute_type: att.attribute_type().name(),
                data_type: att.data_type().name(),
                num_components: att.num_components(),
                normalized: att.normalized(),
            })
            .collect();
        let (major, minor) = header.version();
        Self {
            version: format!("{}.{}", major, minor),
            geometry_type: header.encoder_type.name(),
            method: header.method_name(),
            num_points: point_cloud.num_points(),
            num_faces,
            attributes,
            metadata_entries: point_cloud.metadata().map(metadata_entries).unwrap_or_default(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = format!(
            "Draco {} {} ({} encoding)\npoints: {}\n",
            self.version, self.geometry_type, self.method, self.num_points
        );
        if let Some(num_faces) = self.num_faces {
            out.push_str(&format!("faces: {}\n", num_faces));
        }
        out.push_str(&format!("attributes: {}\n", self.attributes.len()));
        for att in &self.attributes {
            out.push_str(&format!(
                "  [{}] {} {} x{}{}\n",
                att.unique_id,
                att.attribute_type,
                att.data_type,
                att.num_components,
                if att.normalized { " normalized" } else { "" }
            ));
        }
        if !self.metadata_entries.is_empty() {
            out.push_str(&format!("metadata: {}\n", self.metadata_entries.join(", ")));
        }
        out
    }
}

/// Entry names of the geometry metadata, then `attribute <id>: <name>` for
/// every attribute metadata entry.
fn metadata_entries(metadata: &GeometryMetadata) -> Vec<String> {
    let mut entries: Vec<String> = metadata.metadata.entry_names().map(str::to_string).collect();
    for unique_id in metadata.attribute_ids() {
        if let Some(attribute) = metadata.attribute_metadata(unique_id) {
            entries.extend(
                attribute
                    .entry_names()
                    .map(|name| format!("attribute {}: {}", unique_id, name)),
            );
        }
    }
    entries
}

#[derive(Debug, Serialize)]
pub struct GeometryReport {
    pub vertex_count: usize,
    pub sources: Vec<SourceReport>,
    pub elements: Vec<ElementReport>,
}

#[derive(Debug, Serialize)]
pub struct SourceReport {
    pub semantic: GeometrySourceSemantic,
    pub vertex_count: usize,
    pub components_per_vertex: usize,
    pub bytes_per_component: usize,
    pub data_stride: usize,
    pub data: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct ElementReport {
    pub primitive_type: GeometryPrimitiveType,
    pub primitive_count: usize,
    pub bytes_per_index: usize,
    pub indices: Vec<u32>,
}

impl From<&GeometrySource> for SourceReport {
    fn from(source: &GeometrySource) -> Self {
        Self {
            semantic: source.semantic(),
            vertex_count: source.vertex_count(),
            components_per_vertex: source.components_per_vertex(),
            bytes_per_component: source.bytes_per_component(),
            data_stride: source.data_stride(),
            data: source.floats().to_vec(),
        }
    }
}

impl From<&GeometryElement> for ElementReport {
    fn from(element: &GeometryElement) -> Self {
        Self {
            primitive_type: element.primitive_type(),
            primitive_count: element.primitive_count(),
            bytes_per_index: element.bytes_per_index(),
            indices: element.indices().to_vec(),
        }
    }
}

impl From<&DecodedGeometry> for GeometryReport {
    fn from(geometry: &DecodedGeometry) -> Self {
        Self {
            vertex_count: geometry.vertex_count(),
            sources: geometry.sources.iter().map(SourceReport::from).collect(),
            elements: geometry.elements.iter().map(ElementReport::from).collect(),
        }
    }
}
