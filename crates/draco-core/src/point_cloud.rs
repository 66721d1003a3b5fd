use crate::geometry_attribute::{GeometryAttributeType, PointAttribute};
use crate::metadata::GeometryMetadata;

#[derive(Debug, Default, Clone)]
pub struct PointCloud {
    attributes: Vec<PointAttribute>,
    num_points: usize,
    metadata: Option<GeometryMetadata>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_num_points(&mut self, num_points: usize) {
        self.num_points = num_points;
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Adds an attribute and returns its attribute id. The unique id is kept as decoded.
    pub fn add_attribute(&mut self, attribute: PointAttribute) -> usize {
        self.attributes.push(attribute);
        self.attributes.len() - 1
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attributes(&self) -> &[PointAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, att_id: usize) -> Option<&PointAttribute> {
        self.attributes.get(att_id)
    }

    pub fn attribute_mut(&mut self, att_id: usize) -> Option<&mut PointAttribute> {
        self.attributes.get_mut(att_id)
    }

    /// First attribute whose unique id matches, as in the glTF extension lookup.
    pub fn attribute_by_unique_id(&self, unique_id: u32) -> Option<&PointAttribute> {
        self.attributes.iter().find(|att| att.unique_id() == unique_id)
    }

    pub fn named_attribute_id(&self, att_type: GeometryAttributeType) -> Option<usize> {
        self.attributes
            .iter()
            .position(|att| att.attribute_type() == att_type)
    }

    pub fn named_attribute(&self, att_type: GeometryAttributeType) -> Option<&PointAttribute> {
        self.named_attribute_id(att_type)
            .and_then(|id| self.attributes.get(id))
    }

    pub fn metadata(&self) -> Option<&GeometryMetadata> {
        self.metadata.as_ref()
    }

    pub fn set_metadata(&mut self, metadata: GeometryMetadata) {
        self.metadata = Some(metadata);
    }
}
