use crate::semantic::GeometrySourceSemantic;

/// Per-vertex data buffer of one attribute.
///
/// Values are always 32-bit floats, tightly packed: `components_per_vertex`
/// floats per vertex, one vertex per decoded point.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySource {
    data: Vec<f32>,
    semantic: GeometrySourceSemantic,
    vertex_count: usize,
    components_per_vertex: usize,
}

impl GeometrySource {
    pub const BYTES_PER_COMPONENT: usize = std::mem::size_of::<f32>();

    /// Wraps `data`, which must hold `vertex_count * components_per_vertex` floats.
    pub(crate) fn new(
        data: Vec<f32>,
        semantic: GeometrySourceSemantic,
        vertex_count: usize,
        components_per_vertex: usize,
    ) -> Self {
        debug_assert_eq!(data.len(), vertex_count * components_per_vertex);
        Self {
            data,
            semantic,
            vertex_count,
            components_per_vertex,
        }
    }

    pub fn semantic(&self) -> GeometrySourceSemantic {
        self.semantic
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn float_components(&self) -> bool {
        true
    }

    pub fn components_per_vertex(&self) -> usize {
        self.components_per_vertex
    }

    pub fn bytes_per_component(&self) -> usize {
        Self::BYTES_PER_COMPONENT
    }

    pub fn data_offset(&self) -> usize {
        0
    }

    pub fn data_stride(&self) -> usize {
        self.components_per_vertex * Self::BYTES_PER_COMPONENT
    }

    /// Raw vertex bytes, ready for upload.
    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn floats(&self) -> &[f32] {
        &self.data
    }

    /// Components of vertex `index`.
    pub fn vertex(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.components_per_vertex)?;
        self.data.get(start..start.checked_add(self.components_per_vertex)?)
    }
}
