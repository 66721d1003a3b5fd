use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryPrimitiveType {
    Triangle,
}

impl GeometryPrimitiveType {
    pub fn indices_per_primitive(&self) -> usize {
        match self {
            GeometryPrimitiveType::Triangle => 3,
        }
    }
}

/// Index buffer describing how the vertices of all sources form primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryElement {
    indices: Vec<u32>,
    primitive_type: GeometryPrimitiveType,
}

impl GeometryElement {
    pub const BYTES_PER_INDEX: usize = std::mem::size_of::<u32>();

    pub(crate) fn triangles(indices: Vec<u32>) -> Self {
        debug_assert_eq!(indices.len() % 3, 0);
        Self {
            indices,
            primitive_type: GeometryPrimitiveType::Triangle,
        }
    }

    pub fn primitive_type(&self) -> GeometryPrimitiveType {
        self.primitive_type
    }

    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.primitive_type.indices_per_primitive()
    }

    pub fn bytes_per_index(&self) -> usize {
        Self::BYTES_PER_INDEX
    }

    pub fn data(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex indices of primitive `index`.
    pub fn primitive(&self, index: usize) -> Option<&[u32]> {
        let n = self.primitive_type.indices_per_primitive();
        let start = index.checked_mul(n)?;
        self.indices.get(start..start.checked_add(n)?)
    }
}
