use draco_core::DracoError;
use thiserror::Error;

/// Errors that can occur while turning Draco data into renderer geometry.
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Draco decode error: {0}")]
    Decode(#[from] DracoError),

    #[error("Cannot allocate {components} float components for {vertex_count} vertices")]
    Allocation { vertex_count: usize, components: usize },

    #[error("Invalid KHR_draco_mesh_compression extension: {0}")]
    Extension(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GeometryError>;
