use crate::geometry_indices::{FaceIndex, PointIndex};
use crate::point_cloud::PointCloud;
use std::ops::{Deref, DerefMut};

pub type Face = [PointIndex; 3];

/// A triangle mesh: a point cloud plus faces referencing its points.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    point_cloud: PointCloud,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn face(&self, face_id: FaceIndex) -> Option<Face> {
        self.faces.get(face_id.0 as usize).copied()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Splits the mesh into its point cloud, dropping connectivity.
    pub fn into_point_cloud(self) -> PointCloud {
        self.point_cloud
    }
}

impl Deref for Mesh {
    type Target = PointCloud;

    fn deref(&self) -> &Self::Target {
        &self.point_cloud
    }
}

impl DerefMut for Mesh {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.point_cloud
    }
}
