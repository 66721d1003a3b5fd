use serde::Serialize;

/// Role of a geometry source in the draw pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometrySourceSemantic {
    Vertex,
    Normal,
    Texcoord,
    Color,
    BoneIndices,
    BoneWeights,
}

impl GeometrySourceSemantic {
    /// Maps a glTF attribute semantic to a source semantic.
    ///
    /// Only the first set of texture coordinates, colors, joints and weights
    /// is recognized; every other name yields `None`.
    pub fn from_gltf_semantic(name: &str) -> Option<Self> {
        match name {
            "POSITION" => Some(Self::Vertex),
            "NORMAL" => Some(Self::Normal),
            "TEXCOORD_0" => Some(Self::Texcoord),
            "COLOR_0" => Some(Self::Color),
            "JOINTS_0" => Some(Self::BoneIndices),
            "WEIGHTS_0" => Some(Self::BoneWeights),
            _ => None,
        }
    }

    pub fn gltf_semantic(&self) -> &'static str {
        match self {
            Self::Vertex => "POSITION",
            Self::Normal => "NORMAL",
            Self::Texcoord => "TEXCOORD_0",
            Self::Color => "COLOR_0",
            Self::BoneIndices => "JOINTS_0",
            Self::BoneWeights => "WEIGHTS_0",
        }
    }
}
