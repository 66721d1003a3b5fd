//! `KHR_draco_mesh_compression` primitive extension.
//!
//! A glTF primitive compressed with Draco carries the extension object:
//!
//! ```json
//! "extensions": {
//!     "KHR_draco_mesh_compression": {
//!         "bufferView": 5,
//!         "attributes": { "POSITION": 0, "NORMAL": 1 }
//!     }
//! }
//! ```
//!
//! The buffer view holds the Draco bitstream; `attributes` maps glTF semantics
//! to Draco attribute unique ids and is exactly the adapter's [`AttributeMap`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::loader::{decode_draco_data, AttributeMap, DecodedGeometry};

pub const EXTENSION_NAME: &str = "KHR_draco_mesh_compression";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DracoMeshCompression {
    pub buffer_view: usize,
    #[serde(default)]
    pub attributes: AttributeMap,
}

#[derive(Debug, Deserialize)]
struct PrimitiveExtensions {
    #[serde(rename = "KHR_draco_mesh_compression")]
    khr_draco_mesh_compression: Option<DracoMeshCompression>,
}

#[derive(Debug, Deserialize)]
struct Primitive {
    extensions: Option<PrimitiveExtensions>,
}

impl DracoMeshCompression {
    /// Parses the extension object itself.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Extracts the extension from a whole glTF primitive object.
    ///
    /// Returns `None` for primitives that are not Draco compressed.
    pub fn from_primitive(primitive: &Value) -> Result<Option<Self>> {
        let primitive = Primitive::deserialize(primitive)?;
        Ok(primitive
            .extensions
            .and_then(|extensions| extensions.khr_draco_mesh_compression))
    }

    pub fn attribute_map(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Decodes the primitive's Draco data taken from its buffer view.
    pub fn decode_primitive(&self, buffer_view_data: &[u8]) -> Result<DecodedGeometry> {
        decode_draco_data(buffer_view_data, &self.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_extension() {
        let ext = DracoMeshCompression::from_json_str(
            r#"{"bufferView": 3, "attributes": {"POSITION": 0, "TEXCOORD_0": 2, "NORMAL": 1}}"#,
        )
        .unwrap();
        assert_eq!(ext.buffer_view, 3);
        let names: Vec<&str> = ext.attribute_map().keys().map(String::as_str).collect();
        assert_eq!(names, ["NORMAL", "POSITION", "TEXCOORD_0"]);
        assert_eq!(ext.attribute_map()["TEXCOORD_0"], 2);
    }

    #[test]
    fn test_attributes_default_to_empty() {
        let ext = DracoMeshCompression::from_value(json!({"bufferView": 0})).unwrap();
        assert!(ext.attributes.is_empty());
    }

    #[test]
    fn test_rejects_malformed_extension() {
        for value in [
            json!({"attributes": {"POSITION": 0}}),
            json!({"bufferView": -1}),
            json!({"bufferView": 0, "attributes": {"POSITION": "zero"}}),
        ] {
            assert!(matches!(
                DracoMeshCompression::from_value(value),
                Err(crate::GeometryError::Extension(_))
            ));
        }
    }

    #[test]
    fn test_from_primitive() {
        let primitive = json!({
            "attributes": {"POSITION": 4, "NORMAL": 5},
            "indices": 6,
            "extensions": {
                "KHR_draco_mesh_compression": {
                    "bufferView": 2,
                    "attributes": {"POSITION": 0, "NORMAL": 1}
                }
            }
        });
        let ext = DracoMeshCompression::from_primitive(&primitive).unwrap().unwrap();
        assert_eq!(ext.buffer_view, 2);
        assert_eq!(ext.attributes["NORMAL"], 1);

        let plain = json!({"attributes": {"POSITION": 0}});
        assert_eq!(DracoMeshCompression::from_primitive(&plain).unwrap(), None);
    }
}
