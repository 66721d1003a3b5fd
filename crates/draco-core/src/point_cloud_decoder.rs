use tracing::debug;

use crate::attributes_decoder::decode_point_attributes;
use crate::decoder_buffer::DecoderBuffer;
use crate::mesh::Mesh;
use crate::mesh_decoder::decode_mesh;
use crate::metadata::{decode_geometry_metadata, GeometryMetadata};
use crate::point_cloud::PointCloud;
use crate::status::{unsupported, DracoError, Status};
use crate::version::{
    has_header_flags, version_less_than, MESH_BITSTREAM_VERSION, MIN_SUPPORTED_VERSION,
    POINT_CLOUD_BITSTREAM_VERSION,
};

const DRACO_MAGIC: &[u8; 5] = b"DRACO";

/// Header flag set when a metadata section follows the header.
pub const METADATA_FLAG_MASK: u16 = 0x8000;

/// Encoding method byte of sequentially encoded geometry.
pub const SEQUENTIAL_ENCODING: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedGeometryType {
    PointCloud = 0,
    TriangularMesh = 1,
}

impl EncodedGeometryType {
    pub fn name(&self) -> &'static str {
        match self {
            EncodedGeometryType::PointCloud => "point cloud",
            EncodedGeometryType::TriangularMesh => "triangular mesh",
        }
    }

    /// Newest bitstream version this crate reads for the geometry type.
    pub fn latest_version(&self) -> (u8, u8) {
        match self {
            EncodedGeometryType::PointCloud => POINT_CLOUD_BITSTREAM_VERSION,
            EncodedGeometryType::TriangularMesh => MESH_BITSTREAM_VERSION,
        }
    }

    /// Name of the non-sequential encoding method of this geometry type.
    fn alternative_method_name(&self) -> &'static str {
        match self {
            EncodedGeometryType::PointCloud => "kd-tree",
            EncodedGeometryType::TriangularMesh => "edgebreaker",
        }
    }
}

impl TryFrom<u8> for EncodedGeometryType {
    type Error = DracoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EncodedGeometryType::PointCloud),
            1 => Ok(EncodedGeometryType::TriangularMesh),
            _ => Err(DracoError::DracoError(format!(
                "Unsupported geometry type: {}",
                value
            ))),
        }
    }
}

/// The fixed header at the start of every Draco bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DracoHeader {
    pub version_major: u8,
    pub version_minor: u8,
    pub encoder_type: EncodedGeometryType,
    pub encoder_method: u8,
    pub flags: u16,
}

impl DracoHeader {
    pub fn decode(buffer: &mut DecoderBuffer) -> Result<Self, DracoError> {
        let magic = buffer
            .decode_slice(DRACO_MAGIC.len())
            .map_err(|_| DracoError::IoError("Failed to parse Draco header".into()))?;
        if magic != DRACO_MAGIC {
            return Err(DracoError::DracoError("Not a Draco file".into()));
        }
        let version_major = buffer.decode_u8()?;
        let version_minor = buffer.decode_u8()?;
        let encoder_type = EncodedGeometryType::try_from(buffer.decode_u8()?)?;
        let encoder_method = buffer.decode_u8()?;
        let flags = if has_header_flags(version_major, version_minor) {
            buffer.decode_u16()?
        } else {
            0
        };
        Ok(Self {
            version_major,
            version_minor,
            encoder_type,
            encoder_method,
            flags,
        })
    }

    pub fn version(&self) -> (u8, u8) {
        (self.version_major, self.version_minor)
    }

    pub fn has_metadata(&self) -> bool {
        self.flags & METADATA_FLAG_MASK != 0
    }

    pub fn method_name(&self) -> &'static str {
        if self.encoder_method == SEQUENTIAL_ENCODING {
            "sequential"
        } else if self.encoder_method == 1 {
            self.encoder_type.alternative_method_name()
        } else {
            "unknown"
        }
    }

    /// Rejects versions newer than the latest supported one and versions before 2.0.
    pub fn check_version(&self) -> Status {
        let (major, minor) = self.version();
        let (latest_major, latest_minor) = self.encoder_type.latest_version();
        if major < 1 || major > latest_major {
            return Err(DracoError::UnknownVersion(format!(
                "Unknown major version {}.{}",
                major, minor
            )));
        }
        if major == latest_major && minor > latest_minor {
            return Err(DracoError::UnknownVersion(format!(
                "Unknown minor version {}.{}",
                major, minor
            )));
        }
        if version_less_than(major, minor, MIN_SUPPORTED_VERSION) {
            return Err(DracoError::UnsupportedVersion(format!(
                "Bitstream version {}.{} is too old",
                major, minor
            )));
        }
        Ok(())
    }
}

/// Reads the header without decoding anything else.
pub fn peek_header(data: &[u8]) -> Result<DracoHeader, DracoError> {
    let mut buffer = DecoderBuffer::new(data);
    DracoHeader::decode(&mut buffer)
}

/// Reads and validates the header and optional metadata, leaving `buffer` at the
/// geometry data.
pub(crate) fn decode_prelude(
    buffer: &mut DecoderBuffer,
    expected: EncodedGeometryType,
) -> Result<(DracoHeader, Option<GeometryMetadata>), DracoError> {
    let header = DracoHeader::decode(buffer)?;
    if header.encoder_type != expected {
        return Err(DracoError::DracoError(format!(
            "Cannot decode a {} as a {}",
            header.encoder_type.name(),
            expected.name()
        )));
    }
    if header.encoder_method != SEQUENTIAL_ENCODING {
        if header.encoder_method == 1 {
            return Err(unsupported(format!(
                "{} decoding is not supported",
                header.method_name()
            )));
        }
        return Err(DracoError::DracoError(format!(
            "Unsupported encoding method: {}",
            header.encoder_method
        )));
    }
    header.check_version()?;
    buffer.set_version(header.version_major, header.version_minor);
    debug!(
        version_major = header.version_major,
        version_minor = header.version_minor,
        geometry = header.encoder_type.name(),
        "decoded Draco header"
    );

    let metadata = if header.has_metadata() {
        Some(decode_geometry_metadata(buffer)?)
    } else {
        None
    };
    Ok((header, metadata))
}

/// Decodes a point cloud. Meshes are accepted too and lose their faces.
pub fn decode_point_cloud(data: &[u8]) -> Result<PointCloud, DracoError> {
    let header = peek_header(data)?;
    if header.encoder_type == EncodedGeometryType::TriangularMesh {
        return decode_mesh(data).map(Mesh::into_point_cloud);
    }

    let mut buffer = DecoderBuffer::new(data);
    let (_, metadata) = decode_prelude(&mut buffer, EncodedGeometryType::PointCloud)?;

    let num_points = buffer.decode_i32()?;
    if num_points < 0 {
        return Err(DracoError::DracoError(format!(
            "Negative point count: {}",
            num_points
        )));
    }
    let mut point_cloud = PointCloud::new();
    point_cloud.set_num_points(num_points as usize);
    decode_point_attributes(&mut point_cloud, &mut buffer)?;
    if let Some(metadata) = metadata {
        point_cloud.set_metadata(metadata);
    }
    debug!(
        num_points,
        num_attributes = point_cloud.num_attributes(),
        "decoded point cloud"
    );
    Ok(point_cloud)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(major: u8, minor: u8, encoder_type: u8, method: u8, flags: u16) -> Vec<u8> {
        let mut data = b"DRACO".to_vec();
        data.extend_from_slice(&[major, minor, encoder_type, method]);
        data.extend_from_slice(&flags.to_le_bytes());
        data
    }

    #[test]
    fn test_peek_header() {
        let h = peek_header(&header(2, 2, 1, 0, METADATA_FLAG_MASK)).unwrap();
        assert_eq!(h.version(), (2, 2));
        assert_eq!(h.encoder_type, EncodedGeometryType::TriangularMesh);
        assert!(h.has_metadata());
        assert_eq!(h.method_name(), "sequential");
    }

    #[test]
    fn test_not_draco() {
        assert!(peek_header(b"DRACA\x02\x02\x01\x00\x00\x00").is_err());
        assert!(peek_header(b"DRA").is_err());
    }

    #[test]
    fn test_version_checks() {
        let check = |major, minor, ty| peek_header(&header(major, minor, ty, 0, 0)).unwrap().check_version();
        assert!(check(2, 2, 1).is_ok());
        assert!(check(2, 3, 0).is_ok());
        assert!(matches!(check(2, 3, 1), Err(DracoError::UnknownVersion(_))));
        assert!(matches!(check(3, 0, 0), Err(DracoError::UnknownVersion(_))));
        assert!(matches!(check(0, 9, 1), Err(DracoError::UnknownVersion(_))));
        assert!(matches!(check(1, 3, 1), Err(DracoError::UnsupportedVersion(_))));
    }

    #[test]
    fn test_point_cloud_without_attributes() {
        let mut data = header(2, 3, 0, 0, 0);
        data.extend_from_slice(&5i32.to_le_bytes());
        data.push(0);
        let pc = decode_point_cloud(&data).unwrap();
        assert_eq!(pc.num_points(), 5);
        assert_eq!(pc.num_attributes(), 0);
        assert!(pc.metadata().is_none());
    }

    #[test]
    fn test_negative_point_count() {
        let mut data = header(2, 3, 0, 0, 0);
        data.extend_from_slice(&(-1i32).to_le_bytes());
        data.push(0);
        assert!(decode_point_cloud(&data).is_err());
    }

    #[test]
    fn test_kd_tree_is_unsupported() {
        let data = header(2, 3, 0, 1, 0);
        assert!(matches!(
            decode_point_cloud(&data),
            Err(DracoError::UnsupportedFeature(_))
        ));
    }
}
