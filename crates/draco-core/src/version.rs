// Draco bitstream version constants and comparisons.
//
// Mesh and point cloud bitstreams have different latest versions in the
// reference library, so the limits are kept per geometry type.

/// Latest point cloud bitstream version understood by the decoder.
pub const POINT_CLOUD_BITSTREAM_VERSION: (u8, u8) = (2, 3);

/// Latest mesh bitstream version understood by the decoder.
pub const MESH_BITSTREAM_VERSION: (u8, u8) = (2, 2);

/// Oldest bitstream version this decoder accepts.
pub const MIN_SUPPORTED_VERSION: (u8, u8) = (2, 0);

/// From this version onwards the header carries a 16-bit flags field.
pub const VERSION_FLAGS_INTRODUCED: (u8, u8) = (1, 3);

/// Sequential mesh counts and mid-sized raw indices switched to varints here.
pub const VERSION_SEQUENTIAL_VARINT: (u8, u8) = (2, 2);

/// Packs a version the way the reference library compares them.
#[inline]
pub const fn bitstream_version(major: u8, minor: u8) -> u16 {
    ((major as u16) << 8) | minor as u16
}

/// Returns true if `(major, minor) >= target`.
#[inline]
pub fn version_at_least(major: u8, minor: u8, target: (u8, u8)) -> bool {
    bitstream_version(major, minor) >= bitstream_version(target.0, target.1)
}

/// Returns true if `(major, minor) < target`.
#[inline]
pub fn version_less_than(major: u8, minor: u8, target: (u8, u8)) -> bool {
    !version_at_least(major, minor, target)
}

#[inline]
pub fn has_header_flags(major: u8, minor: u8) -> bool {
    version_at_least(major, minor, VERSION_FLAGS_INTRODUCED)
}
