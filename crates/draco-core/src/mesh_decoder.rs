use tracing::{debug, trace};

use crate::attributes_decoder::decode_point_attributes;
use crate::decoder_buffer::DecoderBuffer;
use crate::geometry_indices::PointIndex;
use crate::mesh::{Face, Mesh};
use crate::point_cloud_decoder::{decode_prelude, peek_header, EncodedGeometryType};
use crate::status::{DracoError, Status};
use crate::symbol_decoding::decode_symbols;
use crate::version::{version_at_least, version_less_than, VERSION_SEQUENTIAL_VARINT};

/// Connectivity method byte of entropy coded, delta compressed indices.
const CONNECTIVITY_COMPRESSED: u8 = 0;

/// Decodes a sequentially encoded triangle mesh.
pub fn decode_mesh(data: &[u8]) -> Result<Mesh, DracoError> {
    let header = peek_header(data)?;
    if header.encoder_type != EncodedGeometryType::TriangularMesh {
        return Err(DracoError::DracoError(format!(
            "Unsupported geometry type: {}",
            header.encoder_type.name()
        )));
    }

    let mut buffer = DecoderBuffer::new(data);
    let (_, metadata) = decode_prelude(&mut buffer, EncodedGeometryType::TriangularMesh)?;

    let mut mesh = Mesh::new();
    decode_connectivity(&mut mesh, &mut buffer)?;
    decode_point_attributes(&mut mesh, &mut buffer)?;
    if let Some(metadata) = metadata {
        mesh.set_metadata(metadata);
    }
    debug!(
        num_faces = mesh.num_faces(),
        num_points = mesh.num_points(),
        num_attributes = mesh.num_attributes(),
        "decoded mesh"
    );
    Ok(mesh)
}

fn decode_connectivity(mesh: &mut Mesh, buffer: &mut DecoderBuffer) -> Status {
    let (num_faces, num_points) = if version_less_than(
        buffer.version_major(),
        buffer.version_minor(),
        VERSION_SEQUENTIAL_VARINT,
    ) {
        (buffer.decode_u32()?, buffer.decode_u32()?)
    } else {
        (buffer.decode_varint_u32()?, buffer.decode_varint_u32()?)
    };

    if num_faces as u64 > u32::MAX as u64 / 3 {
        return Err(DracoError::DracoError(format!(
            "Too many faces: {}",
            num_faces
        )));
    }
    // Every face takes at least three bytes.
    if num_faces as usize > buffer.remaining_size() / 3 {
        return Err(DracoError::BufferError(format!(
            "{} faces cannot fit in {} bytes",
            num_faces,
            buffer.remaining_size()
        )));
    }

    let connectivity_method = buffer.decode_u8()?;
    trace!(num_faces, num_points, connectivity_method, "sequential connectivity");
    let faces = if connectivity_method == CONNECTIVITY_COMPRESSED {
        decode_compressed_indices(num_faces as usize, buffer)?
    } else {
        decode_raw_indices(num_faces as usize, num_points, buffer)?
    };

    for (face_id, face) in faces.iter().enumerate() {
        if let Some(index) = face.iter().find(|index| index.0 >= num_points) {
            return Err(DracoError::DracoError(format!(
                "Face {} references point {} of {}",
                face_id, index.0, num_points
            )));
        }
    }
    for face in faces {
        mesh.add_face(face);
    }
    mesh.set_num_points(num_points as usize);
    Ok(())
}

/// Indices are stored as zig-zag like differences to the previous index.
fn decode_compressed_indices(num_faces: usize, buffer: &mut DecoderBuffer) -> Result<Vec<Face>, DracoError> {
    let num_indices = num_faces * 3;
    let mut symbols = vec![0u32; num_indices];
    decode_symbols(num_indices, 1, buffer, &mut symbols)?;

    let mut faces = Vec::with_capacity(num_faces);
    let mut last_index_value: i32 = 0;
    for chunk in symbols.chunks_exact(3) {
        let mut face = [PointIndex(0); 3];
        for (slot, &encoded) in face.iter_mut().zip(chunk) {
            let index_diff = (encoded >> 1) as i32;
            let index_value = if encoded & 1 != 0 {
                if index_diff > last_index_value {
                    return Err(DracoError::DracoError(
                        "Index difference points below zero".into(),
                    ));
                }
                last_index_value - index_diff
            } else {
                if index_diff > i32::MAX - last_index_value {
                    return Err(DracoError::DracoError(
                        "Index difference overflows".into(),
                    ));
                }
                last_index_value + index_diff
            };
            *slot = PointIndex(index_value as u32);
            last_index_value = index_value;
        }
        faces.push(face);
    }
    Ok(faces)
}

fn decode_raw_indices(
    num_faces: usize,
    num_points: u32,
    buffer: &mut DecoderBuffer,
) -> Result<Vec<Face>, DracoError> {
    let varint_allowed = version_at_least(
        buffer.version_major(),
        buffer.version_minor(),
        VERSION_SEQUENTIAL_VARINT,
    );
    let mut faces = Vec::with_capacity(num_faces);
    for _ in 0..num_faces {
        let mut face = [PointIndex(0); 3];
        for slot in face.iter_mut() {
            let index = if num_points < 256 {
                buffer.decode_u8()? as u32
            } else if num_points < (1 << 16) {
                buffer.decode_u16()? as u32
            } else if varint_allowed && num_points < (1 << 21) {
                buffer.decode_varint_u32()?
            } else {
                buffer.decode_u32()?
            };
            *slot = PointIndex(index);
        }
        faces.push(face);
    }
    Ok(faces)
}
