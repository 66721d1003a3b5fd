mod common;

use common::{raw_symbols, tagged_symbols, zigzag, StreamBuilder};
use draco_core::{
    decode_mesh, decode_point_cloud, AttributeValueIndex, DataType, DracoError,
    GeometryAttributeType, PointAttribute, PointIndex,
};

const UINT8: u8 = 2;
const FLOAT32: u8 = 9;

const KIND_GENERIC: u8 = 0;
const KIND_INTEGER: u8 = 1;
const KIND_QUANTIZATION: u8 = 2;
const KIND_NORMALS: u8 = 3;

/// Single-triangle mesh header and connectivity for three points.
fn triangle() -> StreamBuilder {
    let mut s = StreamBuilder::header(2, 2, 1, 0, 0);
    s.varint(1).varint(3).u8(1).bytes(&[0, 1, 2]);
    s
}

fn value(attribute: &PointAttribute, point: u32, num_components: usize) -> Vec<f32> {
    let mut out = vec![0f32; num_components];
    attribute
        .convert_value(attribute.mapped_index(PointIndex(point)), &mut out)
        .unwrap();
    out
}

fn assert_close(actual: &[f32], expected: &[f32]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-5, "{:?} != {:?}", actual, expected);
    }
}

/// Quantized positions (wrap delta, tagged symbols) and canonicalized octahedral
/// normals decoded by one attributes decoder.
fn positions_and_normals() -> Vec<u8> {
    let mut s = triangle();
    s.u8(1).varint(2);
    s.attribute(0, FLOAT32, 3, false, 0);
    s.attribute(1, FLOAT32, 3, false, 1);
    s.u8(KIND_QUANTIZATION).u8(KIND_NORMALS);

    // Positions: quantized (0,0,0), (1023,512,0), (512,512,1023) as delta corrections.
    let corrections = [0, 0, 0, 1023, 512, 0, -511, 0, 1023];
    let symbols: Vec<u32> = corrections.iter().map(|&c| zigzag(c)).collect();
    s.i8(0).i8(1).u8(1);
    tagged_symbols(&mut s, &symbols, 3);
    s.i32(0).i32(1023);

    // Normals: octahedral (127,127), (254,127), (127,254) as canonicalized corrections.
    s.i8(0).i8(3).u8(0).u8(1);
    s.bytes(&[127, 127, 127, 0, 127, 128]);
    s.i32(255).i32(127);

    // Transform data: quantization parameters, then normal bits.
    s.f32(-1.0).f32(-1.0).f32(-1.0).f32(2.0).u8(10);
    s.u8(8);
    s.build()
}

#[test]
fn decodes_quantized_positions() {
    let mesh = decode_mesh(&positions_and_normals()).unwrap();
    let position = mesh.named_attribute(GeometryAttributeType::Position).unwrap();
    assert_eq!(position.data_type(), DataType::Float32);
    let step = 2.0 / 1023.0;
    assert_close(&value(position, 0, 3), &[-1.0, -1.0, -1.0]);
    assert_close(&value(position, 1, 3), &[1.0, 512.0 * step - 1.0, -1.0]);
    assert_close(&value(position, 2, 3), &[512.0 * step - 1.0, 512.0 * step - 1.0, 1.0]);
}

#[test]
fn decodes_octahedral_normals() {
    let mesh = decode_mesh(&positions_and_normals()).unwrap();
    let normal = mesh.attribute_by_unique_id(1).unwrap();
    assert_eq!(normal.attribute_type(), GeometryAttributeType::Normal);
    assert_close(&value(normal, 0, 3), &[1.0, 0.0, 0.0]);
    assert_close(&value(normal, 1, 3), &[0.0, 1.0, 0.0]);
    assert_close(&value(normal, 2, 3), &[0.0, 0.0, 1.0]);
}

#[test]
fn decodes_normalized_integer_colors() {
    let mut s = triangle();
    s.u8(1).varint(1).attribute(2, UINT8, 4, true, 3).u8(KIND_INTEGER);
    let colors = [255, 0, 0, 255, 0, 255, 0, 128, 10, 20, 30, 40];
    let symbols: Vec<u32> = colors.iter().map(|&c| zigzag(c)).collect();
    s.i8(-2).u8(1);
    raw_symbols(&mut s, &symbols);

    let mesh = decode_mesh(&s.build()).unwrap();
    let color = mesh.named_attribute(GeometryAttributeType::Color).unwrap();
    assert_eq!(color.unique_id(), 3);
    assert_eq!(
        color.value_bytes(AttributeValueIndex(2)),
        Some(&[10u8, 20, 30, 40][..])
    );
    assert_close(&value(color, 0, 4), &[1.0, 0.0, 0.0, 1.0]);
    assert_close(&value(color, 1, 4), &[0.0, 1.0, 0.0, 128.0 / 255.0]);
}

#[test]
fn pads_missing_components_with_zero() {
    let mut s = triangle();
    s.u8(1).varint(1).attribute(3, FLOAT32, 2, false, 5).u8(KIND_GENERIC);
    for v in [0.25f32, 0.5, 0.75, 1.0, 0.0, 0.125] {
        s.f32(v);
    }
    let mesh = decode_mesh(&s.build()).unwrap();
    let uv = mesh.named_attribute(GeometryAttributeType::TexCoord).unwrap();
    assert_close(&value(uv, 1, 4), &[0.75, 1.0, 0.0, 0.0]);
}

#[test]
fn decodes_point_cloud_attributes() {
    let mut s = StreamBuilder::header(2, 3, 0, 0, 0);
    s.i32(2);
    s.u8(1).varint(1).attribute(4, UINT8, 1, false, 11).u8(KIND_INTEGER);
    s.i8(-2).u8(0).u8(1).bytes(&[zigzag(7) as u8, zigzag(9) as u8]);
    let pc = decode_point_cloud(&s.build()).unwrap();
    let generic = pc.attribute_by_unique_id(11).unwrap();
    assert_eq!(generic.buffer().data(), &[7, 9]);
}

#[test]
fn rejects_normals_with_wrong_layout() {
    let mut s = triangle();
    s.u8(1).varint(1).attribute(1, FLOAT32, 2, false, 0).u8(KIND_NORMALS);
    assert!(decode_mesh(&s.build()).is_err());
}

#[test]
fn rejects_integer_transform_for_normals() {
    let mut s = triangle();
    s.u8(1).varint(1).attribute(1, FLOAT32, 3, false, 0).u8(KIND_NORMALS);
    s.i8(0).i8(1).u8(0).u8(1).bytes(&[0; 6]);
    assert!(matches!(
        decode_mesh(&s.build()),
        Err(DracoError::UnsupportedFeature(_))
    ));
}

#[test]
fn truncated_attribute_data_fails_cleanly() {
    let data = positions_and_normals();
    for len in 0..data.len() {
        assert!(decode_mesh(&data[..len]).is_err(), "prefix of {} bytes", len);
    }
}
