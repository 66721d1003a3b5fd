//! Sequential Draco mesh streams with raw connectivity and generic attributes.
#![allow(dead_code)]

pub const POSITION: u8 = 0;
pub const NORMAL: u8 = 1;
pub const COLOR: u8 = 2;
pub const TEX_COORD: u8 = 3;
pub const GENERIC: u8 = 4;
pub const JOINTS: u8 = 7;
pub const WEIGHTS: u8 = 8;

pub enum Values {
    Uint8(Vec<u8>),
    Uint16(Vec<u16>),
    Float32(Vec<f32>),
}

impl Values {
    fn data_type(&self) -> u8 {
        match self {
            Values::Uint8(_) => 2,
            Values::Uint16(_) => 4,
            Values::Float32(_) => 9,
        }
    }

    fn bytes(&self) -> Vec<u8> {
        match self {
            Values::Uint8(v) => v.clone(),
            Values::Uint16(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
            Values::Float32(v) => v.iter().flat_map(|x| x.to_le_bytes()).collect(),
        }
    }
}

struct Attribute {
    att_type: u8,
    unique_id: u32,
    num_components: u8,
    normalized: bool,
    values: Values,
}

#[derive(Default)]
pub struct MeshStream {
    num_points: u32,
    faces: Vec<[u32; 3]>,
    attributes: Vec<Attribute>,
}

impl MeshStream {
    pub fn new(num_points: u32) -> Self {
        Self {
            num_points,
            ..Self::default()
        }
    }

    pub fn face(mut self, face: [u32; 3]) -> Self {
        self.faces.push(face);
        self
    }

    pub fn faces(mut self, faces: &[[u32; 3]]) -> Self {
        self.faces.extend_from_slice(faces);
        self
    }

    pub fn attribute(mut self, att_type: u8, unique_id: u32, num_components: u8, values: Values) -> Self {
        self.attributes.push(Attribute {
            att_type,
            unique_id,
            num_components,
            normalized: false,
            values,
        });
        self
    }

    pub fn normalized_attribute(
        mut self,
        att_type: u8,
        unique_id: u32,
        num_components: u8,
        values: Values,
    ) -> Self {
        self.attributes.push(Attribute {
            att_type,
            unique_id,
            num_components,
            normalized: true,
            values,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = b"DRACO".to_vec();
        out.extend_from_slice(&[2, 2, 1, 0, 0, 0]);
        varint(&mut out, self.faces.len() as u64);
        varint(&mut out, self.num_points as u64);
        out.push(1);
        for &index in self.faces.iter().flatten() {
            if self.num_points < 256 {
                out.push(index as u8);
            } else if self.num_points < (1 << 16) {
                out.extend_from_slice(&(index as u16).to_le_bytes());
            } else if self.num_points < (1 << 21) {
                varint(&mut out, index as u64);
            } else {
                out.extend_from_slice(&index.to_le_bytes());
            }
        }

        if self.attributes.is_empty() {
            out.push(0);
            return out;
        }
        out.push(1);
        varint(&mut out, self.attributes.len() as u64);
        for att in &self.attributes {
            out.extend_from_slice(&[
                att.att_type,
                att.values.data_type(),
                att.num_components,
                att.normalized as u8,
            ]);
            varint(&mut out, att.unique_id as u64);
        }
        // Generic value decoders.
        out.extend(std::iter::repeat(0u8).take(self.attributes.len()));
        for att in &self.attributes {
            out.extend_from_slice(&att.values.bytes());
        }
        out
    }
}

fn varint(out: &mut Vec<u8>, mut v: u64) {
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Unit quad in the z = 0 plane with normals, texture coordinates and colors.
///
/// Unique ids: position 0, normal 1, tex coord 2, color 3.
pub fn quad() -> MeshStream {
    MeshStream::new(4)
        .faces(&[[0, 1, 2], [0, 2, 3]])
        .attribute(
            POSITION,
            0,
            3,
            Values::Float32(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]),
        )
        .attribute(NORMAL, 1, 3, Values::Float32([0.0, 0.0, 1.0].repeat(4)))
        .attribute(
            TEX_COORD,
            2,
            2,
            Values::Float32(vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]),
        )
        .normalized_attribute(
            COLOR,
            3,
            4,
            Values::Uint8(vec![255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 0]),
        )
}
