use crate::status::DracoError;

/// Helpers for octahedral normal coordinates.
///
/// Quantized coordinates live in `[0, max_quantized_value]`. The transforms work
/// on coordinates shifted so the center of the octahedron square is the origin.
#[derive(Debug, Default, Clone, Copy)]
pub struct OctahedronToolBox {
    quantization_bits: i32,
    max_quantized_value: i32,
    max_value: i32,
    dequantization_scale: f32,
    center_value: i32,
}

impl OctahedronToolBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quantization_bits(&mut self, q: i32) -> Result<(), DracoError> {
        if !(2..=30).contains(&q) {
            return Err(DracoError::DracoError(format!(
                "Invalid octahedral quantization bits: {}",
                q
            )));
        }
        self.quantization_bits = q;
        self.max_quantized_value = (1 << q) - 1;
        self.max_value = self.max_quantized_value - 1;
        self.dequantization_scale = 2.0 / self.max_value as f32;
        self.center_value = self.max_value / 2;
        Ok(())
    }

    pub fn quantization_bits(&self) -> i32 {
        self.quantization_bits
    }

    pub fn max_quantized_value(&self) -> i32 {
        self.max_quantized_value
    }

    pub fn center_value(&self) -> i32 {
        self.center_value
    }

    /// Expects the center already moved to the origin.
    pub fn is_in_diamond(&self, s: i32, t: i32) -> bool {
        s.unsigned_abs() as u64 + t.unsigned_abs() as u64 <= self.center_value as u64
    }

    /// Mirrors a point across the diamond edge of its quadrant.
    pub fn invert_diamond(&self, s: &mut i32, t: &mut i32) {
        let (sign_s, sign_t): (i32, i32) = if *s >= 0 && *t >= 0 {
            (1, 1)
        } else if *s <= 0 && *t <= 0 {
            (-1, -1)
        } else {
            (if *s > 0 { 1 } else { -1 }, if *t > 0 { 1 } else { -1 })
        };

        // Unsigned arithmetic keeps corrupt inputs from overflowing.
        let corner_point_s = (sign_s * self.center_value) as u32;
        let corner_point_t = (sign_t * self.center_value) as u32;
        let mut us = *s as u32;
        let mut ut = *t as u32;
        us = us.wrapping_add(us).wrapping_sub(corner_point_s);
        ut = ut.wrapping_add(ut).wrapping_sub(corner_point_t);
        if sign_s * sign_t >= 0 {
            let temp = us;
            us = ut.wrapping_neg();
            ut = temp.wrapping_neg();
        } else {
            std::mem::swap(&mut us, &mut ut);
        }
        us = us.wrapping_add(corner_point_s);
        ut = ut.wrapping_add(corner_point_t);

        *s = us as i32 / 2;
        *t = ut as i32 / 2;
    }

    /// Folds a value back into `[-center, center]`.
    pub fn mod_max(&self, x: i32) -> i32 {
        if x > self.center_value {
            return x.wrapping_sub(self.max_quantized_value);
        }
        if x < -self.center_value {
            return x.wrapping_add(self.max_quantized_value);
        }
        x
    }

    pub fn quantized_octahedral_coords_to_unit_vector(&self, s: i32, t: i32) -> [f32; 3] {
        let y = s as f32 * self.dequantization_scale - 1.0;
        let z = t as f32 * self.dequantization_scale - 1.0;
        octahedral_coords_to_unit_vector(y, z)
    }
}

/// Maps coordinates in `[-1, 1]^2` onto the unit sphere.
///
/// `s` is the y component and `t` the z component; x follows from the
/// octahedron surface. Points of the lower hemisphere are unfolded along the
/// diamond diagonals.
pub fn octahedral_coords_to_unit_vector(s: f32, t: f32) -> [f32; 3] {
    let mut y = s;
    let mut z = t;
    let x = 1.0 - y.abs() - z.abs();

    let x_offset = (-x).max(0.0);
    y += if y < 0.0 { x_offset } else { -x_offset };
    z += if z < 0.0 { x_offset } else { -x_offset };

    let norm_squared = x * x + y * y + z * z;
    if norm_squared < 1e-6 {
        [0.0, 0.0, 0.0]
    } else {
        let d = 1.0 / norm_squared.sqrt();
        [x * d, y * d, z * d]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tool_box(q: i32) -> OctahedronToolBox {
        let mut tb = OctahedronToolBox::new();
        tb.set_quantization_bits(q).unwrap();
        tb
    }

    #[test]
    fn test_quantization_bounds() {
        let mut tb = OctahedronToolBox::new();
        assert!(tb.set_quantization_bits(1).is_err());
        assert!(tb.set_quantization_bits(31).is_err());
        let tb = tool_box(8);
        assert_eq!(tb.max_quantized_value(), 255);
        assert_eq!(tb.center_value(), 127);
    }

    #[test]
    fn test_center_maps_to_positive_x() {
        let tb = tool_box(8);
        let v = tb.quantized_octahedral_coords_to_unit_vector(127, 127);
        assert!((v[0] - 1.0).abs() < 1e-6);
        assert!(v[1].abs() < 1e-6);
        assert!(v[2].abs() < 1e-6);
    }

    #[test]
    fn test_corners_map_to_negative_x() {
        let tb = tool_box(8);
        let v = tb.quantized_octahedral_coords_to_unit_vector(0, 0);
        assert!((v[0] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_axis_points() {
        let tb = tool_box(8);
        // s = max -> y = +1.
        let v = tb.quantized_octahedral_coords_to_unit_vector(254, 127);
        assert!(v[0].abs() < 1e-6);
        assert!((v[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_invert_diamond_is_involution() {
        let tb = tool_box(8);
        for (s, t) in [(100, 50), (-90, 60), (-70, -80), (80, -120)] {
            let (mut s1, mut t1) = (s, t);
            tb.invert_diamond(&mut s1, &mut t1);
            tb.invert_diamond(&mut s1, &mut t1);
            assert_eq!((s1, t1), (s, t));
        }
    }

    #[test]
    fn test_mod_max() {
        let tb = tool_box(8);
        assert_eq!(tb.mod_max(128), 128 - 255);
        assert_eq!(tb.mod_max(-128), -128 + 255);
        assert_eq!(tb.mod_max(127), 127);
    }

    proptest! {
        #[test]
        fn prop_decoded_normals_are_unit_length(s in 0i32..=1022, t in 0i32..=1022) {
            let tb = tool_box(10);
            let v = tb.quantized_octahedral_coords_to_unit_vector(s, t);
            let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            prop_assert!((len - 1.0).abs() < 1e-4);
        }
    }
}
