//! Octahedral normal prediction transforms.
//!
//! Both transforms store corrections as non-negative values and reconstruct
//! `mod_max(prediction + correction)` in center-origin coordinates. Predictions
//! outside the diamond are mirrored inside first. The canonicalized variant also
//! rotates the prediction into the bottom-left quadrant.

use crate::decoder_buffer::DecoderBuffer;
use crate::normal_compression_utils::OctahedronToolBox;
use crate::prediction_scheme::{PredictionSchemeDecodingTransform, PredictionSchemeTransformType};
use crate::status::{DracoError, Status};
use crate::version::{version_less_than, VERSION_SEQUENTIAL_VARINT};

type Point2 = (i32, i32);

#[derive(Debug, Default, Clone)]
struct OctahedronTransformBase {
    tool_box: OctahedronToolBox,
}

impl OctahedronTransformBase {
    fn set_max_quantized_value(&mut self, max_quantized_value: i32) -> Status {
        if max_quantized_value <= 0 || max_quantized_value % 2 == 0 {
            return Err(DracoError::DracoError(format!(
                "Invalid octahedral max quantized value: {}",
                max_quantized_value
            )));
        }
        let q = 32 - max_quantized_value.leading_zeros() as i32;
        self.tool_box.set_quantization_bits(q)
    }

    fn center(&self) -> i32 {
        self.tool_box.center_value()
    }

    fn to_origin(&self, p: Point2) -> Point2 {
        (p.0.wrapping_sub(self.center()), p.1.wrapping_sub(self.center()))
    }

    fn from_origin(&self, p: Point2) -> Point2 {
        (p.0.wrapping_add(self.center()), p.1.wrapping_add(self.center()))
    }

    fn invert_diamond(&self, p: Point2) -> Point2 {
        let (mut s, mut t) = p;
        self.tool_box.invert_diamond(&mut s, &mut t);
        (s, t)
    }

    fn add_mod_max(&self, pred: Point2, corr: Point2) -> Point2 {
        (
            self.tool_box.mod_max(pred.0.wrapping_add(corr.0)),
            self.tool_box.mod_max(pred.1.wrapping_add(corr.1)),
        )
    }
}

/// Plain octahedron transform.
#[derive(Debug, Default, Clone)]
pub struct PredictionSchemeNormalOctahedronDecodingTransform {
    base: OctahedronTransformBase,
}

impl PredictionSchemeNormalOctahedronDecodingTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantization_bits(&self) -> i32 {
        self.base.tool_box.quantization_bits()
    }

    fn compute_original_point(&self, pred: Point2, corr: Point2) -> Point2 {
        let mut pred = self.base.to_origin(pred);
        let pred_is_in_diamond = self.base.tool_box.is_in_diamond(pred.0, pred.1);
        if !pred_is_in_diamond {
            pred = self.base.invert_diamond(pred);
        }
        let mut orig = self.base.add_mod_max(pred, corr);
        if !pred_is_in_diamond {
            orig = self.base.invert_diamond(orig);
        }
        self.base.from_origin(orig)
    }
}

impl PredictionSchemeDecodingTransform for PredictionSchemeNormalOctahedronDecodingTransform {
    fn transform_type(&self) -> PredictionSchemeTransformType {
        PredictionSchemeTransformType::NormalOctahedron
    }

    fn init(&mut self, _num_components: usize) {}

    fn decode_transform_data(&mut self, buffer: &mut DecoderBuffer) -> Status {
        let max_quantized_value = buffer.decode_i32()?;
        if version_less_than(
            buffer.version_major(),
            buffer.version_minor(),
            VERSION_SEQUENTIAL_VARINT,
        ) {
            // Center value, derived from the max value since v2.2.
            buffer.decode_i32()?;
        }
        self.base.set_max_quantized_value(max_quantized_value)
    }

    fn compute_original_value(&self, predicted: &[i32], corrections: &[i32], out: &mut [i32]) {
        let orig = self.compute_original_point(
            (predicted[0], predicted[1]),
            (corrections[0], corrections[1]),
        );
        out[0] = orig.0;
        out[1] = orig.1;
    }

    fn are_corrections_positive(&self) -> bool {
        true
    }
}

/// Octahedron transform that canonicalizes predictions into the bottom-left quadrant.
#[derive(Debug, Default, Clone)]
pub struct PredictionSchemeNormalOctahedronCanonicalizedDecodingTransform {
    base: OctahedronTransformBase,
}

impl PredictionSchemeNormalOctahedronCanonicalizedDecodingTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantization_bits(&self) -> i32 {
        self.base.tool_box.quantization_bits()
    }

    fn is_in_bottom_left(p: Point2) -> bool {
        if p.0 == 0 && p.1 == 0 {
            return true;
        }
        p.0 < 0 && p.1 <= 0
    }

    fn rotation_count(p: Point2) -> i32 {
        let (x, y) = p;
        if x == 0 {
            if y == 0 {
                0
            } else if y > 0 {
                3
            } else {
                1
            }
        } else if x > 0 {
            if y >= 0 {
                2
            } else {
                1
            }
        } else if y <= 0 {
            0
        } else {
            3
        }
    }

    fn rotate_point(p: Point2, rotation_count: i32) -> Point2 {
        match rotation_count {
            1 => (p.1, p.0.wrapping_neg()),
            2 => (p.0.wrapping_neg(), p.1.wrapping_neg()),
            3 => (p.1.wrapping_neg(), p.0),
            _ => p,
        }
    }

    fn compute_original_point(&self, pred: Point2, corr: Point2) -> Point2 {
        let mut pred = self.base.to_origin(pred);
        let pred_is_in_diamond = self.base.tool_box.is_in_diamond(pred.0, pred.1);
        if !pred_is_in_diamond {
            pred = self.base.invert_diamond(pred);
        }
        let pred_is_in_bottom_left = Self::is_in_bottom_left(pred);
        let rotation_count = Self::rotation_count(pred);
        if !pred_is_in_bottom_left {
            pred = Self::rotate_point(pred, rotation_count);
        }
        let mut orig = self.base.add_mod_max(pred, corr);
        if !pred_is_in_bottom_left {
            orig = Self::rotate_point(orig, (4 - rotation_count) % 4);
        }
        if !pred_is_in_diamond {
            orig = self.base.invert_diamond(orig);
        }
        self.base.from_origin(orig)
    }
}

impl PredictionSchemeDecodingTransform for PredictionSchemeNormalOctahedronCanonicalizedDecodingTransform {
    fn transform_type(&self) -> PredictionSchemeTransformType {
        PredictionSchemeTransformType::NormalOctahedronCanonicalized
    }

    fn init(&mut self, _num_components: usize) {}

    fn decode_transform_data(&mut self, buffer: &mut DecoderBuffer) -> Status {
        let max_quantized_value = buffer.decode_i32()?;
        // Center value; always present for this transform.
        buffer.decode_i32()?;
        self.base.set_max_quantized_value(max_quantized_value)
    }

    fn compute_original_value(&self, predicted: &[i32], corrections: &[i32], out: &mut [i32]) {
        let orig = self.compute_original_point(
            (predicted[0], predicted[1]),
            (corrections[0], corrections[1]),
        );
        out[0] = orig.0;
        out[1] = orig.1;
    }

    fn are_corrections_positive(&self) -> bool {
        true
    }
}
