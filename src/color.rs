/// Colour filter matrices
///
/// Linear RGB matrices for the CSS filter functions used by the
/// built-in styles (sepia, saturate, hue-rotate). Coefficients come from
/// the Filter Effects Module Level 1 definitions; each matrix is the
/// identity at the function's neutral value.
use cgmath::{Deg, Matrix3, Rad, SquareMatrix, Vector3};

use crate::state::style::TransformParams;

/// Build a matrix from row-major coefficients (cgmath stores columns)
fn from_rows(rows: [[f32; 3]; 3]) -> Matrix3<f32> {
    Matrix3::from_cols(
        Vector3::new(rows[0][0], rows[1][0], rows[2][0]),
        Vector3::new(rows[0][1], rows[1][1], rows[2][1]),
        Vector3::new(rows[0][2], rows[1][2], rows[2][2]),
    )
}

pub fn sepia_matrix(amount: f32) -> Matrix3<f32> {
    let k = 1.0 - amount.clamp(0.0, 1.0);
    from_rows([
        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
    ])
}

pub fn saturate_matrix(s: f32) -> Matrix3<f32> {
    let s = s.max(0.0);
    from_rows([
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ])
}

pub fn hue_rotate_matrix(degrees: f32) -> Matrix3<f32> {
    let Rad(theta) = Rad::from(Deg(degrees));
    let (sin, cos) = theta.sin_cos();
    from_rows([
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ])
}

/// Combined colour matrix for sepia, then saturate, then hue-rotate
pub fn color_matrix(params: &TransformParams) -> Matrix3<f32> {
    hue_rotate_matrix(params.hue_rotate) * saturate_matrix(params.saturate) * sepia_matrix(params.sepia)
}

/// Per-pixel colour pipeline, precomputed from transform parameters
#[derive(Debug, Clone, Copy)]
pub struct ColorFilter {
    matrix: Matrix3<f32>,
    contrast: f32,
    brightness: f32,
    opacity: f32,
}

impl ColorFilter {
    pub fn new(params: &TransformParams) -> Self {
        Self {
            matrix: color_matrix(params),
            contrast: params.contrast.max(0.0),
            brightness: params.brightness.max(0.0),
            opacity: params.opacity.clamp(0.0, 1.0),
        }
    }

    /// True if the filter leaves every pixel unchanged
    pub fn is_identity(&self) -> bool {
        const EPSILON: f32 = 0.001;
        let identity = Matrix3::<f32>::identity();
        let matrix_is_identity = (0..3).all(|c| {
            (0..3).all(|r| (self.matrix[c][r] - identity[c][r]).abs() < EPSILON)
        });
        matrix_is_identity
            && (self.contrast - 1.0).abs() < EPSILON
            && (self.brightness - 1.0).abs() < EPSILON
            && (self.opacity - 1.0).abs() < EPSILON
    }

    /// Apply to one RGBA pixel
    ///
    /// Channels are clamped to [0, 1] after the matrix and again after contrast.
    pub fn apply(&self, [r, g, b, a]: [u8; 4]) -> [u8; 4] {
        let rgb = Vector3::new(r as f32, g as f32, b as f32) / 255.0;
        let rgb = self.matrix * rgb;
        let tone = |v: f32| {
            let v = v.clamp(0.0, 1.0);
            let v = ((v - 0.5) * self.contrast + 0.5).clamp(0.0, 1.0);
            to_u8(v * self.brightness)
        };
        let alpha = to_u8(a as f32 / 255.0 * self.opacity);
        [tone(rgb.x), tone(rgb.y), tone(rgb.z), alpha]
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
