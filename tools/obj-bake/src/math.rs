//! 3-component vector helpers on top of `glam::Vec3`

use glam::Vec3;
use std::fmt;

use crate::error::{ObjError, ObjResult};

/// Scalars per position or averaged normal
pub const COMPONENTS: usize = 3;

/// Reference direction for the simple shading test
pub const UP: Vec3 = Vec3::Y;

/// Parse the first three tokens of a `v`/`vn` record
pub fn parse_vec3(tokens: &[&str], line: usize) -> ObjResult<Vec3> {
    if tokens.len() < COMPONENTS {
        return Err(ObjError::MissingComponents {
            found: tokens.len(),
            line,
        });
    }

    let mut xyz = [0.0f32; COMPONENTS];
    for (slot, token) in xyz.iter_mut().zip(tokens) {
        *slot = token
            .parse()
            .map_err(|_| ObjError::NumericParseFailure {
                token: (*token).to_string(),
                line,
            })?;
    }

    Ok(Vec3::from_array(xyz))
}

/// Unit-length copy of `v`.
///
/// A zero vector produces NaN components; callers comparing the result
/// against a fixed value simply never match.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    v / v.length()
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

/// Renders an `f32` as a C single-precision literal (`1.0f`, `1e-7f`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatLiteral(pub f32);

impl fmt::Display for FloatLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug keeps the trailing ".0" on whole numbers
        write!(f, "{:?}f", self.0)
    }
}

/// Render each component of `v` as a float literal
pub fn render_vec3(v: Vec3) -> [String; COMPONENTS] {
    v.to_array().map(|c| FloatLiteral(c).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        let v = parse_vec3(&["1", "-2.5", "0.25"], 2).unwrap();
        assert_eq!(v, Vec3::new(1.0, -2.5, 0.25));
    }

    #[test]
    fn test_parse_vec3_ignores_extra_tokens() {
        let v = parse_vec3(&["1", "2", "3", "1.0"], 2).unwrap();
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_vec3_errors() {
        assert_eq!(
            parse_vec3(&["1", "2"], 7),
            Err(ObjError::MissingComponents { found: 2, line: 7 })
        );
        assert_eq!(
            parse_vec3(&["1", "x", "3"], 4),
            Err(ObjError::NumericParseFailure {
                token: "x".to_string(),
                line: 4
            })
        );
    }

    #[test]
    fn test_normalize() {
        let n = normalize(Vec3::new(0.0, -4.0, 0.0));
        assert_eq!(n, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(dot(n, UP), -1.0);
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        let n = normalize(Vec3::ZERO);
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, -5.0, 6.0)), 12.0);
    }

    #[test]
    fn test_float_literal() {
        assert_eq!(FloatLiteral(0.0).to_string(), "0.0f");
        assert_eq!(FloatLiteral(1.0).to_string(), "1.0f");
        assert_eq!(FloatLiteral(-0.5).to_string(), "-0.5f");
        assert_eq!(FloatLiteral(0.8).to_string(), "0.8f");
        assert_eq!(FloatLiteral(1e-7).to_string(), "1e-7f");
    }

    #[test]
    fn test_render_vec3() {
        assert_eq!(
            render_vec3(Vec3::new(1.0, 0.5, -2.0)),
            ["1.0f", "0.5f", "-2.0f"]
        );
    }
}
