//! Vehicle outline shapes for icon rendering.
//!
//! A renderer draws the robot as a closed polygon re-oriented and
//! re-positioned to match each pose. The outline comes either from a named
//! preset or from an explicit point sequence, resolved once at construction;
//! the simulator itself never touches this module.

#![warn(missing_docs)]

use crate::error::ShapeError;
use trundle_kinematics::Pose;

// Preset outline constants, vehicle at origin pointing along +x:
// half-height, start of head taper, centre x offset, length.
const H: f64 = 0.3;
const T: f64 = 0.8;
const C: f64 = 0.5;
const W: f64 = 1.0;

/// How a vehicle outline is specified before resolution.
///
/// Useful as a configuration value: a frontend can deserialize either a
/// preset name or a raw point list and resolve it once at startup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ShapeSpec {
    /// A named preset: `"car"`, `"box"`, or `"triangle"`.
    Preset(String),
    /// An explicit ordered outline of `[x, y]` vertices.
    Points(Vec<[f64; 2]>),
}

impl ShapeSpec {
    /// Resolves into a concrete outline with the given uniform scale.
    pub fn resolve(&self, scale: f64) -> Result<VehicleShape, ShapeError> {
        match self {
            ShapeSpec::Preset(name) => VehicleShape::preset(name, scale),
            ShapeSpec::Points(points) => VehicleShape::from_points(points, scale),
        }
    }
}

/// A closed polygon outline describing the vehicle body.
///
/// Vertices are in the body frame with the vehicle at the origin pointing
/// along the +x axis; [`VehicleShape::placed_at`] maps them into the world
/// frame for a given pose.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleShape {
    coords: Vec<[f64; 2]>,
}

impl VehicleShape {
    /// Resolves a named preset outline, uniformly scaled.
    ///
    /// # Errors
    ///
    /// Returns `Err(ShapeError::UnknownShape)` for an unrecognized name and
    /// `Err(ShapeError::InvalidShapeArgument)` for a non-positive scale.
    pub fn preset(name: &str, scale: f64) -> Result<Self, ShapeError> {
        let coords: Vec<[f64; 2]> = match name {
            "car" => vec![
                [-C, H],
                [T - C, H],
                [W - C, 0.0],
                [T - C, -H],
                [-C, -H],
            ],
            "box" => vec![[-C, H], [W - C, H], [W - C, -H], [-C, -H]],
            "triangle" => vec![[-C, H], [W, 0.0], [-C, -H]],
            other => return Err(ShapeError::UnknownShape(other.to_string())),
        };
        Self::scaled(coords, scale)
    }

    /// Builds an outline from an explicit vertex sequence, uniformly scaled.
    ///
    /// # Errors
    ///
    /// Returns `Err(ShapeError::InvalidShapeArgument)` if there are fewer
    /// than three vertices, any coordinate is non-finite, or the scale is
    /// not positive.
    pub fn from_points(points: &[[f64; 2]], scale: f64) -> Result<Self, ShapeError> {
        if points.len() < 3 {
            return Err(ShapeError::InvalidShapeArgument(
                "outline needs at least three vertices",
            ));
        }
        if points.iter().flatten().any(|c| !c.is_finite()) {
            return Err(ShapeError::InvalidShapeArgument(
                "outline coordinates must be finite",
            ));
        }
        Self::scaled(points.to_vec(), scale)
    }

    /// Builds an outline from interleaved `x0, y0, x1, y1, …` data.
    ///
    /// # Errors
    ///
    /// Returns `Err(ShapeError::InvalidShapeArgument)` when the data is not
    /// an Nx2 sequence (odd length), in addition to the
    /// [`VehicleShape::from_points`] conditions.
    pub fn from_flat(coords: &[f64], scale: f64) -> Result<Self, ShapeError> {
        if coords.len() % 2 != 0 {
            return Err(ShapeError::InvalidShapeArgument(
                "flat outline data must be an Nx2 sequence",
            ));
        }
        let points: Vec<[f64; 2]> = coords.chunks_exact(2).map(|p| [p[0], p[1]]).collect();
        Self::from_points(&points, scale)
    }

    fn scaled(mut coords: Vec<[f64; 2]>, scale: f64) -> Result<Self, ShapeError> {
        if scale <= 0.0 || !scale.is_finite() {
            return Err(ShapeError::InvalidShapeArgument("scale must be positive"));
        }
        for p in &mut coords {
            p[0] *= scale;
            p[1] *= scale;
        }
        Ok(VehicleShape { coords })
    }

    /// The body-frame outline vertices.
    pub fn outline(&self) -> &[[f64; 2]] {
        &self.coords
    }

    /// The outline rotated and translated to match a pose.
    pub fn placed_at(&self, pose: &Pose) -> Vec<[f64; 2]> {
        let (sin_t, cos_t) = pose.theta.sin_cos();
        self.coords
            .iter()
            .map(|[px, py]| {
                [
                    pose.x + px * cos_t - py * sin_t,
                    pose.y + px * sin_t + py * cos_t,
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_preset_car_outline() {
        let shape = VehicleShape::preset("car", 1.0).unwrap();
        assert_eq!(shape.outline().len(), 5);
        // nose of the car: (w - c, 0) = (0.5, 0)
        assert_eq!(shape.outline()[2], [0.5, 0.0]);
    }

    #[test]
    fn test_preset_scaling() {
        let shape = VehicleShape::preset("box", 2.0).unwrap();
        assert_eq!(shape.outline()[0], [-1.0, 0.6]);
    }

    #[test]
    fn test_unknown_preset_name() {
        let result = VehicleShape::preset("hovercraft", 1.0);
        assert_eq!(
            result,
            Err(ShapeError::UnknownShape("hovercraft".to_string()))
        );
    }

    #[test]
    fn test_explicit_points() {
        let octagon: Vec<[f64; 2]> = (0..8)
            .map(|i| {
                let a = 2.0 * PI * f64::from(i) / 8.0;
                [20.0 * a.cos(), 20.0 * a.sin()]
            })
            .collect();
        let shape = VehicleShape::from_points(&octagon, 1.0).unwrap();
        assert_eq!(shape.outline().len(), 8);
    }

    #[test]
    fn test_invalid_point_arguments() {
        assert!(matches!(
            VehicleShape::from_points(&[[0.0, 0.0], [1.0, 0.0]], 1.0),
            Err(ShapeError::InvalidShapeArgument(_))
        ));
        assert!(matches!(
            VehicleShape::from_points(&[[0.0, 0.0], [1.0, f64::NAN], [0.0, 1.0]], 1.0),
            Err(ShapeError::InvalidShapeArgument(_))
        ));
        assert!(matches!(
            VehicleShape::preset("car", 0.0),
            Err(ShapeError::InvalidShapeArgument(_))
        ));
    }

    #[test]
    fn test_flat_data_must_be_nx2() {
        let result = VehicleShape::from_flat(&[0.0, 0.0, 1.0, 0.0, 0.5], 1.0);
        assert!(matches!(result, Err(ShapeError::InvalidShapeArgument(_))));

        let ok = VehicleShape::from_flat(&[0.0, 0.0, 1.0, 0.0, 0.5, 1.0], 1.0).unwrap();
        assert_eq!(ok.outline().len(), 3);
    }

    #[test]
    fn test_placed_at_rotates_and_translates() {
        let shape = VehicleShape::from_points(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]], 1.0).unwrap();
        let placed = shape.placed_at(&Pose::new(10.0, 5.0, PI / 2.0));
        // (1, 0) rotated 90 deg is (0, 1), then translated
        assert!((placed[0][0] - 10.0).abs() < EPSILON);
        assert!((placed[0][1] - 6.0).abs() < EPSILON);
        // (0, 1) rotated 90 deg is (-1, 0)
        assert!((placed[1][0] - 9.0).abs() < EPSILON);
        assert!((placed[1][1] - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_shape_spec_resolution() {
        let preset = ShapeSpec::Preset("triangle".to_string());
        assert_eq!(preset.resolve(1.0).unwrap().outline().len(), 3);

        let points = ShapeSpec::Points(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert!(points.resolve(1.0).is_ok());

        let bad = ShapeSpec::Preset("blimp".to_string());
        assert!(matches!(bad.resolve(1.0), Err(ShapeError::UnknownShape(_))));
    }
}
