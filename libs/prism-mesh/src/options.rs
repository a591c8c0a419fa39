//! # Mesher Options
//!
//! Public configuration surface of the mesher. Defaults come from
//! `config::constants`; `validate()` rejects bad values before any geometry
//! work begins.

use crate::error::{MeshError, MeshResult};
use config::constants::{
    DEFAULT_EPSILON, DEFAULT_MIN_CAP_QUAD_QUALITY, DEFAULT_OUTPUT_REJECTED_CAP_TRIANGLES,
    DEFAULT_TARGET_EDGE_LENGTH_XY, DEFAULT_TARGET_EDGE_LENGTH_Z, MAX_REFINEMENT_BAND,
    MAX_TARGET_EDGE_LENGTH, MIN_TARGET_EDGE_LENGTH,
};
use serde::{Deserialize, Serialize};

/// A finer target edge length applied within `band` of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Refinement {
    /// Must not exceed the base XY target length.
    pub target_edge_length: f64,
    /// Planar distance from the feature within which the finer length applies.
    pub band: f64,
}

impl Refinement {
    pub fn new(target_edge_length: f64, band: f64) -> Self {
        Self {
            target_edge_length,
            band,
        }
    }
}

/// Parameters for meshing a prism structure.
///
/// # Example
///
/// ```rust
/// use prism_mesh::options::{MesherOptions, Refinement};
///
/// let options = MesherOptions {
///     target_edge_length_xy: 0.5,
///     near_hole: Some(Refinement::new(0.25, 1.0)),
///     ..Default::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MesherOptions {
    /// Target edge length in the XY plane
    pub target_edge_length_xy: f64,
    /// Target spacing between Z-levels
    pub target_edge_length_z: f64,
    /// Emit the cap at `base_z`
    pub generate_bottom_cap: bool,
    /// Emit the cap at `top_z`
    pub generate_top_cap: bool,
    /// Z-level boundary tolerance and default vertex-merge tolerance
    pub epsilon: f64,
    /// Finer length near hole boundaries
    pub near_hole: Option<Refinement>,
    /// Finer length near projected auxiliary segments
    pub near_segment: Option<Refinement>,
    /// Paired cap quads scoring below this stay triangles
    pub min_cap_quad_quality: f64,
    /// Emit unpaired cap triangles as triangles rather than degenerate quads
    pub output_rejected_cap_triangles: bool,
}

impl Default for MesherOptions {
    fn default() -> Self {
        Self {
            target_edge_length_xy: DEFAULT_TARGET_EDGE_LENGTH_XY,
            target_edge_length_z: DEFAULT_TARGET_EDGE_LENGTH_Z,
            generate_bottom_cap: true,
            generate_top_cap: true,
            epsilon: DEFAULT_EPSILON,
            near_hole: None,
            near_segment: None,
            min_cap_quad_quality: DEFAULT_MIN_CAP_QUAD_QUALITY,
            output_rejected_cap_triangles: DEFAULT_OUTPUT_REJECTED_CAP_TRIANGLES,
        }
    }
}

impl MesherOptions {
    /// Checks every field against its documented constraint.
    ///
    /// The first violation is returned, naming the field.
    pub fn validate(&self) -> MeshResult<()> {
        check_length("target_edge_length_xy", self.target_edge_length_xy)?;
        check_length("target_edge_length_z", self.target_edge_length_z)?;

        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(MeshError::invalid_option(
                "epsilon",
                format!("must be finite and positive, got {}", self.epsilon),
            ));
        }

        if !(0.0..=1.0).contains(&self.min_cap_quad_quality) {
            return Err(MeshError::invalid_option(
                "min_cap_quad_quality",
                format!("must lie in [0, 1], got {}", self.min_cap_quad_quality),
            ));
        }

        if let Some(refinement) = &self.near_hole {
            self.check_refinement(
                "near_hole.target_edge_length",
                "near_hole.band",
                refinement,
            )?;
        }
        if let Some(refinement) = &self.near_segment {
            self.check_refinement(
                "near_segment.target_edge_length",
                "near_segment.band",
                refinement,
            )?;
        }
        Ok(())
    }

    fn check_refinement(
        &self,
        length_field: &'static str,
        band_field: &'static str,
        refinement: &Refinement,
    ) -> MeshResult<()> {
        check_length(length_field, refinement.target_edge_length)?;
        if refinement.target_edge_length > self.target_edge_length_xy {
            return Err(MeshError::invalid_option(
                length_field,
                format!(
                    "refined length {} exceeds target_edge_length_xy {}",
                    refinement.target_edge_length, self.target_edge_length_xy
                ),
            ));
        }
        if !refinement.band.is_finite()
            || refinement.band < 0.0
            || refinement.band > MAX_REFINEMENT_BAND
        {
            return Err(MeshError::invalid_option(
                band_field,
                format!(
                    "must be finite and in [0, {MAX_REFINEMENT_BAND}], got {}",
                    refinement.band
                ),
            ));
        }
        Ok(())
    }
}

fn check_length(field: &'static str, value: f64) -> MeshResult<()> {
    if !value.is_finite() || !(MIN_TARGET_EDGE_LENGTH..=MAX_TARGET_EDGE_LENGTH).contains(&value) {
        return Err(MeshError::invalid_option(
            field,
            format!(
                "must be finite and in [{MIN_TARGET_EDGE_LENGTH}, {MAX_TARGET_EDGE_LENGTH}], got {value}"
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_field(options: &MesherOptions) -> &'static str {
        match options.validate() {
            Err(MeshError::InvalidOption { field, .. }) => field,
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(MesherOptions::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_lengths_rejected() {
        let options = MesherOptions {
            target_edge_length_xy: 0.0,
            ..Default::default()
        };
        assert_eq!(rejected_field(&options), "target_edge_length_xy");

        let options = MesherOptions {
            target_edge_length_z: f64::NAN,
            ..Default::default()
        };
        assert_eq!(rejected_field(&options), "target_edge_length_z");
    }

    #[test]
    fn test_huge_length_rejected() {
        let options = MesherOptions {
            target_edge_length_xy: 1e300,
            ..Default::default()
        };
        assert_eq!(rejected_field(&options), "target_edge_length_xy");
    }

    #[test]
    fn test_epsilon_rejected() {
        for epsilon in [0.0, -1.0, f64::INFINITY] {
            let options = MesherOptions {
                epsilon,
                ..Default::default()
            };
            assert_eq!(rejected_field(&options), "epsilon");
        }
    }

    #[test]
    fn test_quality_out_of_range_rejected() {
        let options = MesherOptions {
            min_cap_quad_quality: 1.5,
            ..Default::default()
        };
        assert_eq!(rejected_field(&options), "min_cap_quad_quality");
    }

    #[test]
    fn test_refined_length_above_base_rejected() {
        let options = MesherOptions {
            target_edge_length_xy: 1.0,
            near_hole: Some(Refinement::new(2.0, 1.0)),
            ..Default::default()
        };
        assert_eq!(rejected_field(&options), "near_hole.target_edge_length");
    }

    #[test]
    fn test_negative_band_rejected() {
        let options = MesherOptions {
            near_segment: Some(Refinement::new(0.5, -0.1)),
            ..Default::default()
        };
        assert_eq!(rejected_field(&options), "near_segment.band");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "target_edge_length_xy": 0.5, "near_hole": { "target_edge_length": 0.25, "band": 1.0 } }"#;
        let options: MesherOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.target_edge_length_xy, 0.5);
        assert_eq!(options.target_edge_length_z, DEFAULT_TARGET_EDGE_LENGTH_Z);
        assert_eq!(options.near_hole, Some(Refinement::new(0.25, 1.0)));
        assert!(options.generate_top_cap);
        assert!(options.validate().is_ok());
    }
}
