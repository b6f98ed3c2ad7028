use glam::Vec3;

use crate::background::CaptionStyle;
use crate::constants::*;
use crate::error::{Result, RippleError};

#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    pub delta: f32,
    pub damping: f32,
    pub velocity_damping: f32,
    pub pointer_radius: f32,
    pub pointer_pressure_impulse: f32,
    pub pointer_velocity_ratio: f32,
    pub max_amplitude: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            delta: WAVE_DELTA,
            damping: PRESSURE_DAMPING,
            velocity_damping: VELOCITY_DAMPING,
            pointer_radius: POINTER_RADIUS,
            pointer_pressure_impulse: POINTER_PRESSURE_IMPULSE,
            pointer_velocity_ratio: POINTER_VELOCITY_RATIO,
            max_amplitude: MAX_AMPLITUDE,
        }
    }
}

impl SimParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.delta.is_finite() && self.delta > 0.0) {
            return Err(RippleError::InvalidParams(format!(
                "delta must be positive, got {}",
                self.delta
            )));
        }
        for (name, v) in [
            ("damping", self.damping),
            ("velocity_damping", self.velocity_damping),
        ] {
            if !(v > 0.0 && v <= 1.0) {
                return Err(RippleError::InvalidParams(format!(
                    "{name} must be in (0, 1], got {v}"
                )));
            }
        }
        if !(self.pointer_radius > 0.0) {
            return Err(RippleError::InvalidParams(format!(
                "pointer_radius must be positive, got {}",
                self.pointer_radius
            )));
        }
        if !(self.max_amplitude.is_finite() && self.max_amplitude > 0.0) {
            return Err(RippleError::InvalidParams(format!(
                "max_amplitude must be positive and finite, got {}",
                self.max_amplitude
            )));
        }
        Ok(())
    }

    /// Whether every spatial mode decays: the semi-implicit step stays bounded
    /// while `delta^2 * 8 <= 4` (the checkerboard mode has laplacian eigenvalue -8).
    pub fn is_stable(&self) -> bool {
        self.delta * self.delta * 8.0 <= 4.0
    }

    #[inline]
    pub fn pointer_velocity_impulse(&self) -> f32 {
        self.pointer_pressure_impulse * self.pointer_velocity_ratio
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompositeParams {
    pub refraction: f32,
    pub normal_steepness: f32,
    pub light_dir: Vec3,
    pub view_dir: Vec3,
    pub diffuse_scale: f32,
    pub ambient: f32,
    pub specular_power: f32,
    pub specular_scale: f32,
    pub tint: Vec3,
    pub tint_mix: f32,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            refraction: REFRACTION_STRENGTH,
            normal_steepness: NORMAL_STEEPNESS,
            light_dir: Vec3::from_array(LIGHT_DIR).normalize(),
            view_dir: Vec3::from_array(VIEW_DIR),
            diffuse_scale: DIFFUSE_SCALE,
            ambient: AMBIENT,
            specular_power: SPECULAR_POWER,
            specular_scale: SPECULAR_SCALE,
            tint: Vec3::from_array(TINT_COLOR),
            tint_mix: TINT_MIX,
        }
    }
}

impl CompositeParams {
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("refraction", self.refraction),
            ("normal_steepness", self.normal_steepness),
            ("diffuse_scale", self.diffuse_scale),
            ("ambient", self.ambient),
            ("specular_power", self.specular_power),
            ("specular_scale", self.specular_scale),
        ] {
            if !v.is_finite() {
                return Err(RippleError::InvalidParams(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        if !(self.view_dir.is_finite() && self.tint.is_finite()) {
            return Err(RippleError::InvalidParams(
                "view_dir and tint must be finite".into(),
            ));
        }
        if !self.light_dir.is_normalized() {
            return Err(RippleError::InvalidParams(
                "light_dir must be a unit vector".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.tint_mix) {
            return Err(RippleError::InvalidParams(format!(
                "tint_mix must be in [0, 1], got {}",
                self.tint_mix
            )));
        }
        Ok(())
    }
}

/// Everything the ripple surface needs to be configured.
#[derive(Clone, Debug, Default)]
pub struct RippleConfig {
    pub sim: SimParams,
    pub composite: CompositeParams,
    pub caption: CaptionStyle,
}

impl RippleConfig {
    pub fn validate(&self) -> Result<()> {
        self.sim.validate()?;
        self.composite.validate()?;
        self.caption.colors()?;
        if !self.sim.is_stable() {
            log::warn!(
                "[config] wave delta {} exceeds the stability limit; amplitudes are clamped to {}",
                self.sim.delta,
                self.sim.max_amplitude
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        RippleConfig::default().validate().unwrap();
        assert_eq!(SimParams::default().pointer_velocity_impulse(), 1.5);
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let p = SimParams {
            damping: 1.2,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(RippleError::InvalidParams(_))));
    }

    #[test]
    fn non_finite_composite_scalars_are_rejected() {
        let infinite_refraction = CompositeParams {
            refraction: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            infinite_refraction.validate(),
            Err(RippleError::InvalidParams(_))
        ));
        for p in [
            CompositeParams {
                normal_steepness: f32::NAN,
                ..Default::default()
            },
            CompositeParams {
                specular_power: f32::NEG_INFINITY,
                ..Default::default()
            },
        ] {
            assert!(p.validate().is_err());
        }
    }

    #[test]
    fn infinite_refraction_does_not_panic_the_compositor() {
        use crate::grid::{Cell, ColorGrid, GridSize, SimGrid};
        use glam::Vec4;

        let size = GridSize::new(4, 4);
        let mut sim = SimGrid::zeroed(size);
        sim.set(1, 1, Cell { grad_x: 1.0, grad_y: -1.0, ..Cell::ZERO });
        let bg = ColorGrid::filled(size, Vec4::ONE);
        let params = CompositeParams {
            refraction: f32::INFINITY,
            ..Default::default()
        };
        let out = crate::composite::composite(&sim, &bg, &params).unwrap();
        assert_eq!(out.size(), size);
    }

    #[test]
    fn default_wave_speed_is_past_the_stability_limit() {
        assert!(!SimParams::default().is_stable());
        let slow = SimParams {
            delta: 0.5,
            ..Default::default()
        };
        assert!(slow.is_stable());
    }
}
