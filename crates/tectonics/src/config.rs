use crate::constants::*;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where the plate layout seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// Derive the seed from the host RNG's current state.
    #[default]
    Engine,
    /// Use `fixed_seed` verbatim.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    pub count: usize,
    /// Lloyd iterations used to smooth plate seed placement.
    pub relaxation_steps: usize,
    /// Recorded in the seed snapshot; the boundary physics does not read it.
    pub convergence_mix: f32,
    pub plate_rotation_multiple: f32,
    pub seed_mode: SeedMode,
    pub fixed_seed: Option<i64>,
    pub seed_offset: i64,
    pub directionality: Option<DirectionalityConfig>,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            count: 8,
            relaxation_steps: 5,
            convergence_mix: 0.5,
            plate_rotation_multiple: 1.0,
            seed_mode: SeedMode::Engine,
            fixed_seed: None,
            seed_offset: 0,
            directionality: None,
        }
    }
}

impl PlateConfig {
    /// Clamp every numeric field into its supported range.
    ///
    /// Out-of-range values never fail generation; they are pulled back to the nearest limit.
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();
        cfg.count = cfg.count.clamp(MIN_PLATE_COUNT, MAX_PLATE_COUNT);
        cfg.relaxation_steps = cfg.relaxation_steps.min(MAX_RELAXATION_STEPS);
        cfg.convergence_mix = finite_or(cfg.convergence_mix, 0.5).clamp(0.0, 1.0);
        cfg.plate_rotation_multiple =
            finite_or(cfg.plate_rotation_multiple, 1.0).clamp(0.0, MAX_ROTATION_MULTIPLE);
        cfg.directionality = cfg.directionality.map(|d| d.sanitized());
        cfg
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalityConfig {
    /// 0 = plates keep their own heading, 1 = fully aligned with `plate_axis_deg`.
    pub cohesion: f32,
    pub primary_axes: PrimaryAxes,
    pub variability: Variability,
}

impl DirectionalityConfig {
    pub fn sanitized(&self) -> Self {
        let mut cfg = self.clone();
        cfg.cohesion = finite_or(cfg.cohesion, 0.0).clamp(0.0, 1.0);
        cfg.primary_axes.plate_axis_deg = finite_or(cfg.primary_axes.plate_axis_deg, 0.0).trunc();
        cfg.variability.angle_jitter_deg = cfg.variability.angle_jitter_deg.max(0);
        cfg.variability.magnitude_variance =
            finite_or(cfg.variability.magnitude_variance, DEFAULT_MAGNITUDE_VARIANCE);
        cfg
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryAxes {
    /// Global plate movement axis in degrees.
    pub plate_axis_deg: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variability {
    pub angle_jitter_deg: i32,
    pub magnitude_variance: f32,
}

impl Default for Variability {
    fn default() -> Self {
        Self {
            angle_jitter_deg: 0,
            magnitude_variance: DEFAULT_MAGNITUDE_VARIANCE,
        }
    }
}

/// Top-level config file layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FoundationConfig {
    pub plates: PlateConfig,
}

impl FoundationConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: FoundationConfig = toml::from_str(content)?;
        config.plates = config.plates.sanitized();
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = FoundationConfig::from_toml("").unwrap();
        assert_eq!(cfg.plates, PlateConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let cfg = FoundationConfig::from_toml(
            r#"
            [plates]
            count = 12
            seed_mode = "fixed"
            fixed_seed = 1234

            [plates.directionality]
            cohesion = 0.7

            [plates.directionality.primary_axes]
            plate_axis_deg = 45.8
            "#,
        )
        .unwrap();

        assert_eq!(cfg.plates.count, 12);
        assert_eq!(cfg.plates.seed_mode, SeedMode::Fixed);
        assert_eq!(cfg.plates.fixed_seed, Some(1234));
        assert_eq!(cfg.plates.relaxation_steps, 5);

        let dir = cfg.plates.directionality.unwrap();
        assert_eq!(dir.cohesion, 0.7);
        assert_eq!(dir.primary_axes.plate_axis_deg, 45.0);
        assert_eq!(dir.variability.magnitude_variance, DEFAULT_MAGNITUDE_VARIANCE);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = PlateConfig {
            count: 100,
            relaxation_steps: 500,
            convergence_mix: 3.0,
            plate_rotation_multiple: -1.0,
            directionality: Some(DirectionalityConfig {
                cohesion: 2.5,
                ..Default::default()
            }),
            ..Default::default()
        }
        .sanitized();

        assert_eq!(cfg.count, MAX_PLATE_COUNT);
        assert_eq!(cfg.relaxation_steps, MAX_RELAXATION_STEPS);
        assert_eq!(cfg.convergence_mix, 1.0);
        assert_eq!(cfg.plate_rotation_multiple, 0.0);
        assert_eq!(cfg.directionality.unwrap().cohesion, 1.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = FoundationConfig::from_toml("[plates]\ncount = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn roundtrips_through_file() {
        let path = std::env::temp_dir().join(format!("tectonics-config-{}.toml", std::process::id()));
        let mut cfg = FoundationConfig::default();
        cfg.plates.count = 5;
        cfg.plates.seed_offset = -3;
        cfg.save_to_file(&path).unwrap();

        let loaded = FoundationConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, cfg);
    }
}
