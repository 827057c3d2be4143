use log::{info, warn};
use std::path::Path;
use tectonics::prelude::*;

pub const CONFIG_FILE: &str = "foundation.toml";

/// Loads the foundation config, falling back to defaults when the file does not exist.
///
/// A file that exists but does not parse is still an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<FoundationConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("{} not found, using default plate config", path.display());
        return Ok(FoundationConfig::default());
    }
    FoundationConfig::load_from_file(path)
}

/// World foundation: plate layout and every tectonic field derived from it.
///
/// Empty until [`Foundation::init`] succeeds; all getters return `None` before that.
#[derive(Debug, Default)]
pub struct Foundation {
    width: u32,
    height: u32,
    generation: Option<PlateGeneration>,
}

impl Foundation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the foundation for a `width` × `height` map.
    ///
    /// Returns `Ok(false)` without touching anything when already initialised; call
    /// [`Foundation::reset`] first to regenerate.
    pub fn init<R: HostRng>(
        &mut self,
        width: u32,
        height: u32,
        config: &PlateConfig,
        rng: &mut R,
    ) -> Result<bool, GenerationError> {
        if self.is_initialized() {
            return Ok(false);
        }

        info!("initialising foundation {width}x{height}");
        let generation = generate(width, height, config, rng)?;
        self.width = width;
        self.height = height;
        self.generation = Some(generation);
        Ok(true)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_initialized(&self) -> bool {
        self.generation.is_some()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn fields(&self) -> Option<&TectonicFields> {
        self.generation.as_ref().map(|g| &g.fields)
    }

    pub fn plate_id(&self) -> Option<&[i16]> {
        self.fields().map(|f| f.plate_id.as_slice())
    }

    pub fn boundary_closeness(&self) -> Option<&[u8]> {
        self.fields().map(|f| f.boundary_closeness.as_slice())
    }

    pub fn boundary_type(&self) -> Option<&[BoundaryType]> {
        self.fields().map(|f| f.boundary_type.as_slice())
    }

    pub fn tectonic_stress(&self) -> Option<&[u8]> {
        self.fields().map(|f| f.tectonic_stress.as_slice())
    }

    pub fn uplift_potential(&self) -> Option<&[u8]> {
        self.fields().map(|f| f.uplift_potential.as_slice())
    }

    pub fn rift_potential(&self) -> Option<&[u8]> {
        self.fields().map(|f| f.rift_potential.as_slice())
    }

    pub fn shield_stability(&self) -> Option<&[u8]> {
        self.fields().map(|f| f.shield_stability.as_slice())
    }

    pub fn plate_movement_u(&self) -> Option<&[i8]> {
        self.fields().map(|f| f.plate_movement_u.as_slice())
    }

    pub fn plate_movement_v(&self) -> Option<&[i8]> {
        self.fields().map(|f| f.plate_movement_v.as_slice())
    }

    pub fn plate_rotation(&self) -> Option<&[i8]> {
        self.fields().map(|f| f.plate_rotation.as_slice())
    }

    pub fn plates(&self) -> Option<&[Plate]> {
        self.generation.as_ref().map(|g| g.plates.as_slice())
    }

    pub fn plate_seed(&self) -> Option<&SeedSnapshot> {
        self.generation.as_ref().map(|g| &g.seed)
    }

    pub fn coverage(&self) -> Option<&CoverageSummary> {
        self.generation.as_ref().map(|g| &g.coverage)
    }

    /// Index of the attempt preset that produced the current fields.
    pub fn attempt_index(&self) -> Option<usize> {
        self.generation.as_ref().map(|g| g.attempt_index)
    }
}
