pub use crate::boundaries::BoundaryType;
pub use crate::config::{DirectionalityConfig, FoundationConfig, PlateConfig, SeedMode};
pub use crate::coverage::{CoverageSummary, QualityGate};
pub use crate::error::{ConfigError, GenerationError};
pub use crate::fields::TectonicFields;
pub use crate::generator::{PlateGeneration, generate};
pub use crate::grid::HexGrid;
pub use crate::plate::Plate;
pub use crate::rng::{EngineRng, HostRng, OpaqueRng};
pub use crate::seed::SeedSnapshot;
