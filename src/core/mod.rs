pub mod aggregate;
pub mod directory;
pub mod distance;
pub mod engine;
pub mod filter;
pub mod normalize;
pub mod rank;
pub mod summary;

pub use crate::domain::model::{Coordinates, FilteredAgency, JoinRow, NearbyAgency};
pub use crate::domain::ports::{Geocoder, RowSource};
pub use crate::utils::error::Result;
pub use directory::{find_agency, list_agencies};
pub use engine::{resolve_filtered, resolve_nearby, EngineProfile, ResolutionEngine};
pub use summary::summarize;
