// Adapters layer: concrete implementations of the row source and geocoder ports.

pub mod csv_rows;
pub mod geocoder;

pub use csv_rows::CsvRowSource;
pub use geocoder::{GoogleGeocoder, NominatimGeocoder, StaticGeocoder};
