pub mod client;
pub mod enrich;
pub mod error;
pub mod hours;
pub mod types;

pub use client::PlacesClient;
pub use enrich::{enrich, Enrichment};
pub use error::PlacesError;
pub use hours::next_close;
pub use types::{DetailsResponse, OpeningHours, OpeningPeriod, PeriodEvent, PlaceDetails};
