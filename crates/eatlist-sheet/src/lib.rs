pub mod client;
pub mod csv;
pub mod error;
pub mod rows;

pub use client::SheetClient;
pub use csv::parse_csv;
pub use error::SheetError;
pub use rows::{map_row, HeaderMap};
