//! Output module for scrape results
//!
//! Products are written as a flat CSV file with the fixed header
//! `title,description,price,rating`.

mod csv_writer;

pub use csv_writer::{write_products, write_products_csv, CSV_HEADER};
