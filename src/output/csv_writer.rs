//! CSV serialization of scraped products

use crate::product::Product;
use crate::ScrapeError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Column header, in order
pub const CSV_HEADER: [&str; 4] = ["title", "description", "price", "rating"];

/// One CSV row; configuration prices are not part of the file
#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    title: &'a str,
    description: &'a str,
    price: f64,
    rating: u32,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            title: &product.title,
            description: &product.description,
            price: product.price,
            rating: product.rating,
        }
    }
}

/// Writes products to a CSV file, replacing any existing file
///
/// The header row is written even when `products` is empty.
///
/// # Arguments
///
/// * `path` - Destination file
/// * `products` - Rows to write, in order
///
/// # Returns
///
/// * `Ok(())` - File written and flushed
/// * `Err(ScrapeError)` - The file could not be created or written
pub fn write_products_csv(path: &Path, products: &[Product]) -> Result<(), ScrapeError> {
    let file = std::fs::File::create(path)?;
    write_products(file, products)
}

/// Writes the header and one row per product to any writer
pub fn write_products<W: Write>(writer: W, products: &[Product]) -> Result<(), ScrapeError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for product in products {
        csv_writer.serialize(ProductRow::from(product))?;
    }
    csv_writer.flush()?;

    Ok(())
}
