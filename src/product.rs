//! The scraped product record

use std::collections::BTreeMap;

/// One scraped listing
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product title, taken from the title node's `title` attribute
    pub title: String,

    /// Text content of the description node
    pub description: String,

    /// Listing price with the currency symbol stripped
    pub price: f64,

    /// Star rating, usually 1-5
    pub rating: u32,

    /// Configuration label -> price, filled only by the detail crawl
    pub additional_info: BTreeMap<String, f64>,
}

impl Product {
    /// Creates a product with no configuration prices
    pub fn new(title: impl Into<String>, description: impl Into<String>, price: f64, rating: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            rating,
            additional_info: BTreeMap::new(),
        }
    }

    /// Returns true if the detail crawl recorded at least one configuration price
    pub fn has_configurations(&self) -> bool {
        !self.additional_info.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_has_no_configurations() {
        let product = Product::new("Nokia 123", "Dual sim", 24.99, 3);
        assert_eq!(product.title, "Nokia 123");
        assert!(!product.has_configurations());
    }

    #[test]
    fn test_has_configurations() {
        let mut product = Product::new("Galaxy", "", 100.0, 5);
        product.additional_info.insert("128".to_string(), 120.0);
        assert!(product.has_configurations());
    }
}
