//! Integration tests for the scrape pipeline

mod scrape_tests;
