//! Integration test suite.
//!
//! Every test here talks to a live PostgreSQL instance and is marked
//! `#[ignore]`. Point the suite at a database with config/test.toml or
//! `ARTSHUB__DATABASE__URL`, then run:
//!
//! ```text
//! cargo test --test integration -- --ignored
//! ```

mod helpers;

mod availability_test;
mod booking_test;
mod catalog_test;
