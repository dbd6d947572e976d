//! Shared test utilities for the warehouse crates
//!
//! This crate provides reusable test infrastructure:
//! - `TestMongo`: MongoDB container with automatic cleanup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::TestMongo;
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let params = mongo.params();
//!     // Pass params to warehouse::connect_from_params
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;
