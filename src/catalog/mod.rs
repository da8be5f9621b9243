//! Reference instances with known optimal costs.
//!
//! The embedded catalog is compiled into the binary and checked by `build.rs`. Each
//! entry holds an instance (a cost matrix or a point set) and the cost of its
//! minimum-weight perfect matching, so every solver can be verified against it.
//!
//! ## Example
//!
//! ```rust
//! use pair_solver::InstanceCatalog;
//!
//! let catalog = InstanceCatalog::load_embedded().unwrap();
//! let entry = catalog.get("four_vertex").unwrap();
//! assert_eq!(entry.expected_cost, 5.0);
//! assert_eq!(entry.instance().unwrap().vertex_count(), 4);
//! ```
//!
//! Custom catalogs use the same layout and load with
//! [`InstanceCatalog::load_from_file`](store::InstanceCatalog::load_from_file).

pub mod store;
