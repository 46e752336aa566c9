//! Shared test fixtures for RosterForge crates.
//!
//! This crate provides data builders only. It does NOT depend on the rule or
//! scoring crates, so any of them can use it as a dev-dependency.
//!
//! - [`roster`] - assignment builders on whole hours
//! - [`store`] - a standard store with its role catalogue
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```
//!
//! ```
//! use rosterforge_test::roster::{hourly_run, at};
//!
//! let day = hourly_run("ana", 9, &["REGISTER", "REGISTER", "PRODUCT"]);
//! assert_eq!(day.len(), 3);
//! assert_eq!(day[2], at("ana", "PRODUCT", 11, 12));
//! ```

pub mod roster;
pub mod store;

pub use roster::{at, hourly_run};
pub use store::{standard_roles, standard_store};
