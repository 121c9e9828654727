//! umlgen Core Types
//!
//! This crate provides the plain data model shared by the umlgen rendering
//! pipeline. It performs no I/O. It includes:
//!
//! - **Jobs**: A diagram to render and where its artifacts go ([`job`] module)
//! - **Outcomes**: The per-job result reported back to the caller ([`outcome`] module)
//! - **Geometry**: Sizes and placement of an image on a page ([`geometry`] module)
//! - **Pages**: Standard page formats ([`page`] module)

pub mod geometry;
pub mod job;
pub mod outcome;
pub mod page;
