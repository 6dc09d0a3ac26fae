//! Client for the chemical-equipment analysis service: authenticated CSV
//! upload, dashboard models built from the returned summary, and a rolling
//! upload history with PDF report downloads.
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
