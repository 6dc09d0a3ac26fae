// Domain layer - Plain data types and pure rules
pub mod credentials;
pub mod csv_file;
pub mod history;
pub mod report;
pub mod summary;
