// Application layer - Use cases and the seams they depend on
pub mod analysis_repository;
pub mod credential_holder;
pub mod errors;
pub mod history_synchronizer;
pub mod refresh_signal;
pub mod session;
pub mod upload_orchestrator;

#[cfg(test)]
pub(crate) mod test_support;
