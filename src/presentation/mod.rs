// Presentation layer - Chart, card and list models for the view
pub mod dashboard_view;
pub mod history_view;
