/// Application layer: pipeline execution services and the sync / deploy use cases
pub mod services;
pub mod use_cases;
