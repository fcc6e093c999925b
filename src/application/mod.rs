// Application layer - Use cases and scheduling
pub mod generative_model;
pub mod insight_service;
pub mod plan_service;
pub mod sample_generator;
pub mod telemetry_store;
pub mod view_coordinator;
