// Domain layer - Core types with no I/O
pub mod campus;
pub mod dashboard;
pub mod insight;
pub mod telemetry;
