pub mod analyze;
pub mod dashboard;
pub mod health;
pub mod history;
pub mod metrics;
pub mod rugcheck;
