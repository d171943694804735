pub mod config;
pub mod diagnostics;
pub mod language;
pub mod passes;
pub mod pipeline;
pub mod query;
pub mod rules;
