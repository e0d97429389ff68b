pub mod app;
pub mod commands;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod output;
pub mod policy;
pub mod report;
pub mod rules;
pub mod runtime;
