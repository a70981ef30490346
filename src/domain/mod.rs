// Domain layer - Dashboard documents and the web app environment
pub mod dashboard;
pub mod web_env;
