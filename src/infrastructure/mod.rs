// Infrastructure layer - Filesystem storage, configuration and HTTP plumbing
pub mod config;
pub mod file_repository;
pub mod http_response;
pub mod startup;
