// Presentation layer - HTTP routing, handlers and static site serving
pub mod app_state;
pub mod handlers;
pub mod router;
pub mod static_site;
