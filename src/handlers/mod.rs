pub mod bucket_handlers;
pub mod caller;
pub mod health_handlers;
