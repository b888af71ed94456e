pub mod bucket_service;
pub mod id_generator;
pub mod usage;
