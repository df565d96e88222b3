pub mod browse;
pub mod metadata;
