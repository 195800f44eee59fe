pub mod data;
pub mod lifecycle;
pub mod settings;
