pub mod divisions;
pub mod settings;
