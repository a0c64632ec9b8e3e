pub mod input;
pub mod transcript;
