pub mod catalog;
pub mod editor;
pub mod error;
pub mod request;
pub mod settings;

#[cfg(test)]
mod serde_tests;
