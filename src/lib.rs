pub mod config;
pub mod error;
pub mod pages;
pub mod properties;
pub mod server;
#[cfg(test)]
pub mod tests;

pub use error::{Error, ErrorType, RenderError};
pub use properties::SlugProperties;
