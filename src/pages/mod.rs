pub mod components;
pub mod error;
pub mod layout;
pub mod not_found;
pub mod server_error;

pub use error::*;
pub use not_found::*;
pub use server_error::*;
