mod config;
mod error;
mod pin;
mod registry;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use pin::{Pin, PinAlias, PinHandle};
pub use registry::Registry;
