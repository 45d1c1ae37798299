//! # knowledge-base
//!
//! Resource-key catalog and entity resolution for the bot. The catalog maps
//! stable resource keys (`menu.language`) to entity ids and is read from YAML
//! at startup; the [`kbot_core::EntityResolver`] trait is the seam behind
//! which the real entity backend lives. [`InMemoryResolver`] is the shipped
//! implementation, seedable from a YAML entity list.

mod catalog;
mod resolver;

pub use catalog::ResourceCatalog;
pub use resolver::InMemoryResolver;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, KbError>;
