//! Block ids, faces, and the block property registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{BlockRegistry, RegistryError};
pub use types::{BlockFaces, BlockId, BlockProperties, Face, MaterialClass};
