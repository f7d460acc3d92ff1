//! # Core Module
//!
//! Shared configuration used by every subsystem.

pub mod config;

pub use config::{
    AuthoringConfig,
    CollisionConfig,
    Config,
    ConfigError,
    DecompositionConfig,
    EngineSettings,
    ResolverConfig,
    StoreConfig,
};
