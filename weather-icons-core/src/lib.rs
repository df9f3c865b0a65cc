//! Core library for weather condition icons.
//!
//! This crate defines:
//! - Condition codes, time-of-day and art-style normalization
//! - The static icon tables and the resolver with its fallback chain
//! - Adapters for backend weather payloads and astronomy data
//! - Best-effort asset preloading
//! - Configuration handling
//!
//! It is used by `weather-icons-cli`, but can also be embedded by other binaries or services.

pub mod assets;
pub mod astro;
pub mod code;
pub mod config;
pub mod payload;
pub mod preload;
pub mod resolver;
pub mod table;

pub use code::{ConditionCode, TimeOfDay, Variation};
pub use config::Config;
pub use payload::{ConditionPayload, PayloadError};
pub use resolver::{
    IconRequest, IconResolver, ResolvedIcon, list_known_codes, resolve, supports_animation,
};
pub use table::{IconMapping, IconTable};
