//! Downstream of selection: opening-hook enforcement and presentation
//! metadata for every clip that will be exported.

pub mod config;
pub mod hook_enforcer;
pub mod packager;

pub use config::{HookConfig, PackagingConfig};
pub use hook_enforcer::{enforce_hook, enforce_hooks};
pub use packager::{derive_headline, package_clip, package_clips, select_cta};
