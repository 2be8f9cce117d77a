//! luxphase firmware library.
//!
//! Exposes the trigger coordinator, phase bodies and sensor engine for
//! integration testing. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

// The espidf-gated driver code links against esp-idf-{svc,hal,sys}, which
// are only pulled in by the feature.
#[cfg(all(target_os = "espidf", not(feature = "espidf")))]
compile_error!("building for target_os = \"espidf\" requires `--features espidf`");

pub mod app;
pub mod config;
pub mod error;
pub mod phase;
pub mod pins;
pub mod sensors;
pub mod trigger;

// The drivers and adapters compile on every target; the hardware calls
// inside are cfg-gated to simulation stubs off-target.
pub mod adapters;
pub mod drivers;
