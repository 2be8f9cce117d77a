//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements          | Connects to              |
//! |------------|---------------------|--------------------------|
//! | `hardware` | LinePort            | ESP32 GPIO               |
//! |            | DebounceTimerPort   | esp_timer one-shot       |
//! | `log_sink` | EventSink           | Serial log output        |

pub mod hardware;
pub mod log_sink;
