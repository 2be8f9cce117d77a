//! Application core: port traits and outbound events.
//!
//! The trigger coordinator and the phase bodies reach hardware only
//! through the traits in [`ports`], so the whole edge → trigger → cycle
//! path runs on the host against in-memory adapters.

pub mod events;
pub mod ports;
