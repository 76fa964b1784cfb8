//! Pointing devices and the per-frame ray query they drive.
pub mod desktop;
pub mod pointer;

pub use desktop::DesktopPointer;
pub use pointer::{
    PointerConnected, PointerDevice, PointerDisconnected, PointerHits, PointerRay, Tracked,
};
