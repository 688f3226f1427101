//! Raw Memory Abstraction
//!
//! Word-level reads from the target address space:
//! - In-process reads via `InProcessMemory` when the probe is loaded into
//!   the target
//! - Flat memory image files via `ImageMemory` for offline analysis
//! - A sparse mock for testing

mod image;
mod in_process;
#[cfg(test)]
mod mock;
mod traits;

pub use image::ImageMemory;
pub use in_process::InProcessMemory;
#[cfg(test)]
pub use mock::MockMemory;
pub use traits::RawMemory;
