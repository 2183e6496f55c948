//! Display backend implementations.

pub mod memory;
#[cfg(feature = "sdl")]
pub mod sdl;

pub use memory::MemoryBackend;
#[cfg(feature = "sdl")]
pub use sdl::SdlBackend;
