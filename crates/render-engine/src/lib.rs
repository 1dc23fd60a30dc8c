//! Burnin Render Engine
//!
//! Compiles typed overlay components into an ffmpeg filter program and
//! runs it against a source video.
//!
//! # Pipeline
//!
//! ```text
//! components ──► resolve windows ──► synthesize (per variant)
//!                                           │
//!                                           ▼
//!                                  assemble RenderProgram
//!                                           │
//!                  source.mp4 ──────────────┤
//!                                           ▼
//!                                  ffmpeg (time budget)
//!                                           │
//!                                           ▼
//!                            RenderOutcome: Success | Failure
//! ```

pub mod compositor;
pub mod export;
pub mod filter;
pub mod probe;

pub use compositor::{assemble, compile, compile_components, synthesize, CompiledComponent};
pub use export::*;
pub use filter::{BoxStyle, Instruction, PixelRect, RenderProgram, TextX};
pub use probe::{command_available, probe_media, MediaInfo};
