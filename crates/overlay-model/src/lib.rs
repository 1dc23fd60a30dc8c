//! Burnin Overlay Model
//!
//! Defines the data contracts the overlay compiler works on:
//! - **Components:** timed visual elements (rectangle, circle, text, picture, line)
//!   as a closed tagged union with typed, defaulted styles
//! - **Windows:** visibility intervals resolved from flat timestamp lists
//! - **Jobs:** the loosely-typed JSON document produced by the editor, and its
//!   normalization into typed components
//!
//! All geometry is in video pixel space with the origin at the top-left.
//! Values may be negative or exceed the frame; the renderer clips.

pub mod color;
pub mod component;
pub mod job;
pub mod window;

pub use color::*;
pub use component::*;
pub use job::*;
pub use window::*;
