//! Inkpad Core Library
//!
//! Platform-agnostic ink capture: pointer tracking with midpoint smoothing,
//! stroke history, the stroke text format, and compositing onto a
//! host-provided raster surface.

pub mod canvas;
pub mod codec;
pub mod color;
pub mod compositor;
pub mod config;
pub mod curve;
pub mod engine;
pub mod export;
pub mod history;
pub mod input;
pub mod pointer;
pub mod storage;
pub mod stroke;
pub mod surface;

pub use canvas::CanvasState;
pub use codec::{Decoded, LineError, RejectedLine};
pub use color::Argb;
pub use compositor::Compositor;
pub use config::{ConfigError, EngineConfig};
pub use engine::{InkEngine, RestoreReport};
pub use history::History;
pub use input::PointerEvent;
pub use pointer::{MAX_POINTERS, MoveOutcome, PointerId, PointerTracker, TOUCH_TOLERANCE};
pub use storage::{MemoryStorage, SavedDrawing, Storage, StorageError, StorageResult};
pub use stroke::{Pen, Stroke};
pub use surface::{RasterSurface, SurfaceError, SurfaceResult};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
