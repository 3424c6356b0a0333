//! A floating-pane window manager for remote development workspaces.
//!
//! The library is pure interaction and layout logic: it arranges opaque
//! content panes (a remote shell, an editor, an assistant) inside a single
//! rendering surface, handling drag, resize, stacking, snap-assist, and
//! synchronized minimize/restore animations against a dock of icons.
//!
//! What a pane renders is somebody else's problem — content is resolved
//! through [`content::ContentRegistry`] and treated as an opaque provider.
//! All shared state lives in [`registry::WindowRegistry`]; controllers keep
//! only transient per-gesture accumulators and commit atomically on release.

pub mod animate;
pub mod broadcast;
pub mod chrome;
pub mod config;
pub mod constants;
pub mod content;
pub mod dock;
pub mod geometry;
pub mod gesture;
pub mod registry;
pub mod surface;
pub mod theme;
pub mod tracing_sub;

pub use animate::AnimationCoordinator;
pub use config::{ConfigError, WmConfig};
pub use content::{ContentKind, ContentProvider, ContentRegistry};
pub use dock::{Dock, DockAction, DockEntry, DockSlot};
pub use geometry::{SurfacePoint, SurfaceRect};
pub use gesture::drag::DragController;
pub use gesture::resize::{ResizeController, ResizeEdge};
pub use gesture::snap::{SnapEngine, SnapPreview, SnapZone, SnapZoneId};
pub use registry::{OpenRequest, Window, WindowId, WindowRegistry};
pub use surface::{FixedSurface, SurfaceMetrics};
