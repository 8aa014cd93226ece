pub mod camera;
pub mod id;
pub mod model;
pub mod scene;

pub use camera::{Camera, KEY_STEP, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
pub use id::DrawableId;
pub use model::*;
pub use scene::{ObserverHandle, SceneEvent, SceneRegistry};

// Re-export kurbo geometry so downstream crates share one version.
pub use kurbo::{Affine, Point, Rect, Size, Vec2};
