pub mod display_list;
pub mod paint;
pub mod pipeline;
pub mod surface;
pub mod svg;
pub mod vello_surface;

pub use display_list::{DisplayList, DrawOp, Recorded};
pub use paint::Paintable;
pub use pipeline::{CanvasTheme, ViewFrame, render_view};
pub use surface::{RadialGradient, Surface};
pub use svg::SvgSurface;
pub use vello_surface::VelloSurface;
