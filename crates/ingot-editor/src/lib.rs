pub mod actions;
pub mod config;
pub mod input;
pub mod shortcuts;
pub mod status;
pub mod view;
pub mod workspace;

pub use actions::{Action, ActionError, ActionRegistry, Menu, MenuEntry, Shortcut};
pub use config::{ConfigError, ViewConfig};
pub use input::{InputEvent, Modifiers, PointerButton};
pub use shortcuts::{ShortcutMap, ViewAction};
pub use status::{StatusSink, StatusSnapshot};
pub use view::{SceneView, ViewResponse};
pub use workspace::{Tab, Workspace, WorkspaceCommand};
