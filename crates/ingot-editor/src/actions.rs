//! Action registry and menu building.
//!
//! Actions are named, optionally bound to a keyboard shortcut, and carry the
//! `WorkspaceCommand` they trigger. Menus are described in JSON, either as an
//! ordered list or as a `{ "Title": [items] }` object:
//!
//! ```json
//! [
//!   { "title": "View", "items": [
//!     { "id": "view.zoom_in", "name": "Zoom In", "shortcut": "Ctrl++", "command": "zoom_in" },
//!     { "separator": true },
//!     { "id": "view.toggle_scope", "name": "Toggle Scope", "shortcut": "Ctrl+T",
//!       "command": "toggle_scope" }
//!   ]}
//! ]
//! ```
//!
//! The object form is ordered by title; use the list form to control order.

use crate::input::Modifiers;
use crate::workspace::WorkspaceCommand;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid shortcut '{shortcut}': {reason}")]
    InvalidShortcut { shortcut: String, reason: String },

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action '{0}' has no command")]
    NoCommand(String),
}

// ─── Shortcuts ───────────────────────────────────────────────────────────

/// A key plus modifiers, parsed from strings like `"Ctrl+Shift+T"` or
/// `"Ctrl++"`. Letter keys compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub key: String,
    pub modifiers: Modifiers,
}

impl Shortcut {
    pub fn parse(s: &str) -> Result<Self, ActionError> {
        let invalid = |reason: &str| ActionError::InvalidShortcut {
            shortcut: s.to_string(),
            reason: reason.to_string(),
        };

        // A trailing "++" means the key itself is '+'.
        let (mods, key) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            match s.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", s),
            }
        };
        if key.is_empty() {
            return Err(invalid("missing key"));
        }

        let mut modifiers = Modifiers::NONE;
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                _ => return Err(invalid(&format!("unknown modifier '{part}'"))),
            }
        }
        Ok(Self {
            key: normalize_key(key),
            modifiers,
        })
    }

    /// Shortcut for a key event, as delivered by the input layer.
    pub fn from_key(key: &str, modifiers: Modifiers) -> Self {
        Self {
            key: normalize_key(key),
            modifiers,
        }
    }

    /// Whether a pressed key combination triggers this shortcut.
    ///
    /// Symbol keys such as `+` are typed with Shift on most layouts, so
    /// Shift is not compared for single-character keys that are not letters.
    pub fn matches(&self, pressed: &Shortcut) -> bool {
        if self.key != pressed.key {
            return false;
        }
        let (mut a, mut b) = (self.modifiers, pressed.modifiers);
        if is_symbol_key(&self.key) {
            a.shift = false;
            b.shift = false;
        }
        a == b
    }
}

fn is_symbol_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_alphabetic())
}

fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_ascii_uppercase()
    } else {
        key.to_string()
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        let names = [
            (m.ctrl, "Ctrl"),
            (m.alt, "Alt"),
            (m.shift, "Shift"),
            (m.meta, "Meta"),
        ];
        for (on, name) in names {
            if on {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

// ─── Actions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub name: String,
    pub shortcut: Option<Shortcut>,
    pub command: Option<WorkspaceCommand>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shortcut: None,
            command: None,
        }
    }

    pub fn with_shortcut(mut self, shortcut: &str) -> Result<Self, ActionError> {
        self.shortcut = Some(Shortcut::parse(shortcut)?);
        Ok(self)
    }

    pub fn with_command(mut self, command: WorkspaceCommand) -> Self {
        self.command = Some(command);
        self
    }
}

// ─── Menus ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ItemSpec {
    Separator {
        separator: bool,
    },
    Entry {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: String,
        #[serde(default)]
        shortcut: Option<String>,
        #[serde(default)]
        command: Option<WorkspaceCommand>,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct SectionSpec {
    title: String,
    items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MenuSpec {
    List(Vec<SectionSpec>),
    Map(BTreeMap<String, Vec<ItemSpec>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Separator,
    /// `id` is `None` for entries the description left unnamed; those are
    /// not registered.
    Action { id: Option<String>, action: Action },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

// ─── Registry ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the standard view and file actions.
    pub fn with_defaults() -> Self {
        let mut reg = Self::new();
        let defaults = [
            ("view.zoom_in", "Zoom In", "Ctrl++", WorkspaceCommand::ZoomIn),
            ("view.zoom_out", "Zoom Out", "Ctrl+-", WorkspaceCommand::ZoomOut),
            ("view.reset_zoom", "Reset Zoom", "Ctrl+0", WorkspaceCommand::ResetZoom),
            ("view.toggle_scope", "Toggle Scope", "Ctrl+T", WorkspaceCommand::ToggleScope),
            ("file.new_tab", "New Tab", "Ctrl+N", WorkspaceCommand::NewTab),
        ];
        for (id, name, shortcut, command) in defaults {
            let action = Action {
                name: name.to_string(),
                shortcut: Shortcut::parse(shortcut).ok(),
                command: Some(command),
            };
            reg.register(id, action);
        }
        reg
    }

    /// Register `action` under `id`, replacing any previous one.
    pub fn register(&mut self, id: impl Into<String>, action: Action) {
        let id = id.into();
        if self.actions.insert(id.clone(), action).is_some() {
            log::debug!("actions: replaced {id}");
        }
    }

    pub fn get(&self, id: &str) -> Option<&Action> {
        self.actions.get(id)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// The command bound to action `id`.
    pub fn command_for(&self, id: &str) -> Result<WorkspaceCommand, ActionError> {
        let action = self
            .get(id)
            .ok_or_else(|| ActionError::UnknownAction(id.to_string()))?;
        action
            .command
            .clone()
            .ok_or_else(|| ActionError::NoCommand(id.to_string()))
    }

    /// Find the action bound to a shortcut string such as `"Ctrl+T"`.
    pub fn resolve_shortcut(
        &self,
        shortcut: &str,
    ) -> Result<Option<(&str, &Action)>, ActionError> {
        let wanted = Shortcut::parse(shortcut)?;
        Ok(self.find(&wanted))
    }

    /// Find the action bound to a key event.
    pub fn resolve_key(&self, key: &str, modifiers: Modifiers) -> Option<(&str, &Action)> {
        self.find(&Shortcut::from_key(key, modifiers))
    }

    fn find(&self, wanted: &Shortcut) -> Option<(&str, &Action)> {
        self.actions
            .iter()
            .find(|(_, a)| a.shortcut.as_ref().is_some_and(|s| s.matches(wanted)))
            .map(|(id, a)| (id.as_str(), a))
    }

    /// Build menus from a JSON description, registering every entry that
    /// has an id. The whole description is checked before anything is
    /// registered; on error the registry is unchanged.
    pub fn build_menus(&mut self, json: &str) -> Result<Vec<Menu>, ActionError> {
        let spec: MenuSpec = serde_json::from_str(json)?;
        let sections: Vec<(String, Vec<ItemSpec>)> = match spec {
            MenuSpec::List(list) => list.into_iter().map(|s| (s.title, s.items)).collect(),
            MenuSpec::Map(map) => map.into_iter().collect(),
        };

        let mut pending = Vec::new();
        let mut menus = Vec::with_capacity(sections.len());
        for (title, items) in sections {
            let mut entries = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    ItemSpec::Separator { separator: true } => entries.push(MenuEntry::Separator),
                    ItemSpec::Separator { separator: false } => {
                        log::trace!("actions: ignoring `separator: false` in {title}");
                    }
                    ItemSpec::Entry {
                        id,
                        name,
                        shortcut,
                        command,
                    } => {
                        let mut action = Action::new(name);
                        if let Some(s) = shortcut.as_deref().filter(|s| !s.is_empty()) {
                            action = action.with_shortcut(s)?;
                        }
                        action.command = command;
                        if let Some(id) = &id {
                            pending.push((id.clone(), action.clone()));
                        }
                        entries.push(MenuEntry::Action { id, action });
                    }
                }
            }
            log::debug!("actions: built menu {title:?} with {} entries", entries.len());
            menus.push(Menu { title, entries });
        }
        for (id, action) in pending {
            self.register(id, action);
        }
        Ok(menus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_shortcuts() {
        let s = Shortcut::parse("Ctrl+T").unwrap();
        assert_eq!(s.key, "T");
        assert!(s.modifiers.ctrl && !s.modifiers.shift);

        let plus = Shortcut::parse("Ctrl++").unwrap();
        assert_eq!(plus.key, "+");
        assert!(plus.modifiers.ctrl);

        let bare = Shortcut::parse("Home").unwrap();
        assert_eq!(bare, Shortcut::from_key("Home", Modifiers::NONE));

        assert_eq!(Shortcut::parse("ctrl+shift+n").unwrap().to_string(), "Ctrl+Shift+N");
    }

    #[test]
    fn parse_rejects_bad_shortcuts() {
        assert!(matches!(
            Shortcut::parse("Hyper+X"),
            Err(ActionError::InvalidShortcut { .. })
        ));
        assert!(matches!(
            Shortcut::parse("Ctrl+"),
            Err(ActionError::InvalidShortcut { .. })
        ));
    }

    #[test]
    fn defaults_resolve_by_shortcut() {
        let reg = ActionRegistry::with_defaults();
        assert_eq!(reg.len(), 5);
        let (id, action) = reg.resolve_shortcut("Ctrl+T").unwrap().unwrap();
        assert_eq!(id, "view.toggle_scope");
        assert_eq!(action.command, Some(WorkspaceCommand::ToggleScope));
        assert_eq!(
            reg.resolve_key("+", Modifiers::CTRL).map(|(id, _)| id),
            Some("view.zoom_in")
        );
        assert_eq!(
            reg.resolve_key("t", Modifiers::CTRL).map(|(id, _)| id),
            Some("view.toggle_scope")
        );
        assert!(reg.resolve_shortcut("Ctrl+Q").unwrap().is_none());
    }

    #[test]
    fn command_for_reports_missing() {
        let mut reg = ActionRegistry::with_defaults();
        assert_eq!(reg.command_for("file.new_tab").unwrap(), WorkspaceCommand::NewTab);
        assert!(matches!(reg.command_for("nope"), Err(ActionError::UnknownAction(_))));
        reg.register("help.about", Action::new("About"));
        assert!(matches!(reg.command_for("help.about"), Err(ActionError::NoCommand(_))));
    }

    #[test]
    fn build_menus_from_list() {
        let mut reg = ActionRegistry::new();
        let menus = reg
            .build_menus(
                r#"[
                {"title": "View", "items": [
                    {"id": "view.zoom_in", "name": "Zoom In", "shortcut": "Ctrl++", "command": "zoom_in"},
                    {"separator": true},
                    {"name": "Unnamed"}
                ]},
                {"title": "File", "items": [
                    {"id": "file.close", "name": "Close", "command": {"close_tab": 0}}
                ]}
            ]"#,
            )
            .unwrap();
        assert_eq!(menus.len(), 2);
        assert_eq!(menus[0].title, "View");
        assert_eq!(menus[0].entries.len(), 3);
        assert_eq!(menus[0].entries[1], MenuEntry::Separator);
        assert!(matches!(
            &menus[0].entries[2],
            MenuEntry::Action { id: None, action } if action.name == "Unnamed"
        ));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.command_for("file.close").unwrap(), WorkspaceCommand::CloseTab(0));
    }

    #[test]
    fn build_menus_from_object() {
        let mut reg = ActionRegistry::new();
        let json = r#"{"View": [
            {"id": "v.scope", "name": "Scope", "shortcut": "Ctrl+T", "command": "toggle_scope"}
        ]}"#;
        let menus = reg.build_menus(json).unwrap();
        assert_eq!(menus[0].title, "View");
        assert_eq!(reg.resolve_shortcut("Ctrl+T").unwrap().map(|(id, _)| id), Some("v.scope"));
    }

    #[test]
    fn build_menus_propagates_errors() {
        let mut reg = ActionRegistry::new();
        assert!(matches!(reg.build_menus("not json"), Err(ActionError::Json(_))));
        let json = r#"[{"title": "X", "items": [{"id": "a", "shortcut": "Hyper+A"}]}]"#;
        assert!(matches!(
            reg.build_menus(json),
            Err(ActionError::InvalidShortcut { .. })
        ));
    }

    #[test]
    fn failed_build_registers_nothing() {
        let mut reg = ActionRegistry::new();
        let json = r#"[
            {"title": "Edit", "items": [{"id": "ok", "name": "Fine", "command": "zoom_in"}]},
            {"title": "Broken", "items": [{"id": "bad", "name": "Bad", "shortcut": "Hyper+A"}]}
        ]"#;
        assert!(reg.build_menus(json).is_err());
        assert!(reg.is_empty());
        assert_eq!(reg.ids().count(), 0);
    }

    #[test]
    fn symbol_keys_match_with_shift_held() {
        let reg = ActionRegistry::with_defaults();
        let ctrl_shift = Modifiers {
            shift: true,
            ..Modifiers::CTRL
        };
        assert_eq!(
            reg.resolve_key("+", ctrl_shift).map(|(id, _)| id),
            Some("view.zoom_in")
        );
        // Letters still distinguish Shift.
        assert_eq!(reg.resolve_key("t", ctrl_shift), None);
        assert!(!Shortcut::parse("Ctrl+T").unwrap().matches(&Shortcut::from_key("T", ctrl_shift)));
    }
}
