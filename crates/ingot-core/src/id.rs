//! Drawable identity.
//!
//! Drawables have no positional key in the registry, so each one carries a
//! `DrawableId`: an interned name that is cheap to copy and compare. Names
//! are either chosen by the caller or minted per kind (`rect_0`, `text_3`).

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);
static MINTED: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableId(Spur);

impl DrawableId {
    /// The id for `name`. The same name always yields the same id.
    pub fn intern(name: &str) -> Self {
        Self(NAMES.get_or_intern(name))
    }

    /// A fresh id `<kind>_<n>`, unique for the process lifetime.
    pub fn with_prefix(kind: &str) -> Self {
        loop {
            let n = MINTED.fetch_add(1, Ordering::Relaxed);
            let name = format!("{kind}_{n}");
            // Skip names a caller already claimed through `intern`.
            if NAMES.get(&name).is_none() {
                return Self::intern(&name);
            }
        }
    }

    pub fn as_str(&self) -> &str {
        NAMES.resolve(&self.0)
    }
}

impl fmt::Debug for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DrawableId").field(&self.as_str()).finish()
    }
}

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_id() {
        let a = DrawableId::intern("title_banner");
        assert_eq!(a, DrawableId::intern("title_banner"));
        assert_eq!(a.as_str(), "title_banner");
        assert_eq!(a.to_string(), "@title_banner");
        assert_eq!(format!("{a:?}"), "DrawableId(\"title_banner\")");
    }

    #[test]
    fn minted_ids_are_unique_and_prefixed() {
        let a = DrawableId::with_prefix("rect");
        let b = DrawableId::with_prefix("rect");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("rect_"));
    }

    #[test]
    fn minting_skips_claimed_names() {
        let n = MINTED.load(Ordering::Relaxed);
        let claimed = DrawableId::intern(&format!("marker_{n}"));
        let minted = DrawableId::with_prefix("marker");
        assert_ne!(minted, claimed);
    }
}
