use crate::dom::{KeyValueStore, PageElement};
use crate::Result;

const DARK_CLASS: &str = "theme-dark";
const LIGHT_CLASS: &str = "theme-light";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Anything other than a stored `"light"` (including nothing) is dark.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Dark => DARK_CLASS,
            Theme::Light => LIGHT_CLASS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark Mode",
            Theme::Light => "Light Mode",
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Keeps the body's theme class, the toggle label and the stored preference
/// in step.
pub struct ThemeManager<E, S> {
    body: E,
    storage: S,
    toggle: Option<E>,
    label: Option<E>,
    key: String,
}

impl<E: PageElement, S: KeyValueStore> ThemeManager<E, S> {
    /// Builds the manager and applies the stored theme (dark when unset).
    ///
    /// Storage failures are logged; the theme classes are applied regardless.
    pub fn init(body: E, storage: S, toggle: Option<E>, label: Option<E>, key: &str) -> Self {
        let manager = Self {
            body,
            storage,
            toggle,
            label,
            key: key.to_string(),
        };

        let stored = manager.storage.get(&manager.key).unwrap_or_else(|e| {
            log::warn!("Couldn't read theme preference: {}", e);
            None
        });
        let initial = Theme::from_stored(stored.as_deref());
        log::info!("Theme restored: {} (stored: {:?})", initial.as_str(), stored);

        if let Err(e) = manager.apply(initial) {
            log::warn!("Couldn't apply initial theme: {}", e);
        }

        manager
    }

    pub fn apply(&self, mode: Theme) -> Result<()> {
        self.body.remove_class(DARK_CLASS)?;
        self.body.remove_class(LIGHT_CLASS)?;
        self.body.add_class(mode.class_name())?;

        self.update_label(mode)?;
        self.storage.set(&self.key, mode.as_str())
    }

    /// The applied mode, read back from the body rather than storage.
    pub fn current(&self) -> Theme {
        if self.body.has_class(LIGHT_CLASS) {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn toggle(&self) -> Result<Theme> {
        let next = self.current().inverse();
        self.apply(next)?;
        Ok(next)
    }

    fn update_label(&self, mode: Theme) -> Result<()> {
        let (Some(label), Some(toggle)) = (&self.label, &self.toggle) else {
            return Ok(());
        };
        label.set_text(mode.label());
        toggle.set_attribute("data-mode", mode.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, MemoryStore};
    use crate::PageError;

    const KEY: &str = "theme-key";

    fn manager(store: MemoryStore) -> (ThemeManager<FakeElement, MemoryStore>, FakeElement, FakeElement, FakeElement) {
        let body = FakeElement::new();
        let toggle = FakeElement::new();
        let label = FakeElement::new();
        let manager = ThemeManager::init(
            body.clone(),
            store,
            Some(toggle.clone()),
            Some(label.clone()),
            KEY,
        );
        (manager, body, toggle, label)
    }

    fn theme_classes(body: &FakeElement) -> Vec<String> {
        body.classes()
            .into_iter()
            .filter(|c| c.starts_with("theme-"))
            .collect()
    }

    #[test]
    fn defaults_to_dark_without_stored_value() {
        let store = MemoryStore::new();
        let (manager, body, toggle, label) = manager(store.clone());

        assert_eq!(manager.current(), Theme::Dark);
        assert_eq!(theme_classes(&body), vec!["theme-dark"]);
        assert_eq!(store.value(KEY).as_deref(), Some("dark"));
        assert_eq!(label.text(), "Dark Mode");
        assert_eq!(toggle.attribute("data-mode").as_deref(), Some("dark"));
    }

    #[test]
    fn restores_stored_light() {
        let (manager, body, _, label) = manager(MemoryStore::seeded(KEY, "light"));
        assert_eq!(manager.current(), Theme::Light);
        assert_eq!(theme_classes(&body), vec!["theme-light"]);
        assert_eq!(label.text(), "Light Mode");
    }

    #[test]
    fn unknown_stored_value_is_rewritten_as_dark() {
        let store = MemoryStore::seeded(KEY, "sepia");
        let (manager, _, _, _) = manager(store.clone());
        assert_eq!(manager.current(), Theme::Dark);
        assert_eq!(store.value(KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn every_toggle_keeps_one_class_and_storage_in_sync() {
        let store = MemoryStore::new();
        let (manager, body, _, _) = manager(store.clone());

        let mut expected = Theme::Dark;
        for _ in 0..5 {
            expected = expected.inverse();
            assert_eq!(manager.toggle().unwrap(), expected);
            assert_eq!(theme_classes(&body), vec![expected.class_name()]);
            assert_eq!(store.value(KEY).as_deref(), Some(expected.as_str()));
        }
    }

    #[test]
    fn toggle_reads_the_dom_not_storage() {
        let store = MemoryStore::new();
        let (manager, body, _, _) = manager(store.clone());

        // Someone else flips the body class behind the manager's back.
        body.remove_class("theme-dark").unwrap();
        body.add_class("theme-light").unwrap();

        assert_eq!(manager.toggle().unwrap(), Theme::Dark);
        assert_eq!(store.value(KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn missing_label_only_skips_label_update() {
        let body = FakeElement::new();
        let toggle = FakeElement::new();
        let manager = ThemeManager::init(body.clone(), MemoryStore::new(), Some(toggle.clone()), None, KEY);

        manager.toggle().unwrap();
        assert_eq!(theme_classes(&body), vec!["theme-light"]);
        assert_eq!(toggle.attribute("data-mode"), None);
    }

    #[test]
    fn storage_failure_still_applies_classes() {
        let body = FakeElement::new();
        let manager = ThemeManager::init(body.clone(), MemoryStore::read_only(), None, None, KEY);
        assert_eq!(theme_classes(&body), vec!["theme-dark"]);

        assert!(matches!(manager.toggle(), Err(PageError::Storage(_))));
        assert_eq!(theme_classes(&body), vec!["theme-light"]);
        assert_eq!(manager.current(), Theme::Light);
    }
}
