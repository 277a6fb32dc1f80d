use crate::dom::PageElement;
use crate::Result;

const OPEN_CLASS: &str = "open";
const ARIA_EXPANDED: &str = "aria-expanded";

pub struct NavController<E> {
    toggle: E,
    nav: E,
}

impl<E: PageElement> NavController<E> {
    pub fn new(toggle: E, nav: E) -> Self {
        Self { toggle, nav }
    }

    /// Flips the menu and mirrors the new state into `aria-expanded`.
    pub fn toggle_menu(&self) -> Result<bool> {
        let expanded = self.nav.toggle_class(OPEN_CLASS)?;
        self.toggle.set_attribute(ARIA_EXPANDED, if expanded { "true" } else { "false" })?;
        Ok(expanded)
    }

    /// Link activation always closes, whatever the prior state.
    pub fn close(&self) -> Result<()> {
        self.nav.remove_class(OPEN_CLASS)?;
        self.toggle.set_attribute(ARIA_EXPANDED, "false")
    }

    pub fn is_open(&self) -> bool {
        self.nav.has_class(OPEN_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    fn controller() -> (NavController<FakeElement>, FakeElement, FakeElement) {
        let toggle = FakeElement::with_attribute("aria-expanded", "false");
        let nav = FakeElement::new();
        (NavController::new(toggle.clone(), nav.clone()), toggle, nav)
    }

    #[test]
    fn toggle_opens_and_mirrors_aria() {
        let (nav, toggle, container) = controller();
        assert!(nav.toggle_menu().unwrap());
        assert!(container.has_class("open"));
        assert_eq!(toggle.attribute("aria-expanded").as_deref(), Some("true"));
    }

    #[test]
    fn double_toggle_restores_state() {
        let (nav, toggle, container) = controller();
        nav.toggle_menu().unwrap();
        assert!(!nav.toggle_menu().unwrap());
        assert!(!container.has_class("open"));
        assert_eq!(toggle.attribute("aria-expanded").as_deref(), Some("false"));
    }

    #[test]
    fn close_always_yields_closed() {
        let (nav, toggle, _) = controller();

        nav.close().unwrap();
        assert!(!nav.is_open());

        nav.toggle_menu().unwrap();
        nav.close().unwrap();
        assert!(!nav.is_open());
        assert_eq!(toggle.attribute("aria-expanded").as_deref(), Some("false"));
    }
}
