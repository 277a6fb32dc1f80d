// In-memory stand-ins for the DOM seams, shared by the unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::dom::{FragmentHost, KeyValueStore, PageElement};
use crate::{PageError, Result};

#[derive(Default)]
struct ElementState {
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
}

#[derive(Clone, Default)]
pub struct FakeElement {
    state: Rc<RefCell<ElementState>>,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(name: &str, value: &str) -> Self {
        let element = Self::new();
        element
            .state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        element
    }

    pub fn classes(&self) -> Vec<String> {
        self.state.borrow().classes.iter().cloned().collect()
    }

    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }
}

impl PageElement for FakeElement {
    fn has_class(&self, name: &str) -> bool {
        self.state.borrow().classes.contains(name)
    }

    fn add_class(&self, name: &str) -> Result<()> {
        self.state.borrow_mut().classes.insert(name.to_string());
        Ok(())
    }

    fn remove_class(&self, name: &str) -> Result<()> {
        self.state.borrow_mut().classes.remove(name);
        Ok(())
    }

    fn toggle_class(&self, name: &str) -> Result<bool> {
        let mut state = self.state.borrow_mut();
        if state.classes.remove(name) {
            Ok(false)
        } else {
            state.classes.insert(name.to_string());
            Ok(true)
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
    }

    fn set_style(&self, property: &str, value: &str) -> Result<()> {
        self.state
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn read_only() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(PageError::Storage("quota exceeded".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHost {
    pub ids: Vec<String>,
    pub scrolls: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            scrolls: RefCell::new(Vec::new()),
        }
    }
}

impl FragmentHost for FakeHost {
    fn contains_id(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    fn smooth_scroll_to(&self, id: &str) -> Result<()> {
        self.scrolls.borrow_mut().push(id.to_string());
        Ok(())
    }
}
