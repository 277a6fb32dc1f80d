use crate::dom::PageElement;
use crate::Result;

const ACTIVE_CLASS: &str = "active";

/// One intersection observer entry, reduced to what the spy reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub id: String,
    pub is_intersecting: bool,
}

impl SectionEntry {
    pub fn new(id: &str, is_intersecting: bool) -> Self {
        Self {
            id: id.to_string(),
            is_intersecting,
        }
    }
}

/// Highlights the navigation link of whichever section last entered the
/// centre band of the viewport.
pub struct ScrollSpy<E> {
    links: Vec<E>,
}

impl<E: PageElement> ScrollSpy<E> {
    pub fn new(links: Vec<E>) -> Self {
        Self { links }
    }

    /// Index of the first link pointing at `#id`.
    pub fn link_for(&self, id: &str) -> Option<usize> {
        let fragment = format!("#{}", id);
        self.links
            .iter()
            .position(|link| link.attribute("href").as_deref() == Some(fragment.as_str()))
    }

    /// Applies one observer batch in order; the last intersecting entry wins.
    ///
    /// Returns the index of the link left active, if any.
    pub fn on_intersections(&self, entries: &[SectionEntry]) -> Result<Option<usize>> {
        let mut active = self.links.iter().position(|link| link.has_class(ACTIVE_CLASS));

        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            for link in &self.links {
                link.remove_class(ACTIVE_CLASS)?;
            }

            active = self.link_for(&entry.id);
            if let Some(index) = active {
                self.links[index].add_class(ACTIVE_CLASS)?;
            }
        }

        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    fn links(hrefs: &[&str]) -> Vec<FakeElement> {
        hrefs
            .iter()
            .map(|href| FakeElement::with_attribute("href", href))
            .collect()
    }

    fn active_count(links: &[FakeElement]) -> usize {
        links.iter().filter(|link| link.has_class("active")).count()
    }

    #[test]
    fn intersecting_section_activates_its_link() {
        let links = links(&["#about", "#work", "#contact"]);
        let spy = ScrollSpy::new(links.clone());

        let active = spy.on_intersections(&[SectionEntry::new("work", true)]).unwrap();
        assert_eq!(active, Some(1));
        assert!(links[1].has_class("active"));
        assert_eq!(active_count(&links), 1);
    }

    #[test]
    fn last_intersecting_entry_in_batch_wins() {
        let links = links(&["#about", "#work", "#contact"]);
        let spy = ScrollSpy::new(links.clone());

        let batch = [
            SectionEntry::new("contact", true),
            SectionEntry::new("about", true),
            SectionEntry::new("work", false),
        ];
        assert_eq!(spy.on_intersections(&batch).unwrap(), Some(0));
        assert!(links[0].has_class("active"));
        assert_eq!(active_count(&links), 1);
    }

    #[test]
    fn unmatched_section_clears_every_link() {
        let links = links(&["#about", "#work"]);
        let spy = ScrollSpy::new(links.clone());
        spy.on_intersections(&[SectionEntry::new("about", true)]).unwrap();

        let active = spy.on_intersections(&[SectionEntry::new("footer", true)]).unwrap();
        assert_eq!(active, None);
        assert_eq!(active_count(&links), 0);
    }

    #[test]
    fn leaving_entries_change_nothing() {
        let links = links(&["#about", "#work"]);
        let spy = ScrollSpy::new(links.clone());
        spy.on_intersections(&[SectionEntry::new("work", true)]).unwrap();

        let active = spy.on_intersections(&[SectionEntry::new("work", false)]).unwrap();
        assert_eq!(active, Some(1));
        assert!(links[1].has_class("active"));
    }

    #[test]
    fn duplicate_hrefs_resolve_to_first_link() {
        let links = links(&["#work", "#about", "#work"]);
        let spy = ScrollSpy::new(links.clone());

        assert_eq!(spy.on_intersections(&[SectionEntry::new("work", true)]).unwrap(), Some(0));
        assert!(!links[2].has_class("active"));
    }
}
