use crate::dom::FragmentHost;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// Fragment didn't resolve: the browser's own jump runs untouched.
    Native,
    /// Default navigation suppressed, viewport animating to `id`.
    Scrolled { id: String },
}

impl AnchorOutcome {
    pub fn prevents_default(&self) -> bool {
        matches!(self, AnchorOutcome::Scrolled { .. })
    }
}

/// The element id an in-page href points at. A bare `#` has none.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn handle_anchor_click<H: FragmentHost>(host: &H, href: &str) -> Result<AnchorOutcome> {
    let Some(id) = fragment_id(href) else {
        return Ok(AnchorOutcome::Native);
    };
    if !host.contains_id(id) {
        return Ok(AnchorOutcome::Native);
    }

    host.smooth_scroll_to(id)?;
    Ok(AnchorOutcome::Scrolled { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn fragment_parsing() {
        assert_eq!(fragment_id("#work"), Some("work"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about#work"), None);
    }

    #[test]
    fn resolvable_fragment_scrolls_smoothly_once() {
        let host = FakeHost::with_ids(&["work", "contact"]);

        let outcome = handle_anchor_click(&host, "#contact").unwrap();
        assert!(outcome.prevents_default());
        assert_eq!(outcome, AnchorOutcome::Scrolled { id: "contact".to_string() });
        assert_eq!(*host.scrolls.borrow(), vec!["contact".to_string()]);
    }

    #[test]
    fn unresolvable_fragment_falls_back_to_native() {
        let host = FakeHost::with_ids(&["work"]);

        for href in ["#missing", "#"] {
            let outcome = handle_anchor_click(&host, href).unwrap();
            assert_eq!(outcome, AnchorOutcome::Native);
            assert!(!outcome.prevents_default());
        }
        assert!(host.scrolls.borrow().is_empty());
    }
}
