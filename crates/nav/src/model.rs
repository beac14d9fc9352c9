//! Link/section/sidebar state machine.

use folio_fx_core::error::FxError;
use log::debug;

/// Target section id of a nav link: the `href` with its first `#` removed.
///
/// `"#about"` becomes `"about"`; `"page#x"` becomes `"pagex"`, which simply
/// matches no section.
pub fn fragment_from_href(href: &str) -> String {
    href.replacen('#', "", 1)
}

/// Result of clicking a nav link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// The link now marked active.
    pub link: usize,
    /// The section now revealed, if any section's id matched the fragment.
    pub section: Option<usize>,
}

/// Which link is active, which section is visible, and whether the sidebar
/// is open.
///
/// At most one link and at most one section are active at a time. Nothing is
/// active until the first [`NavModel::select`]; the page's own markup decides
/// the initial view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavModel {
    fragments: Vec<String>,
    section_ids: Vec<String>,
    active_link: Option<usize>,
    active_section: Option<usize>,
    sidebar_open: bool,
}

impl NavModel {
    /// Builds a model from each link's `href` and each section's `id`, in
    /// document order.
    pub fn new<L, S>(hrefs: L, section_ids: S) -> Self
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            fragments: hrefs
                .into_iter()
                .map(|h| fragment_from_href(h.as_ref()))
                .collect(),
            section_ids: section_ids.into_iter().map(Into::into).collect(),
            active_link: None,
            active_section: None,
            sidebar_open: false,
        }
    }

    pub fn link_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn section_count(&self) -> usize {
        self.section_ids.len()
    }

    pub fn fragment(&self, link: usize) -> Option<&str> {
        self.fragments.get(link).map(String::as_str)
    }

    pub fn active_link(&self) -> Option<usize> {
        self.active_link
    }

    pub fn active_section(&self) -> Option<usize> {
        self.active_section
    }

    pub fn is_link_active(&self, link: usize) -> bool {
        self.active_link == Some(link)
    }

    pub fn is_section_visible(&self, section: usize) -> bool {
        self.active_section == Some(section)
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    /// Syncs the sidebar state with markup that starts it open.
    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    /// Flips the sidebar and returns whether it is now open.
    pub fn toggle_menu(&mut self) -> bool {
        self.sidebar_open = !self.sidebar_open;
        self.sidebar_open
    }

    /// Handles a click on link `index`.
    ///
    /// Marks only that link active, hides every section, reveals the first
    /// section whose id equals the link's fragment, and closes the sidebar.
    /// A fragment that names no section leaves every section hidden.
    pub fn select(&mut self, index: usize) -> Result<Selection, FxError> {
        let fragment = self.fragments.get(index).ok_or(FxError::OutOfRange {
            kind: "nav link",
            index,
            len: self.fragments.len(),
        })?;
        let section = if fragment.is_empty() {
            None
        } else {
            self.section_ids.iter().position(|id| id == fragment)
        };
        if section.is_none() {
            debug!("nav link {index} targets #{fragment}, which matches no section");
        }
        self.active_link = Some(index);
        self.active_section = section;
        self.sidebar_open = false;
        Ok(Selection {
            link: index,
            section,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> NavModel {
        NavModel::new(
            ["#home", "#about", "#projects", "#contact"],
            ["home", "about", "projects", "contact"],
        )
    }

    #[test]
    fn fragment_strips_only_first_hash() {
        assert_eq!(fragment_from_href("#about"), "about");
        assert_eq!(fragment_from_href("about"), "about");
        assert_eq!(fragment_from_href("##x"), "#x");
        assert_eq!(fragment_from_href("/page#x"), "/pagex");
        assert_eq!(fragment_from_href("#"), "");
    }

    #[test]
    fn fresh_model_has_nothing_active() {
        let nav = site();
        assert_eq!(nav.active_link(), None);
        assert_eq!(nav.active_section(), None);
        assert!(!nav.sidebar_open());
        assert_eq!(nav.link_count(), 4);
        assert_eq!(nav.section_count(), 4);
    }

    #[test]
    fn selecting_about_shows_only_about() {
        let mut nav = site();
        let sel = nav.select(1).unwrap();
        assert_eq!(sel, Selection { link: 1, section: Some(1) });
        for i in 0..nav.link_count() {
            assert_eq!(nav.is_link_active(i), i == 1);
        }
        for i in 0..nav.section_count() {
            assert_eq!(nav.is_section_visible(i), i == 1);
        }
    }

    #[test]
    fn selecting_replaces_previous_selection() {
        let mut nav = site();
        nav.select(1).unwrap();
        nav.select(3).unwrap();
        assert!(!nav.is_link_active(1));
        assert!(!nav.is_section_visible(1));
        assert!(nav.is_link_active(3));
        assert!(nav.is_section_visible(3));
    }

    #[test]
    fn selecting_closes_sidebar() {
        let mut nav = site();
        assert!(nav.toggle_menu());
        nav.select(0).unwrap();
        assert!(!nav.sidebar_open());
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut nav = site();
        assert!(nav.toggle_menu());
        assert!(!nav.toggle_menu());
        assert!(nav.toggle_menu());
    }

    #[test]
    fn sidebar_state_can_be_seeded_from_markup() {
        let mut nav = site();
        nav.set_sidebar_open(true);
        assert!(!nav.toggle_menu());
    }

    #[test]
    fn mismatched_fragment_hides_everything_but_activates_link() {
        let mut nav = NavModel::new(["#about", "#blog"], ["about"]);
        nav.select(0).unwrap();
        let sel = nav.select(1).unwrap();
        assert_eq!(sel.section, None);
        assert!(nav.is_link_active(1));
        assert!(!nav.is_section_visible(0));
    }

    #[test]
    fn empty_fragment_never_matches_unnamed_section() {
        let mut nav = NavModel::new(["#"], [""]);
        assert_eq!(nav.select(0).unwrap().section, None);
    }

    #[test]
    fn duplicate_section_ids_reveal_the_first() {
        let mut nav = NavModel::new(["#a"], ["b", "a", "a"]);
        assert_eq!(nav.select(0).unwrap().section, Some(1));
    }

    #[test]
    fn out_of_range_link_is_an_error_and_changes_nothing() {
        let mut nav = site();
        nav.select(2).unwrap();
        let err = nav.select(9).unwrap_err();
        assert!(matches!(err, FxError::OutOfRange { index: 9, len: 4, .. }));
        assert!(nav.is_link_active(2));
        assert!(nav.is_section_visible(2));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn at_most_one_of_each_active(clicks in proptest::collection::vec(0_usize..4, 1..30)) {
                let mut nav = site();
                for i in clicks {
                    nav.select(i).unwrap();
                    let links = (0..4).filter(|&l| nav.is_link_active(l)).count();
                    let sections = (0..4).filter(|&s| nav.is_section_visible(s)).count();
                    prop_assert_eq!(links, 1);
                    prop_assert!(sections <= 1);
                    prop_assert!(nav.is_section_visible(i));
                }
            }
        }
    }
}
