//! Display tree built from the catalog.
//!
//! `build` is pure; `dom::mount` turns the result into elements. Keeping the
//! tree separate lets the structural guarantees (one nav item per section,
//! one card per command, same order) be checked without a browser.

use crate::catalog::{Category, TroubleshootingEntry};

pub const INFO_SECTION_ID: &str = "about";

#[derive(Clone, Debug, PartialEq)]
pub struct NavItem {
    pub index: usize,
    pub href: String,
    pub icon: &'static str,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub section: usize,
    pub index: usize,
    pub command: &'static str,
    pub description: &'static str,
}

impl CardView {
    /// Stable key used to address the card's copy button.
    pub fn key(&self) -> String {
        format!("{}-{}", self.section, self.index)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionView {
    pub index: usize,
    pub id: String,
    pub icon: &'static str,
    pub title: &'static str,
    pub cards: Vec<CardView>,
    pub troubleshooting: Option<&'static [TroubleshootingEntry]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfoSection {
    pub id: &'static str,
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
}

impl Default for InfoSection {
    fn default() -> Self {
        Self {
            id: INFO_SECTION_ID,
            title: "About Git-Archive",
            paragraphs: &[
                "A quick reference for everyday Git commands, grouped by task.",
                "Click the copy icon on any card to put the command on your clipboard. Press / to jump to search.",
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageView {
    pub nav: Vec<NavItem>,
    pub sections: Vec<SectionView>,
    pub info: InfoSection,
}

impl PageView {
    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).sum()
    }
}

pub fn section_anchor(index: usize) -> String {
    format!("cat-{}", index)
}

pub fn build(catalog: &[Category]) -> PageView {
    let mut nav = Vec::with_capacity(catalog.len());
    let mut sections = Vec::with_capacity(catalog.len());

    for (index, category) in catalog.iter().enumerate() {
        let id = section_anchor(index);
        nav.push(NavItem {
            index,
            href: format!("#{}", id),
            icon: category.icon,
            label: category.name,
        });

        let cards = category
            .commands
            .iter()
            .enumerate()
            .map(|(i, entry)| CardView {
                section: index,
                index: i,
                command: entry.command,
                description: entry.description,
            })
            .collect();

        sections.push(SectionView {
            index,
            id,
            icon: category.icon,
            title: category.name,
            cards,
            troubleshooting: category
                .has_troubleshooting()
                .then_some(category.troubleshooting),
        });
    }

    PageView {
        nav,
        sections,
        info: InfoSection::default(),
    }
}
