//! Search-as-you-type filtering.
//!
//! Matching is a case-insensitive substring test against the command text or
//! its description. The query is not trimmed.

use crate::view::{CardView, SectionView};

/// Visibility computed by one `filter` call, keyed by section and card index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Visibility {
    pub cards: Vec<Vec<bool>>,
    pub sections: Vec<bool>,
}

impl Visibility {
    pub fn card(&self, section: usize, card: usize) -> bool {
        self.cards
            .get(section)
            .and_then(|cards| cards.get(card))
            .copied()
            .unwrap_or(false)
    }

    pub fn section(&self, section: usize) -> bool {
        self.sections.get(section).copied().unwrap_or(false)
    }

    pub fn visible_cards(&self) -> usize {
        self.cards.iter().flatten().filter(|v| **v).count()
    }
}

pub fn matches(card: &CardView, needle: &str) -> bool {
    card.command.to_lowercase().contains(needle)
        || card.description.to_lowercase().contains(needle)
}

pub fn filter(sections: &[SectionView], query: &str) -> Visibility {
    let needle = query.to_lowercase();
    let cards: Vec<Vec<bool>> = sections
        .iter()
        .map(|s| s.cards.iter().map(|c| matches(c, &needle)).collect())
        .collect();
    let sections = cards.iter().map(|c| c.iter().any(|v| *v)).collect();
    Visibility { cards, sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, CommandEntry, CATALOG};
    use crate::view::build;

    const TWO: &[Category] = &[
        Category {
            name: "Create",
            icon: "fa-plus-square",
            commands: &[
                CommandEntry {
                    command: "git init",
                    description: "Initialize a new Git repository",
                },
                CommandEntry {
                    command: "git clone <url>",
                    description: "Clone a remote repository",
                },
            ],
            troubleshooting: &[],
        },
        Category {
            name: "Snapshot",
            icon: "fa-camera",
            commands: &[CommandEntry {
                command: "git status",
                description: "Check status of working directory",
            }],
            troubleshooting: &[],
        },
    ];

    #[test]
    fn test_empty_query_shows_everything() {
        let page = build(CATALOG);
        let vis = filter(&page.sections, "");
        assert!(vis.sections.iter().all(|v| *v));
        assert_eq!(vis.visible_cards(), page.card_count());
    }

    #[test]
    fn test_clone_scenario() {
        let page = build(TWO);
        let vis = filter(&page.sections, "clone");
        assert!(!vis.card(0, 0));
        assert!(vis.card(0, 1));
        assert!(vis.section(0));
        assert!(!vis.card(1, 0));
        assert!(!vis.section(1));
    }

    #[test]
    fn test_case_insensitive_and_description_match() {
        let page = build(TWO);
        let vis = filter(&page.sections, "WORKING DIR");
        assert_eq!(vis.sections, vec![false, true]);
        let vis = filter(&page.sections, "GIT");
        assert_eq!(vis.visible_cards(), 3);
    }

    #[test]
    fn test_whitespace_is_literal() {
        let page = build(TWO);
        let vis = filter(&page.sections, " ");
        assert_eq!(vis.visible_cards(), 3);
        let vis = filter(&page.sections, "  ");
        assert_eq!(vis.visible_cards(), 0);
        assert_eq!(vis.sections, vec![false, false]);
    }

    #[test]
    fn test_new_query_supersedes_previous() {
        let page = build(TWO);
        let narrow = filter(&page.sections, "status");
        assert_eq!(narrow.visible_cards(), 1);
        let wide = filter(&page.sections, "git");
        assert_eq!(wide.visible_cards(), 3);
        assert_eq!(wide, filter(&page.sections, ""));
    }

    #[test]
    fn test_visibility_iff_substring() {
        let page = build(CATALOG);
        for query in ["push", "Stash", "<commit>", "head~1", "zzz"] {
            let vis = filter(&page.sections, query);
            let needle = query.to_lowercase();
            for section in &page.sections {
                for card in &section.cards {
                    let expected = card.command.to_lowercase().contains(&needle)
                        || card.description.to_lowercase().contains(&needle);
                    assert_eq!(vis.card(section.index, card.index), expected);
                }
                let any = section.cards.iter().any(|c| vis.card(section.index, c.index));
                assert_eq!(vis.section(section.index), any);
            }
        }
    }

    #[test]
    fn test_out_of_range_is_hidden() {
        let vis = filter(&[], "git");
        assert!(!vis.section(0));
        assert!(!vis.card(3, 1));
    }
}
