//! Git command catalog.
//!
//! The page renders exactly this list, in this order. Category order drives
//! both the sidebar order and the section order.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    pub command: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TroubleshootingEntry {
    pub problem: &'static str,
    pub fix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    /// Font Awesome class, e.g. `fa-cog`.
    pub icon: &'static str,
    pub commands: &'static [CommandEntry],
    /// Empty when the category has no troubleshooting table.
    pub troubleshooting: &'static [TroubleshootingEntry],
}

impl Category {
    pub fn has_troubleshooting(&self) -> bool {
        !self.troubleshooting.is_empty()
    }
}

const fn cmd(command: &'static str, description: &'static str) -> CommandEntry {
    CommandEntry {
        command,
        description,
    }
}

const fn fix(problem: &'static str, fix: &'static str) -> TroubleshootingEntry {
    TroubleshootingEntry { problem, fix }
}

pub static CATALOG: &[Category] = &[
    Category {
        name: "Setup & Configuration",
        icon: "fa-cog",
        commands: &[
            cmd(
                "git config --global user.name \"Name\"",
                "Set your Git username for commits",
            ),
            cmd(
                "git config --global user.email \"email\"",
                "Set your Git email for commits",
            ),
            cmd(
                "git config --global core.editor code",
                "Set VS Code as default editor",
            ),
            cmd(
                "git config --global init.defaultBranch main",
                "Set default branch name to 'main'",
            ),
            cmd("git config --list", "Show all configuration settings"),
            cmd("git help <command>", "Get help for a specific command"),
        ],
        troubleshooting: &[
            fix(
                "Commits show the wrong author",
                "git config --global user.email \"you@example.com\" then git commit --amend --reset-author",
            ),
            fix(
                "Editor does not open for commit messages",
                "git config --global core.editor \"code --wait\"",
            ),
        ],
    },
    Category {
        name: "Create / Clone",
        icon: "fa-plus-square",
        commands: &[
            cmd("git init", "Initialize a new Git repository"),
            cmd("git clone <url>", "Clone a remote repository"),
            cmd("git clone <url> folder", "Clone into a specific folder name"),
            cmd("git clone -b branch <url>", "Clone a specific branch only"),
            cmd(
                "git clone --depth 1 <url>",
                "Shallow clone (latest commit only)",
            ),
        ],
        troubleshooting: &[],
    },
    Category {
        name: "Basic Snapshot",
        icon: "fa-camera",
        commands: &[
            cmd("git status", "Check status of working directory"),
            cmd("git add .", "Stage all changes"),
            cmd("git add file", "Stage a specific file"),
            cmd("git commit -m \"msg\"", "Commit staged changes with message"),
            cmd("git commit --amend", "Modify the previous commit"),
        ],
        troubleshooting: &[fix(
            "Staged a file by mistake",
            "git restore --staged file",
        )],
    },
    Category {
        name: "Branching & Merging",
        icon: "fa-code-branch",
        commands: &[
            cmd("git branch", "List all local branches"),
            cmd("git branch <name>", "Create a new branch"),
            cmd("git switch <name>", "Switch to a branch"),
            cmd("git merge <name>", "Merge branch into current one"),
            cmd("git branch -d <name>", "Delete a branch (safe)"),
        ],
        troubleshooting: &[
            fix(
                "Merge conflict after git merge",
                "Edit the conflicted files, git add them, then git commit (or git merge --abort)",
            ),
            fix(
                "Branch not fully merged on delete",
                "git branch -D <name> if the work is no longer needed",
            ),
        ],
    },
    Category {
        name: "Remote & Sync",
        icon: "fa-cloud",
        commands: &[
            cmd("git remote -v", "List remote connections"),
            cmd("git fetch", "Download changes (no merge)"),
            cmd("git pull", "Fetch and merge changes"),
            cmd("git push", "Upload commits to remote"),
            cmd("git push -u origin main", "Push and set upstream tracking"),
        ],
        troubleshooting: &[
            fix(
                "Push rejected (non-fast-forward)",
                "git pull --rebase then git push",
            ),
            fix(
                "No upstream branch configured",
                "git push -u origin <branch>",
            ),
        ],
    },
    Category {
        name: "Undo & Fix",
        icon: "fa-undo",
        commands: &[
            cmd("git checkout -- file", "Discard changes in a file"),
            cmd("git restore file", "Restore file (modern syntax)"),
            cmd("git reset --soft HEAD~1", "Undo commit, keep changes staged"),
            cmd("git reset --hard HEAD", "Discard all local changes"),
            cmd("git revert <commit>", "Create a new commit undoing changes"),
        ],
        troubleshooting: &[fix(
            "Lost a commit after reset --hard",
            "git reflog to find it, then git reset --hard <commit>",
        )],
    },
    Category {
        name: "Advanced / Stash",
        icon: "fa-box-archive",
        commands: &[
            cmd("git stash", "Save uncommitted changes temporarily"),
            cmd("git stash pop", "Apply and delete latest stash"),
            cmd("git log --oneline --graph", "View clean history graph"),
            cmd("git cherry-pick <commit>", "Apply a commit from another branch"),
            cmd("git bisect start", "Start binary search for bugs"),
        ],
        troubleshooting: &[],
    },
];

pub fn command_count(catalog: &[Category]) -> usize {
    catalog.iter().map(|c| c.commands.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let names: Vec<&str> = CATALOG.iter().map(|c| c.name).collect();
        assert_eq!(names.first(), Some(&"Setup & Configuration"));
        assert_eq!(names.last(), Some(&"Advanced / Stash"));
        assert_eq!(names.len(), 7);
    }

    #[test]
    fn test_every_category_has_commands() {
        for category in CATALOG {
            assert!(!category.commands.is_empty(), "{} is empty", category.name);
            assert!(category.icon.starts_with("fa-"));
        }
    }

    #[test]
    fn test_command_count() {
        assert_eq!(command_count(CATALOG), 36);
        assert_eq!(command_count(&[]), 0);
    }

    #[test]
    fn test_troubleshooting_optional() {
        let create = CATALOG.iter().find(|c| c.name == "Create / Clone").unwrap();
        assert!(!create.has_troubleshooting());
        let remote = CATALOG.iter().find(|c| c.name == "Remote & Sync").unwrap();
        assert_eq!(remote.troubleshooting.len(), 2);
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_string(&CATALOG[1]).unwrap();
        assert!(json.contains("\"name\":\"Create / Clone\""));
        assert!(json.contains("\"command\":\"git clone <url>\""));
        assert!(json.contains("\"troubleshooting\":[]"));
    }
}
