//! Sidebar file tree state.
//!
//! The tree shows a fixed mock project; nothing is read from disk. Folders are
//! keyed by their full path so two folders with the same name expand
//! independently.

use std::collections::HashSet;

/// One file or folder of the mock project.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: &'static str,
    /// `None` for files, `Some` (possibly empty) for folders.
    pub children: Option<Vec<Node>>,
}

fn dir(name: &'static str, children: Vec<Node>) -> Node {
    Node {
        name,
        children: Some(children),
    }
}

fn file(name: &'static str) -> Node {
    Node {
        name,
        children: None,
    }
}

/// The mock project shown in the sidebar.
pub fn mock_structure() -> Vec<Node> {
    vec![
        dir(
            "src",
            vec![
                dir(
                    "components",
                    vec![
                        file("Button.tsx"),
                        file("Card.tsx"),
                        file("Input.tsx"),
                        file("Modal.tsx"),
                        file("Navbar.tsx"),
                    ],
                ),
                dir(
                    "pages",
                    vec![
                        file("index.tsx"),
                        file("about.tsx"),
                        file("contact.tsx"),
                        file("_app.tsx"),
                    ],
                ),
                dir("styles", vec![file("globals.css"), file("Home.module.css")]),
                dir("utils", vec![file("api.ts"), file("helpers.ts")]),
            ],
        ),
        dir(
            "public",
            vec![
                dir("images", vec![file("logo.svg"), file("hero.jpg")]),
                dir("fonts", vec![]),
            ],
        ),
        file("package.json"),
        file("tsconfig.json"),
        file("README.md"),
    ]
}

/// A visible line of the flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub path: String,
    pub name: &'static str,
    pub depth: usize,
    pub is_dir: bool,
    pub expanded: bool,
}

/// Expansion and selection state over [`mock_structure`].
#[derive(Debug)]
pub struct FileTree {
    roots: Vec<Node>,
    expanded: HashSet<String>,
    selected: usize,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new(mock_structure())
    }
}

impl FileTree {
    /// Starts with every folder collapsed and the first row selected.
    pub fn new(roots: Vec<Node>) -> Self {
        Self {
            roots,
            expanded: HashSet::new(),
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Rows currently visible, in display order.
    pub fn visible_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.flatten(&self.roots, "", 0, &mut rows);
        rows
    }

    fn flatten(&self, nodes: &[Node], prefix: &str, depth: usize, rows: &mut Vec<TreeRow>) {
        for node in nodes {
            let path = if prefix.is_empty() {
                node.name.to_owned()
            } else {
                format!("{prefix}/{}", node.name)
            };
            let expanded = self.expanded.contains(&path);
            rows.push(TreeRow {
                path: path.clone(),
                name: node.name,
                depth,
                is_dir: node.children.is_some(),
                expanded,
            });
            if let (Some(children), true) = (&node.children, expanded) {
                self.flatten(children, &path, depth + 1, rows);
            }
        }
    }

    pub fn select_next(&mut self) {
        let last = self.visible_rows().len().saturating_sub(1);
        self.selected = (self.selected + 1).min(last);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Expands or collapses the selected folder. Files are left alone.
    ///
    /// Returns the path of the selected row.
    pub fn toggle_selected(&mut self) -> Option<String> {
        let row = self.visible_rows().into_iter().nth(self.selected)?;
        if row.is_dir && !self.expanded.remove(&row.path) {
            self.expanded.insert(row.path.clone());
        }
        Some(row.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tree: &FileTree) -> Vec<&'static str> {
        tree.visible_rows().iter().map(|r| r.name).collect()
    }

    #[test]
    fn starts_collapsed() {
        let tree = FileTree::default();
        assert_eq!(
            names(&tree),
            vec!["src", "public", "package.json", "tsconfig.json", "README.md"]
        );
    }

    #[test]
    fn toggling_a_folder_shows_and_hides_children() {
        let mut tree = FileTree::default();
        assert_eq!(tree.toggle_selected().as_deref(), Some("src"));
        assert_eq!(&names(&tree)[..3], &["src", "components", "pages"]);

        tree.select_next();
        tree.toggle_selected();
        let rows = tree.visible_rows();
        let button = rows.iter().find(|r| r.name == "Button.tsx").unwrap();
        assert_eq!(button.path, "src/components/Button.tsx");
        assert_eq!(button.depth, 2);

        tree.select_prev();
        tree.toggle_selected();
        assert_eq!(names(&tree).len(), 5);
    }

    #[test]
    fn files_do_not_toggle() {
        let mut tree = FileTree::default();
        for _ in 0..2 {
            tree.select_next();
        }
        assert_eq!(tree.toggle_selected().as_deref(), Some("package.json"));
        assert_eq!(names(&tree).len(), 5);
    }

    #[test]
    fn selection_stays_in_range() {
        let mut tree = FileTree::default();
        for _ in 0..20 {
            tree.select_next();
        }
        assert_eq!(tree.selected(), 4);
        for _ in 0..20 {
            tree.select_prev();
        }
        assert_eq!(tree.selected(), 0);
    }

    #[test]
    fn empty_folders_still_expand() {
        let mut tree = FileTree::default();
        tree.select_next();
        tree.toggle_selected();
        tree.select_next();
        tree.select_next();
        tree.toggle_selected();
        let rows = tree.visible_rows();
        let fonts = rows.iter().find(|r| r.name == "fonts").unwrap();
        assert!(fonts.is_dir && fonts.expanded);
    }
}
