//! Smart tree rendering
//!
//! Single-child chains are folded into one line (`github.com/grdl/repo`) and
//! children of a node with several children are printed on their own lines,
//! indented once per multi-child ancestor. The first level below the root is
//! never indented.
//!
//! ```text
//! /repos/
//! github.com/
//!     user/
//!         repo1 main ok
//!         repo2 main ok
//!     another/repo main 1 ahead
//!                  dev no upstream
//! ```

use super::{NodeId, Tree};
use crate::core::TREE_INDENT;
use crate::output::{repo_status, Style};

/// Renders the whole tree into text without a trailing newline
pub fn render(tree: &Tree, style: &Style) -> String {
    let mut renderer = Renderer {
        tree,
        style,
        line_len: 0,
    };
    renderer.node(Tree::ROOT)
}

struct Renderer<'a> {
    tree: &'a Tree,
    style: &'a Style,
    /// Number of characters already on the line the current node starts on
    line_len: usize,
}

impl Renderer<'_> {
    fn node(&mut self, id: NodeId) -> String {
        let tree = self.tree;
        let node = tree.node(id);

        if node.is_leaf() {
            return self.leaf(id);
        }

        let mut out = format!("{}/", node.value.trim_end_matches('/'));

        if tree.is_root(id) {
            out.push('\n');
            for &child in &node.children {
                self.line_len = 0;
                out.push_str(&self.node(child));
                if !tree.is_last_sibling(child) {
                    out.push('\n');
                }
            }
        } else if let [child] = node.children.as_slice() {
            self.line_len += out.chars().count();
            out.push_str(&self.node(*child));
        } else {
            out.push('\n');
            for &child in &node.children {
                let shift = TREE_INDENT.repeat(tree.indent_depth(child));
                self.line_len = shift.chars().count();
                out.push_str(&shift);
                out.push_str(&self.node(child));
                if !tree.is_last_sibling(child) {
                    out.push('\n');
                }
            }
        }

        out
    }

    fn leaf(&self, id: NodeId) -> String {
        let node = self.tree.node(id);
        let Some(status) = &node.repo else {
            return node.value.clone();
        };

        // Other branches line up under the current branch name
        let indent = " ".repeat(self.line_len + node.value.chars().count() + 1);
        format!("{} {}", node.value, repo_status(status, &indent, self.style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{Status, STATUS_DETACHED};
    use std::path::Path;

    /// Clean repository on `main`, in sync with its upstream
    fn clean(path: &str) -> Status {
        let mut status = Status::new(path);
        status.current = "main".to_string();
        status.branches.insert("main".to_string(), String::new());
        status
    }

    fn render_paths(paths: &[&str]) -> String {
        let statuses = paths.iter().map(|&path| clean(path));
        render(&Tree::build(Path::new("root"), statuses), &Style::PLAIN)
    }

    /// Test layouts use tabs for readability
    fn expected(text: &str) -> String {
        text.trim_matches('\n').replace('\t', TREE_INDENT)
    }

    #[test]
    fn test_single_repo_folds_into_one_line() {
        let got = render_paths(&["root/github.com/grdl/repo1"]);
        assert_eq!(got, expected("\nroot/\ngithub.com/grdl/repo1 main ok\n"));
    }

    #[test]
    fn test_folded_parent_with_two_children() {
        let got = render_paths(&["root/github.com/grdl/repo1", "root/github.com/grdl/repo2"]);
        assert_eq!(
            got,
            expected(
                "
root/
github.com/grdl/
\trepo1 main ok
\trepo2 main ok
"
            )
        );
    }

    #[test]
    fn test_top_level_stays_flush_left() {
        let got = render_paths(&["root/gitlab.com/grdl/repo1", "root/github.com/grdl/repo1"]);
        assert_eq!(
            got,
            expected(
                "
root/
gitlab.com/grdl/repo1 main ok
github.com/grdl/repo1 main ok
"
            )
        );
    }

    #[test]
    fn test_branching_indentation() {
        let got = render_paths(&[
            "root/gitlab.com/grdl/repo1",
            "root/gitlab.com/grdl/repo2",
            "root/gitlab.com/other/repo1",
            "root/github.com/grdl/repo1",
            "root/github.com/grdl/nested/repo2",
        ]);
        assert_eq!(
            got,
            expected(
                "
root/
gitlab.com/
\tgrdl/
\t\trepo1 main ok
\t\trepo2 main ok
\tother/repo1 main ok
github.com/grdl/
\trepo1 main ok
\tnested/repo2 main ok
"
            )
        );
    }

    #[test]
    fn test_folded_chain_inside_branch() {
        let got = render_paths(&[
            "root/gitlab.com/grdl/nested/repo1",
            "root/gitlab.com/grdl/nested/repo2",
            "root/gitlab.com/other/repo1",
        ]);
        assert_eq!(
            got,
            expected(
                "
root/
gitlab.com/
\tgrdl/nested/
\t\trepo1 main ok
\t\trepo2 main ok
\tother/repo1 main ok
"
            )
        );
    }

    #[test]
    fn test_folding_does_not_add_depth() {
        let got = render_paths(&[
            "root/gitlab.com/grdl/double/nested/repo1",
            "root/gitlab.com/grdl/nested/repo2",
            "root/gitlab.com/other/repo1",
        ]);
        assert_eq!(
            got,
            expected(
                "
root/
gitlab.com/
\tgrdl/
\t\tdouble/nested/repo1 main ok
\t\tnested/repo2 main ok
\tother/repo1 main ok
"
            )
        );
    }

    #[test]
    fn test_other_branches_align_under_current_branch() {
        let mut repo1 = clean("root/github.com/grdl/repo1");
        repo1.branches.insert("dev".to_string(), "2 ahead".to_string());
        repo1.branches.insert("wip".to_string(), "no upstream".to_string());
        let mut repo2 = clean("root/gitlab.com/x/repo2");
        repo2.branches.insert("dev".to_string(), String::new());
        let repo3 = clean("root/gitlab.com/y");

        let tree = Tree::build(Path::new("root"), vec![repo1, repo2, repo3]);
        let got = render(&tree, &Style::PLAIN);

        assert_eq!(
            got,
            expected(
                "
root/
github.com/grdl/repo1 main ok
                      dev 2 ahead
                      wip no upstream
gitlab.com/
\tx/repo2 main ok
\t        dev ok
\ty main ok
"
            )
        );
    }

    #[test]
    fn test_leaf_with_errors_shows_marker() {
        let mut broken = clean("root/github.com/grdl/broken");
        broken.errors.push("remote failed".to_string());
        broken.branches.insert("dev".to_string(), String::new());
        let ok = clean("root/github.com/grdl/fine");

        let tree = Tree::build(Path::new("root"), vec![broken, ok]);

        assert_eq!(
            render(&tree, &Style::PLAIN),
            expected(
                "
root/
github.com/grdl/
\tbroken error
\tfine main ok
"
            )
        );
    }

    #[test]
    fn test_dirty_and_detached_leaves() {
        let mut dirty = clean("root/a/dirty");
        dirty.worktree = "1 uncommitted".to_string();
        let mut detached = clean("root/a/detached");
        detached.current = STATUS_DETACHED.to_string();

        let tree = Tree::build(Path::new("root"), vec![dirty, detached]);

        assert_eq!(
            render(&tree, &Style::PLAIN),
            expected(
                "
root/
a/
\tdirty main [ 1 uncommitted ]
\tdetached detached HEAD
\t         main ok
"
            )
        );
    }

    #[test]
    fn test_repo_at_root_renders_single_leaf() {
        let tree = Tree::build(Path::new("/repos/single/"), vec![clean("/repos/single")]);
        assert_eq!(render(&tree, &Style::PLAIN), "/repos/single main ok");
    }

    #[test]
    fn test_root_trailing_separator_is_trimmed() {
        let tree = Tree::build(Path::new("/repos/"), vec![clean("/repos/a/b")]);
        assert_eq!(render(&tree, &Style::PLAIN), "/repos/\na/b main ok");
    }
}
