//! Path tree of repositories
//!
//! Every node is one path segment below the listing root. Nodes live in a
//! flat arena and refer to each other by [`NodeId`]; parents own their
//! children through the arena and a child only keeps its parent's index.

mod render;

pub use render::render;

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path};

use crate::git::Status;

/// Index of a node inside its [`Tree`]
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Raw path segment, used to tell siblings apart
    pub name: OsString,
    /// Path segment as displayed, or the root path for the root node
    pub value: String,
    pub parent: Option<NodeId>,
    /// In insertion order, unique by value
    pub children: Vec<NodeId>,
    /// Present on the last segment of a repository path
    pub repo: Option<Status>,
}

impl Node {
    fn new(name: OsString, parent: Option<NodeId>) -> Self {
        Self {
            value: name.to_string_lossy().into_owned(),
            name,
            parent,
            children: Vec::new(),
            repo: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = 0;

    /// Creates a tree with only the root node
    pub fn new(root: impl Into<OsString>) -> Self {
        Self {
            nodes: vec![Node::new(root.into(), None)],
        }
    }

    /// Builds a tree out of statuses of repositories found under `root`
    ///
    /// A repository located at `root` itself gets its status attached to the
    /// root node.
    pub fn build(root: &Path, statuses: impl IntoIterator<Item = Status>) -> Self {
        let mut tree = Self::new(root_label(root));

        for status in statuses {
            let relative = status.path.strip_prefix(root).unwrap_or(&status.path);
            let segments: Vec<OsString> = relative
                .components()
                .filter_map(|component| match component {
                    Component::Normal(segment) => Some(segment.to_os_string()),
                    _ => None,
                })
                .collect();

            let mut node = Self::ROOT;
            for segment in segments {
                node = match tree.child(node, &segment) {
                    Some(child) => child,
                    None => tree.add_child(node, segment),
                };
            }
            tree.nodes[node].repo = Some(status);
        }

        tree
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root().is_leaf() && self.root().repo.is_none()
    }

    /// Finds a direct child of `parent` with the given raw name
    pub fn child(&self, parent: NodeId, name: impl AsRef<OsStr>) -> Option<NodeId> {
        let name = name.as_ref();
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].name == name)
    }

    /// Appends a new child to `parent` and returns its id
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<OsString>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(name.into(), Some(parent)));
        self.nodes[parent].children.push(id);
        id
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.nodes[id].parent.is_none()
    }

    /// Number of ancestors with more than one child, not counting the root
    ///
    /// Folded single-child chains don't add to the depth.
    pub fn indent_depth(&self, id: NodeId) -> usize {
        self.ancestors(id)
            .filter(|&ancestor| !self.is_root(ancestor) && self.nodes[ancestor].children.len() > 1)
            .count()
    }

    pub fn is_last_sibling(&self, id: NodeId) -> bool {
        match self.nodes[id].parent {
            Some(parent) => self.nodes[parent].children.last() == Some(&id),
            None => true,
        }
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id].parent, |&node| self.nodes[node].parent)
    }
}

/// Root path as displayed, without trailing separators
fn root_label(root: &Path) -> String {
    let label = root.to_string_lossy();
    let trimmed = label.trim_end_matches(std::path::MAIN_SEPARATOR);
    if trimmed.is_empty() {
        label.into_owned()
    } else {
        trimmed.to_string()
    }
}
