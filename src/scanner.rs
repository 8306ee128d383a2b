use log::debug;
use serde::Serialize;
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn file(name: impl Into<String>) -> Self {
        TreeNode {
            name: name.into(),
            kind: NodeKind::File,
            children: None,
        }
    }

    pub fn folder(name: impl Into<String>) -> Self {
        TreeNode {
            name: name.into(),
            kind: NodeKind::Folder,
            children: Some(Vec::new()),
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(TreeNode::node_count)
            .sum::<usize>()
    }
}

/// Walks the directory breadth-first and mirrors it as a tree of nodes.
/// Children keep the order `read_dir` lists them in; nothing is filtered.
pub fn scan_directory(root: &Path) -> io::Result<TreeNode> {
    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let mut tree = TreeNode::folder(name);

    // Queue of (directory path, index path to that directory's children list).
    let mut queue: VecDeque<(PathBuf, Vec<usize>)> = VecDeque::new();
    queue.push_back((root.to_path_buf(), Vec::new()));

    while let Some((dir, slot)) = queue.pop_front() {
        debug!("scanning {}", dir.display());
        let children = children_at(&mut tree, &slot);

        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if entry.path().is_dir() {
                children.push(TreeNode::folder(name));
                let mut child_slot = slot.clone();
                child_slot.push(children.len() - 1);
                queue.push_back((entry.path(), child_slot));
            } else {
                children.push(TreeNode::file(name));
            }
        }
    }

    Ok(tree)
}

fn children_at<'a>(tree: &'a mut TreeNode, slot: &[usize]) -> &'a mut Vec<TreeNode> {
    let mut node = tree;
    for &index in slot {
        let children = node
            .children
            .as_mut()
            .expect("queued slots always address folder nodes");
        node = &mut children[index];
    }
    node.children
        .as_mut()
        .expect("queued slots always address folder nodes")
}
