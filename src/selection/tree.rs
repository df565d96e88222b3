use parking_lot::RwLock;

use crate::node_utils::NodeUtils;

/// A node of the data tree, flattened with its indentation level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// DOM-style id, e.g. `image-257`, possibly `copy_image-257` after paste.
    pub id: Option<String>,
    pub name: String,
    pub rel: Option<String>,
    pub class: Option<String>,
    pub fileset: Option<String>,
    pub level: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub page: Option<usize>,
    pub selected: bool,
}

impl TreeNode {
    pub fn new(id: &str, name: &str, rel: &str, level: usize) -> Self {
        Self {
            id: Some(id.to_string()),
            name: name.to_string(),
            rel: Some(rel.to_string()),
            class: None,
            fileset: None,
            level,
            has_children: false,
            is_expanded: false,
            page: None,
            selected: false,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    pub fn with_fileset(mut self, fileset: &str) -> Self {
        self.fileset = Some(fileset.to_string());
        self
    }

    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self.is_expanded = true;
        self
    }

    /// True for `share` and `share-locked` nodes.
    pub fn is_share(&self) -> bool {
        self.rel
            .as_deref()
            .map(|rel| rel.replace("-locked", "") == "share")
            .unwrap_or(false)
    }
}

/// What the selection tracker needs from the hierarchical tree widget.
pub trait TreeWidget: Send + Sync {
    fn selected_nodes(&self) -> Vec<TreeNode>;
    /// The node that owns `id` in the hierarchy (DOM `li > ul > li`).
    fn enclosing_node(&self, id: &str) -> Option<TreeNode>;
    fn last_selected(&self) -> Option<TreeNode>;
    fn node_ids_in_fileset(&self, fileset: &str) -> Vec<String>;
    fn select_node(&self, id: &str) -> bool;
    fn set_page(&self, id: &str, page: usize) -> bool;
    fn refresh_node(&self, id: &str) -> bool;
    /// Make `id` the sole selection, as clicking its anchor would.
    fn activate_node(&self, id: &str) -> bool;
}

/// In-memory tree backing the browse panel.
#[derive(Debug, Default)]
pub struct DataTree {
    pub nodes: Vec<TreeNode>,
    pub cursor: usize,
    last_selected: Option<usize>,
}

impl DataTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self {
            nodes,
            cursor: 0,
            last_selected: None,
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
    }

    pub fn find_parent_node(&self, index: usize) -> Option<usize> {
        let level = self.nodes.get(index)?.level;
        if level == 0 {
            return None;
        }
        (0..index).rev().find(|&i| self.nodes[i].level == level - 1)
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.selected = !node.selected;
            if node.selected {
                self.last_selected = Some(index);
            }
        }
    }

    pub fn select_only(&mut self, index: usize) {
        if index >= self.nodes.len() {
            return;
        }
        for node in self.nodes.iter_mut() {
            node.selected = false;
        }
        self.nodes[index].selected = true;
        self.last_selected = Some(index);
    }

    pub fn deselect_all(&mut self) {
        for node in self.nodes.iter_mut() {
            node.selected = false;
        }
    }

    pub fn current(&self) -> Option<&TreeNode> {
        self.nodes.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.nodes.is_empty() {
            return;
        }
        let max = self.nodes.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    /// Nodes below `index` with deeper level, i.e. its visible subtree.
    fn subtree_end(&self, index: usize) -> usize {
        let level = self.nodes[index].level;
        let mut end = index + 1;
        while end < self.nodes.len() && self.nodes[end].level > level {
            end += 1;
        }
        end
    }
}

impl TreeWidget for RwLock<DataTree> {
    fn selected_nodes(&self) -> Vec<TreeNode> {
        self.read()
            .nodes
            .iter()
            .filter(|n| n.selected)
            .cloned()
            .collect()
    }

    fn enclosing_node(&self, id: &str) -> Option<TreeNode> {
        let tree = self.read();
        let index = tree.position(id)?;
        let parent = tree.find_parent_node(index)?;
        Some(tree.nodes[parent].clone())
    }

    fn last_selected(&self) -> Option<TreeNode> {
        let tree = self.read();
        tree.last_selected.and_then(|i| tree.nodes.get(i).cloned())
    }

    fn node_ids_in_fileset(&self, fileset: &str) -> Vec<String> {
        self.read()
            .nodes
            .iter()
            .filter(|n| n.fileset.as_deref() == Some(fileset))
            .filter_map(|n| n.id.clone())
            .collect()
    }

    fn select_node(&self, id: &str) -> bool {
        let mut tree = self.write();
        match tree.position(id) {
            Some(index) => {
                tree.nodes[index].selected = true;
                tree.last_selected = Some(index);
                true
            }
            None => false,
        }
    }

    fn set_page(&self, id: &str, page: usize) -> bool {
        let mut tree = self.write();
        match tree.position(id) {
            Some(index) => {
                tree.nodes[index].page = Some(page);
                true
            }
            None => false,
        }
    }

    fn refresh_node(&self, id: &str) -> bool {
        let mut tree = self.write();
        let Some(index) = tree.position(id) else {
            return false;
        };
        // Children are reloaded lazily; collapse state survives the refresh.
        let end = tree.subtree_end(index);
        log::debug!(
            "tree: refreshing {} ({} visible children, page {:?})",
            NodeUtils::display_id(&tree.nodes[index]),
            end - index - 1,
            tree.nodes[index].page
        );
        true
    }

    fn activate_node(&self, id: &str) -> bool {
        let mut tree = self.write();
        match tree.position(id) {
            Some(index) => {
                tree.select_only(index);
                tree.cursor = index;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RwLock<DataTree> {
        RwLock::new(DataTree::new(vec![
            TreeNode::new("project-1", "P", "project", 0).with_children(),
            TreeNode::new("dataset-2", "D", "dataset", 1).with_children(),
            TreeNode::new("image-3", "a.tif", "image", 2).with_fileset("7"),
            TreeNode::new("image-4", "b.tif", "image", 2).with_fileset("7"),
            TreeNode::new("image-5", "c.tif", "image", 2),
            TreeNode::new("share-9", "S", "share-locked", 0).with_children(),
            TreeNode::new("image-10", "d.tif", "image", 1),
        ]))
    }

    #[test]
    fn enclosing_node_is_nearest_shallower_node() {
        let tree = sample();
        assert_eq!(
            tree.enclosing_node("image-4").and_then(|n| n.id),
            Some("dataset-2".to_string())
        );
        assert_eq!(
            tree.enclosing_node("image-10").and_then(|n| n.id),
            Some("share-9".to_string())
        );
        assert!(tree.enclosing_node("project-1").is_none());
    }

    #[test]
    fn locked_share_is_still_a_share() {
        let tree = sample();
        assert!(tree.enclosing_node("image-10").unwrap().is_share());
        assert!(!tree.enclosing_node("image-3").unwrap().is_share());
    }

    #[test]
    fn fileset_lookup_and_select() {
        let tree = sample();
        let ids = tree.node_ids_in_fileset("7");
        assert_eq!(ids, vec!["image-3".to_string(), "image-4".to_string()]);
        for id in &ids {
            assert!(tree.select_node(id));
        }
        assert_eq!(tree.selected_nodes().len(), 2);
        assert_eq!(
            tree.last_selected().and_then(|n| n.id),
            Some("image-4".to_string())
        );
    }

    #[test]
    fn activate_replaces_selection() {
        let tree = sample();
        tree.select_node("image-3");
        tree.select_node("image-5");
        assert!(tree.activate_node("dataset-2"));
        let selected = tree.selected_nodes();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id.as_deref(), Some("dataset-2"));
        assert_eq!(tree.read().cursor, 1);
    }

    #[test]
    fn page_and_refresh_unknown_node() {
        let tree = sample();
        assert!(tree.set_page("dataset-2", 3));
        assert_eq!(tree.read().nodes[1].page, Some(3));
        assert!(tree.refresh_node("dataset-2"));
        assert!(!tree.refresh_node("dataset-99"));
    }
}
