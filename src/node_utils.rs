use crate::selection::tree::TreeNode;

const COPY_PREFIX: &str = "copy_";

/// Utility functions for the DOM-style ids used by tree, table and plate
pub struct NodeUtils;

impl NodeUtils {
    /// Id for log lines, `<no id>` when the node has none
    pub fn display_id(node: &TreeNode) -> &str {
        node.id.as_deref().unwrap_or("<no id>")
    }

    /// Nodes pasted into another container carry a `copy_` prefix
    pub fn strip_copy_prefix(id: &str) -> &str {
        id.strip_prefix(COPY_PREFIX).unwrap_or(id)
    }

    /// Split `TYPE-ID[-SUFFIX...]` into (`TYPE-ID`, `SUFFIX...`).
    ///
    /// Returns `None` when there are not at least two segments.
    pub fn split_table_id(id: &str) -> Option<(String, String)> {
        let segments: Vec<&str> = id.split('-').collect();
        if segments.len() < 2 || segments[0].is_empty() {
            return None;
        }
        Some((segments[..2].join("-"), segments[2..].join("-")))
    }

    /// Second hyphen-delimited segment, e.g. `42` in `share-42`
    pub fn second_segment(id: &str) -> Option<&str> {
        id.split('-').nth(1).filter(|s| !s.is_empty())
    }

    /// Wells use `=` between type and id; the rest of the client uses `-`
    pub fn normalize_well_id(id: &str) -> String {
        id.replacen('=', "-", 1)
    }

    /// `image-257` becomes `image=257`, as the basket form expects
    pub fn to_query_pair(id: &str) -> String {
        id.replacen('-', "=", 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_ids_split_into_id_and_suffix() {
        assert_eq!(
            NodeUtils::split_table_id("image-257-thumb"),
            Some(("image-257".to_string(), "thumb".to_string()))
        );
        assert_eq!(
            NodeUtils::split_table_id("dataset-42"),
            Some(("dataset-42".to_string(), String::new()))
        );
        assert_eq!(
            NodeUtils::split_table_id("image-1-a-b"),
            Some(("image-1".to_string(), "a-b".to_string()))
        );
        assert_eq!(NodeUtils::split_table_id("orphan"), None);
        assert_eq!(NodeUtils::split_table_id(""), None);
    }

    #[test]
    fn copy_prefix_is_stripped_once() {
        assert_eq!(NodeUtils::strip_copy_prefix("copy_dataset-123"), "dataset-123");
        assert_eq!(NodeUtils::strip_copy_prefix("dataset-123"), "dataset-123");
    }

    #[test]
    fn well_and_query_conversions() {
        assert_eq!(NodeUtils::normalize_well_id("well=12"), "well-12");
        assert_eq!(NodeUtils::to_query_pair("image-257"), "image=257");
        assert_eq!(NodeUtils::second_segment("share-42"), Some("42"));
        assert_eq!(NodeUtils::second_segment("share"), None);
    }
}
