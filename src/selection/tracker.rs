use std::sync::Arc;
use std::time::Duration;

use super::debounce::DebouncedTask;
use super::store::SelectionStore;
use super::table::RowTable;
use super::tree::TreeWidget;
use super::types::{
    CenterContainers, ClickModifiers, MultiKey, PaginationView, SelectedObject, WellElement,
};
use crate::node_utils::NodeUtils;

/// Normalizes selection events from the tree, table and plate widgets into
/// [`SelectedObject`] lists and publishes them to the [`SelectionStore`].
pub struct SelectionTracker {
    store: Arc<SelectionStore>,
    debounce: DebouncedTask,
    multi_key: MultiKey,
}

impl SelectionTracker {
    pub fn new(store: Arc<SelectionStore>, debounce_delay: Duration, multi_key: MultiKey) -> Self {
        Self {
            store,
            debounce: DebouncedTask::new(debounce_delay),
            multi_key,
        }
    }

    pub fn multi_key(&self) -> MultiKey {
        self.multi_key
    }

    /// Tree selection or deselection happened. The tree is read once the
    /// debounce delay has passed, so deselect-then-select bursts publish
    /// only the final state.
    pub fn tree_selection_changed(&self, tree: Arc<dyn TreeWidget>) {
        let store = Arc::clone(&self.store);
        self.debounce.schedule(move || {
            store.publish(descriptors_from_tree(tree.as_ref()));
        });
    }

    pub fn clear_selected(&self, force_refresh: bool) {
        self.debounce.cancel();
        self.store.clear(force_refresh);
    }

    /// Plate field or acquisition index changed for the last selected node.
    pub fn field_selection_changed(&self, tree: &dyn TreeWidget, field: usize) {
        let Some(id) = tree.last_selected().and_then(|n| n.id) else {
            log::debug!("selection: field {field} changed with no selected tree node");
            return;
        };
        self.store
            .publish(vec![SelectedObject::new(id).with_index(field)]);
    }

    /// Select every visible tree node that belongs to `fileset`. The tree's
    /// own change notification builds the descriptors.
    pub fn select_fileset_images(&self, tree: Arc<dyn TreeWidget>, fileset: &str) -> usize {
        let ids = tree.node_ids_in_fileset(fileset);
        let selected = ids.iter().filter(|id| tree.select_node(id)).count();
        log::info!("selection: selected {selected} image(s) of fileset {fileset}");
        if selected > 0 {
            self.tree_selection_changed(tree);
        }
        selected
    }

    /// A share was edited; refresh panels for it directly.
    pub fn share_selection_changed(&self, share_id: &str) {
        self.store.publish(vec![SelectedObject::new(share_id)]);
    }

    pub fn table_selection_changed<S: AsRef<str>>(&self, row_ids: &[S]) {
        self.store.publish(descriptors_from_table(row_ids));
    }

    /// Click on a results table row, honouring shift and the multi key.
    pub fn handle_table_click(&self, table: &mut RowTable, index: usize, modifiers: ClickModifiers) {
        table.handle_click(index, modifiers, self.multi_key);
        let ids = table.selected_ids();
        self.table_selection_changed(ids.as_slice());
    }

    pub fn well_selection_changed(&self, wells: &[WellElement], well_index: usize, plate_class: &str) {
        self.store
            .publish(descriptors_from_wells(wells, well_index, plate_class));
    }

    /// Pagination control of the `view` ("icon" or "table") container was
    /// used. Store `page` on the tree node that owns the container, refresh
    /// it and reselect it so every panel reloads for the new page.
    pub fn do_pagination(
        &self,
        tree: Arc<dyn TreeWidget>,
        center: &CenterContainers,
        view: &str,
        page: usize,
    ) -> bool {
        let Some(view) = PaginationView::from_name(view) else {
            log::debug!("selection: unknown pagination view '{view}'");
            return false;
        };
        let Some(container_rel) = center.rel_for(view) else {
            log::debug!("selection: no {view:?} container on screen");
            return false;
        };
        let Some((parent_id, _)) = NodeUtils::split_table_id(container_rel) else {
            log::debug!("selection: {view:?} container has malformed rel '{container_rel}'");
            return false;
        };
        if !tree.set_page(&parent_id, page) {
            log::debug!("selection: pagination parent {parent_id} not in tree");
            return false;
        }
        tree.refresh_node(&parent_id);
        tree.activate_node(&parent_id);
        log::debug!("selection: {view:?} view of {parent_id} moved to page {page}");
        self.tree_selection_changed(tree);
        true
    }
}

/// Descriptors for the current tree selection.
///
/// A lone selection inside a share (locked or not) is tagged with the
/// share's numeric id.
pub fn descriptors_from_tree(tree: &dyn TreeWidget) -> Vec<SelectedObject> {
    let selected = tree.selected_nodes();

    let share_id = match selected.as_slice() {
        [only] => only
            .id
            .as_deref()
            .and_then(|id| tree.enclosing_node(id))
            .filter(|parent| parent.is_share())
            .and_then(|parent| parent.id)
            .and_then(|id| NodeUtils::second_segment(&id).map(str::to_string)),
        _ => None,
    };

    selected
        .into_iter()
        .filter_map(|node| {
            let Some(raw_id) = node.id.as_deref() else {
                log::debug!("selection: skipping tree node '{}' without id", node.name);
                return None;
            };
            Some(SelectedObject {
                id: NodeUtils::strip_copy_prefix(raw_id).to_string(),
                rel: node.rel.clone(),
                class: node.class.clone(),
                fileset: node.fileset.clone(),
                share: share_id.clone(),
                ..Default::default()
            })
        })
        .collect()
}

/// Row ids are `TYPE-ID`, optionally followed by `-SUFFIX` segments that
/// web extensions add.
pub fn descriptors_from_table<S: AsRef<str>>(row_ids: &[S]) -> Vec<SelectedObject> {
    row_ids
        .iter()
        .filter_map(|raw| {
            let raw = raw.as_ref();
            match NodeUtils::split_table_id(raw) {
                Some((id, suffix)) => Some(SelectedObject {
                    id,
                    id_suffix: Some(suffix),
                    ..Default::default()
                }),
                None => {
                    log::debug!("selection: skipping table row with id '{raw}'");
                    None
                }
            }
        })
        .collect()
}

/// Wells inherit the plate's permission class.
pub fn descriptors_from_wells(
    wells: &[WellElement],
    well_index: usize,
    plate_class: &str,
) -> Vec<SelectedObject> {
    wells
        .iter()
        .filter_map(|well| {
            let Some(id) = well.id.as_deref().filter(|id| !id.is_empty()) else {
                log::debug!("selection: skipping well without id");
                return None;
            };
            Some(
                SelectedObject::new(NodeUtils::normalize_well_id(id))
                    .with_rel(well.rel.clone())
                    .with_class(Some(plate_class.to_string()))
                    .with_index(well_index),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::store::SelectionListener;
    use crate::selection::table::TableRow;
    use crate::selection::tree::{DataTree, TreeNode};
    use parking_lot::{Mutex, RwLock};

    fn tree() -> Arc<RwLock<DataTree>> {
        Arc::new(RwLock::new(DataTree::new(vec![
            TreeNode::new("project-1", "P", "project", 0).with_children(),
            TreeNode::new("dataset-2", "D", "dataset", 1)
                .with_children()
                .with_class("canEdit"),
            TreeNode::new("image-3", "a.tif", "image", 2).with_fileset("7"),
            TreeNode::new("image-4", "b.tif", "image", 2).with_fileset("7"),
            TreeNode::new("copy_image-5", "c.tif", "image", 2),
            TreeNode::new("share-42", "S", "share", 0).with_children(),
            TreeNode::new("image-10", "d.tif", "image", 1),
            TreeNode::new("image-11", "e.tif", "image", 1),
            TreeNode::new("share-43", "L", "share-locked", 0).with_children(),
            TreeNode::new("image-12", "f.tif", "image", 1),
        ])))
    }

    fn tracker() -> (SelectionTracker, Arc<SelectionStore>) {
        let store = Arc::new(SelectionStore::new());
        let tracker =
            SelectionTracker::new(Arc::clone(&store), Duration::from_millis(10), MultiKey::Ctrl);
        (tracker, store)
    }

    fn record(store: &SelectionStore) -> Arc<Mutex<Vec<Vec<String>>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener: Arc<dyn SelectionListener> =
            Arc::new(move |objs: &[SelectedObject], _force: bool| {
                sink.lock().push(objs.iter().map(|o| o.id.clone()).collect());
            });
        store.subscribe(listener);
        seen
    }

    #[test]
    fn single_image_in_share_gets_share_id() {
        let t = tree();
        t.select_node("image-10");
        let objs = descriptors_from_tree(&*t);
        assert_eq!(objs.len(), 1);
        assert_eq!(objs[0].share.as_deref(), Some("42"));
        assert_eq!(objs[0].rel.as_deref(), Some("image"));
    }

    #[test]
    fn single_image_outside_share_has_no_share_id() {
        let t = tree();
        t.select_node("image-3");
        let objs = descriptors_from_tree(&*t);
        assert_eq!(objs.len(), 1);
        assert_eq!(objs[0].id, "image-3");
        assert!(objs[0].share.is_none());
    }

    #[test]
    fn locked_share_also_tags_share_id() {
        let t = tree();
        t.select_node("image-12");
        let objs = descriptors_from_tree(&*t);
        assert_eq!(objs[0].share.as_deref(), Some("43"));
    }

    #[test]
    fn multiple_selection_never_tags_share() {
        let t = tree();
        t.select_node("image-10");
        t.select_node("image-11");
        let objs = descriptors_from_tree(&*t);
        assert_eq!(objs.len(), 2);
        assert!(objs.iter().all(|o| o.share.is_none()));
    }

    #[test]
    fn tree_descriptors_carry_fileset_class_and_strip_copy() {
        let t = tree();
        t.select_node("image-3");
        t.select_node("copy_image-5");
        t.select_node("dataset-2");
        let objs = descriptors_from_tree(&*t);
        let ids: Vec<&str> = objs.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["dataset-2", "image-3", "image-5"]);
        assert_eq!(objs[0].class.as_deref(), Some("canEdit"));
        assert_eq!(objs[1].fileset.as_deref(), Some("7"));
        assert!(objs[2].fileset.is_none());
    }

    #[test]
    fn nodes_without_id_are_skipped() {
        let t = tree();
        {
            let mut guard = t.write();
            guard.nodes[6].id = None;
            guard.nodes[6].selected = true;
            guard.nodes[7].selected = true;
        }
        let objs = descriptors_from_tree(&*t);
        assert_eq!(objs.len(), 1);
        assert_eq!(objs[0].id, "image-11");
    }

    #[tokio::test(start_paused = true)]
    async fn deselect_then_reselect_publishes_once() {
        let (tracker, store) = tracker();
        let seen = record(&store);
        let t = tree();

        t.write().deselect_all();
        tracker.tree_selection_changed(t.clone());
        t.select_node("image-3");
        tracker.tree_selection_changed(t.clone());
        assert!(tracker.debounce.is_pending());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*seen.lock(), vec![vec!["image-3".to_string()]]);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_then_select_delivers_one_change() {
        let (tracker, store) = tracker();
        let seen = record(&store);

        tracker.clear_selected(false);
        tracker.share_selection_changed("share-42");

        assert_eq!(*seen.lock(), vec![vec!["share-42".to_string()]]);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_tree_publish() {
        let (tracker, store) = tracker();
        let t = tree();
        t.select_node("image-3");
        tracker.tree_selection_changed(t.clone());
        tracker.clear_selected(true);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fileset_quick_select_publishes_members() {
        let (tracker, store) = tracker();
        let t = tree();
        let count = tracker.select_fileset_images(t.clone(), "7");
        assert_eq!(count, 2);

        tokio::time::sleep(Duration::from_millis(20)).await;
        let objs = store.current();
        assert_eq!(objs.len(), 2);
        assert!(objs.iter().all(|o| o.fileset.as_deref() == Some("7")));
    }

    #[test]
    fn field_change_uses_last_selected_node() {
        let (tracker, store) = tracker();
        let t = tree();
        tracker.field_selection_changed(&*t, 2);
        assert!(store.is_empty());

        t.select_node("image-4");
        tracker.field_selection_changed(&*t, 2);
        assert_eq!(store.current(), vec![SelectedObject::new("image-4").with_index(2)]);
    }

    #[test]
    fn table_ids_are_split_into_descriptors() {
        let objs = descriptors_from_table(&["image-257-thumb", "dataset-42", "junk"]);
        assert_eq!(objs.len(), 2);
        assert_eq!(objs[0].id, "image-257");
        assert_eq!(objs[0].id_suffix.as_deref(), Some("thumb"));
        assert_eq!(objs[1].id, "dataset-42");
        assert_eq!(objs[1].id_suffix.as_deref(), Some(""));
    }

    #[test]
    fn table_click_publishes_marked_rows() {
        let (tracker, store) = tracker();
        let mut table = RowTable::new(
            (0..6)
                .map(|i| TableRow::new(&format!("image-{i}"), "x"))
                .collect(),
        );
        tracker.handle_table_click(&mut table, 1, ClickModifiers::plain());
        tracker.handle_table_click(&mut table, 3, ClickModifiers::shift());
        let ids: Vec<String> = store.current().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["image-1", "image-2", "image-3"]);

        tracker.handle_table_click(&mut table, 2, ClickModifiers::multi(MultiKey::Ctrl));
        let ids: Vec<String> = store.current().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["image-1", "image-3"]);
    }

    #[test]
    fn wells_normalize_ids_and_inherit_plate_class() {
        let wells = vec![
            WellElement::new("well=12", "well"),
            WellElement { id: None, rel: None },
            WellElement::new("well=13", "well"),
        ];
        let objs = descriptors_from_wells(&wells, 1, "canAnnotate isOwned");
        assert_eq!(objs.len(), 2);
        assert_eq!(objs[0].id, "well-12");
        assert_eq!(objs[0].index, Some(1));
        assert_eq!(objs[0].class.as_deref(), Some("canAnnotate isOwned"));
        assert_eq!(objs[1].rel.as_deref(), Some("well"));
    }

    #[tokio::test(start_paused = true)]
    async fn pagination_pages_and_reselects_parent() {
        let (tracker, store) = tracker();
        let t = tree();
        t.select_node("image-3");

        let center = CenterContainers::showing("dataset-2");
        assert!(tracker.do_pagination(t.clone(), &center, "icon", 3));
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(t.read().nodes[1].page, Some(3));
        let objs = store.current();
        assert_eq!(objs.len(), 1);
        assert_eq!(objs[0].id, "dataset-2");
    }

    #[tokio::test(start_paused = true)]
    async fn table_view_pages_its_own_container() {
        let (tracker, _store) = tracker();
        let t = tree();
        let center = CenterContainers {
            icon_rel: Some("dataset-2-icon".to_string()),
            table_rel: Some("project-1-table".to_string()),
        };

        assert!(tracker.do_pagination(t.clone(), &center, "table", 2));
        assert_eq!(t.read().nodes[0].page, Some(2));
        assert_eq!(t.read().nodes[1].page, None);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_view_or_missing_container_is_skipped() {
        let (tracker, store) = tracker();
        let t = tree();
        let center = CenterContainers::showing("dataset-2");

        assert!(!tracker.do_pagination(t.clone(), &center, "list", 2));
        assert!(!tracker.do_pagination(t.clone(), &CenterContainers::default(), "icon", 2));
        let malformed = CenterContainers {
            icon_rel: Some("nonsense".to_string()),
            table_rel: None,
        };
        assert!(!tracker.do_pagination(t.clone(), &malformed, "icon", 2));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(t.read().nodes.iter().all(|n| n.page.is_none()));
        assert!(store.is_empty());
    }
}
