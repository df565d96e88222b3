use crate::actions::items::{AnnotationContainer, AnnotationItem};
use crate::actions::thumbnails::{Thumbnail, ThumbnailGroup};
use crate::actions::toolbar::{Dropdown, DropdownItem, ToolbarAction};
use crate::selection::table::TableRow;
use crate::selection::tree::TreeNode;
use crate::selection::WellElement;

/// Permissions class shared by the demo plate and all of its wells
pub const DEMO_PLATE_CLASS: &str = "canAnnotate canEdit isOwned";
pub const DEMO_PLATE_COLUMNS: usize = 6;

// Helper function to create demo image nodes
fn image(id: u64, name: &str, level: usize) -> TreeNode {
    TreeNode::new(&format!("image-{id}"), name, "image", level).with_class("canAnnotate isOwned")
}

pub fn demo_tree() -> Vec<TreeNode> {
    vec![
        TreeNode::new("experimenter-0", "root", "experimenter", 0).with_children(),
        TreeNode::new("project-1", "Mitosis screen", "project", 1)
            .with_children()
            .with_class("canEdit isOwned"),
        TreeNode::new("dataset-2", "Live cells", "dataset", 2)
            .with_children()
            .with_class("canEdit isOwned"),
        image(251, "cell_01.tif", 3),
        image(252, "cell_02.tif", 3),
        image(253, "stack_A [0].dv", 3).with_fileset("31"),
        image(254, "stack_A [1].dv", 3).with_fileset("31"),
        image(255, "stack_A [2].dv", 3).with_fileset("31"),
        TreeNode::new("dataset-3", "Fixed cells", "dataset", 2)
            .with_children()
            .with_class("canEdit isOwned"),
        image(256, "fixed_01.tif", 3),
        TreeNode::new("copy_image-257", "cell_03.tif (copy)", "image", 3)
            .with_class("canAnnotate isOwned"),
        TreeNode::new("orphaned-0", "Orphaned images", "orphaned", 1).with_children(),
        image(260, "loose.png", 2),
        TreeNode::new("plate-7", "Screen plate 1", "plate", 1).with_class(DEMO_PLATE_CLASS),
        TreeNode::new("share-42", "Shared with lab", "share", 0).with_children(),
        image(301, "shared_a.tif", 1).with_class("canAnnotate"),
        image(302, "shared_b.tif", 1).with_class("canAnnotate"),
        TreeNode::new("share-43", "Locked share", "share-locked", 0).with_children(),
        image(310, "locked.tif", 1).with_class(""),
    ]
}

pub fn demo_table() -> Vec<TableRow> {
    vec![
        TableRow::new("image-251", "cell_01.tif"),
        TableRow::new("image-252", "cell_02.tif"),
        TableRow::new("image-253-fileset", "stack_A [0].dv"),
        TableRow::new("image-254-fileset", "stack_A [1].dv"),
        TableRow::new("dataset-2", "Live cells"),
        TableRow::new("dataset-3", "Fixed cells"),
        TableRow::new("image-256", "fixed_01.tif"),
        TableRow::new("image-260", "loose.png"),
        TableRow::new("share-42", "Shared with lab"),
        TableRow::new("project-1", "Mitosis screen"),
    ]
}

/// Wells of a 2 x 6 plate, row-major.
pub fn demo_wells() -> Vec<(String, WellElement)> {
    let mut wells = Vec::new();
    for (r, row) in ["A", "B"].iter().enumerate() {
        for col in 1..=DEMO_PLATE_COLUMNS {
            let id = 100 + r * DEMO_PLATE_COLUMNS + col;
            wells.push((format!("{row}{col}"), WellElement::new(&format!("well={id}"), "well")));
        }
    }
    wells
}

fn annotation(element_id: &str, text: &str) -> AnnotationItem {
    AnnotationItem {
        element_id: element_id.to_string(),
        text: text.to_string(),
        locked: false,
    }
}

pub fn demo_annotations() -> Vec<AnnotationContainer> {
    vec![
        AnnotationContainer::new(
            "Tags",
            vec![
                annotation("12-tag", "mitosis"),
                annotation("13-tag", "prophase"),
            ],
        ),
        AnnotationContainer::new(
            "Attachments",
            vec![AnnotationItem {
                element_id: "88-file".to_string(),
                text: "analysis.csv (locked)".to_string(),
                locked: true,
            }],
        ),
        AnnotationContainer::new("Comments", vec![annotation("461-comment", "Nice spindle")]),
    ]
}

pub fn demo_thumbnails() -> Vec<Thumbnail> {
    let mut thumbs: Vec<Thumbnail> = (251..=256)
        .map(|id| {
            Thumbnail::new(
                ThumbnailGroup::DatasetIcons,
                &id.to_string(),
                &format!("/webgateway/render_thumbnail/{id}/96/"),
            )
        })
        .collect();
    thumbs.extend((301..=302).map(|id| {
        Thumbnail::new(
            ThumbnailGroup::Spw,
            &format!("image-{id}"),
            &format!("/webgateway/render_thumbnail/size/96/{id}/"),
        )
    }));
    thumbs.push(Thumbnail::new(
        ThumbnailGroup::Viewport,
        "viewport-img",
        "/webgateway/render_image/251/",
    ));
    thumbs
}

pub fn demo_toolbar() -> Vec<Dropdown> {
    vec![
        Dropdown::new(
            "Selection",
            vec![
                DropdownItem::new("Add to basket      b", ToolbarAction::AddToBasket).with_hotkey('b'),
                DropdownItem::new("Select fileset     f", ToolbarAction::SelectFileset).with_hotkey('f'),
                DropdownItem::new("Edit share         s", ToolbarAction::EditShare).with_hotkey('s'),
                DropdownItem::new("Clear selection    x", ToolbarAction::ClearSelection).with_hotkey('x'),
            ],
        ),
        Dropdown::new(
            "Annotations",
            vec![
                DropdownItem::new("Remove             d", ToolbarAction::RemoveAnnotation).with_hotkey('d'),
                DropdownItem::new("Delete             D", ToolbarAction::DeleteAnnotation).with_hotkey('D'),
                DropdownItem::new("Refresh thumbnails r", ToolbarAction::RefreshThumbnails)
                    .with_hotkey('r'),
            ],
        ),
        Dropdown::new(
            "Figures",
            vec![
                DropdownItem::new("Split View Figure", ToolbarAction::RunFigureScript("split_view".into())),
                DropdownItem::new("ROI Figure", ToolbarAction::RunFigureScript("roi_figure".into())),
                DropdownItem::new("Movie Figure", ToolbarAction::RunFigureScript("movie_figure".into()))
                    .disabled(),
            ],
        ),
        Dropdown::new(
            "File",
            vec![DropdownItem::new("Exit               q", ToolbarAction::Quit).with_hotkey('q')],
        ),
    ]
}

/// Tooltip source text for a tree node, `title - detail - detail`
pub fn tooltip_html(node: &TreeNode) -> String {
    let mut parts = vec![node.name.clone()];
    if let Some(rel) = &node.rel {
        parts.push(format!("Type: {rel}"));
    }
    if let Some(id) = &node.id {
        parts.push(format!("ID: {id}"));
    }
    if let Some(fileset) = &node.fileset {
        parts.push(format!("Fileset: {fileset}"));
    }
    if let Some(page) = node.page {
        parts.push(format!("Page: {page}"));
    }
    parts.join(" - ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_fileset_has_three_images() {
        let count = demo_tree()
            .iter()
            .filter(|n| n.fileset.as_deref() == Some("31"))
            .count();
        assert_eq!(count, 3);
    }

    #[test]
    fn wells_use_equals_ids() {
        let wells = demo_wells();
        assert_eq!(wells.len(), 12);
        assert_eq!(wells[0].0, "A1");
        assert_eq!(wells[0].1.id.as_deref(), Some("well=101"));
        assert_eq!(wells[11].0, "B6");
    }
}
