use parking_lot::Mutex;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::collections::BTreeMap;

use crate::actions::AnnotationPanel;
use crate::selection::{SelectedObject, SelectionListener};

/// Right-hand panel. Rebuilds its summary whenever a selection change is
/// delivered; between deliveries it keeps showing the last one.
pub struct MetadataPanel {
    displayed: Mutex<Vec<SelectedObject>>,
    summary: Mutex<Vec<(String, String)>>,
}

impl MetadataPanel {
    pub fn new() -> Self {
        Self {
            displayed: Mutex::new(Vec::new()),
            summary: Mutex::new(vec![("".to_string(), "Select an object".to_string())]),
        }
    }

    /// Objects the panel is showing. Annotation actions act on these, which
    /// can outlive the live selection after an un-forced clear.
    pub fn displayed(&self) -> Vec<SelectedObject> {
        self.displayed.lock().clone()
    }

    pub fn summary(&self) -> Vec<(String, String)> {
        self.summary.lock().clone()
    }

    fn describe(objects: &[SelectedObject]) -> Vec<(String, String)> {
        match objects {
            [] => vec![("".to_string(), "Nothing selected".to_string())],
            [obj] => {
                let mut rows = vec![
                    ("Type".to_string(), obj.object_type().to_string()),
                    (
                        "ID".to_string(),
                        obj.object_id()
                            .map(|id| id.to_string())
                            .unwrap_or_else(|| obj.id.clone()),
                    ),
                ];
                let optional = [
                    ("Rel", &obj.rel),
                    ("Permissions", &obj.class),
                    ("Fileset", &obj.fileset),
                    ("Share", &obj.share),
                    ("Suffix", &obj.id_suffix),
                ];
                for (label, value) in optional {
                    if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                        rows.push((label.to_string(), value.clone()));
                    }
                }
                if let Some(index) = obj.index {
                    rows.push(("Index".to_string(), index.to_string()));
                }
                rows
            }
            many => {
                let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
                for obj in many {
                    *by_type.entry(obj.object_type()).or_default() += 1;
                }
                let mut rows = vec![("Selected".to_string(), format!("{} objects", many.len()))];
                rows.extend(by_type.into_iter().map(|(t, n)| (t.to_string(), n.to_string())));
                rows
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, annotations: &AnnotationPanel, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let lines: Vec<Line> = self
            .summary()
            .into_iter()
            .map(|(label, value)| {
                if label.is_empty() {
                    Line::from(Span::styled(value, Style::default().fg(Color::Gray)))
                } else {
                    Line::from(vec![
                        Span::styled(format!("{label}: "), Style::default().fg(Color::Cyan)),
                        Span::raw(value),
                    ])
                }
            })
            .collect();
        let general = Paragraph::new(lines)
            .block(Block::default().title("General").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(general, chunks[0]);

        let focused_id = annotations.focused().map(|i| i.element_id.clone());
        let mut items = Vec::new();
        for container in annotations.containers.iter().filter(|c| c.visible) {
            items.push(ListItem::new(Span::styled(
                container.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for item in &container.items {
                let is_focused = focused && focused_id.as_deref() == Some(item.element_id.as_str());
                let style = if is_focused {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else if item.locked {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                items.push(ListItem::new(Span::styled(format!("  {}", item.text), style)));
            }
        }
        let border = if focused { Color::Yellow } else { Color::White };
        let list = List::new(items).block(
            Block::default()
                .title("Annotations")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(list, chunks[1]);
    }
}

impl Default for MetadataPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionListener for MetadataPanel {
    fn on_selection_change(&self, objects: &[SelectedObject], force: bool) {
        *self.displayed.lock() = objects.to_vec();
        *self.summary.lock() = Self::describe(objects);
        log::debug!(
            "metadata: refreshed for {} object(s){}",
            objects.len(),
            if force { " (forced)" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionStore;
    use std::sync::Arc;

    #[test]
    fn keeps_content_on_unforced_clear() {
        let store = SelectionStore::new();
        let panel = Arc::new(MetadataPanel::new());
        store.subscribe(panel.clone());

        let mut obj = SelectedObject::new("image-301");
        obj.share = Some("42".to_string());
        store.publish(vec![obj]);
        store.clear(false);

        let summary = panel.summary();
        assert!(summary.contains(&("Share".to_string(), "42".to_string())));
        assert!(summary.contains(&("ID".to_string(), "301".to_string())));
        assert_eq!(panel.displayed()[0].id, "image-301");

        store.clear(true);
        assert_eq!(panel.summary()[0].1, "Nothing selected");
        assert!(panel.displayed().is_empty());
    }

    #[test]
    fn multiple_objects_are_counted_by_type() {
        let summary = MetadataPanel::describe(&[
            SelectedObject::new("image-1"),
            SelectedObject::new("image-2"),
            SelectedObject::new("dataset-3"),
        ]);
        assert_eq!(summary[0], ("Selected".to_string(), "3 objects".to_string()));
        assert!(summary.contains(&("image".to_string(), "2".to_string())));
        assert!(summary.contains(&("dataset".to_string(), "1".to_string())));
    }
}
