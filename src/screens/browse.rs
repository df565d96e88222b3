use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
    Frame,
};

use crate::selection::table::RowTable;
use crate::selection::tree::{DataTree, TreeNode};

/// Panel that has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tree,
    Table,
    Plate,
    Annotations,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Tree => Focus::Table,
            Focus::Table => Focus::Plate,
            Focus::Plate => Focus::Annotations,
            Focus::Annotations => Focus::Tree,
        }
    }
}

/// Plate grid state: wells in row-major order and the selected field.
pub struct PlateGrid {
    pub wells: Vec<(String, crate::selection::WellElement)>,
    pub columns: usize,
    pub cursor: usize,
    pub selected: Vec<usize>,
    pub field: usize,
    pub plate_class: String,
}

impl PlateGrid {
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        if self.wells.is_empty() {
            return;
        }
        let cols = self.columns.max(1) as isize;
        let rows = (self.wells.len() as isize + cols - 1) / cols;
        let row = (self.cursor as isize / cols + dy).clamp(0, rows - 1);
        let col = (self.cursor as isize % cols + dx).clamp(0, cols - 1);
        self.cursor = ((row * cols + col) as usize).min(self.wells.len() - 1);
    }

    pub fn toggle_cursor(&mut self) {
        if let Some(pos) = self.selected.iter().position(|&i| i == self.cursor) {
            self.selected.remove(pos);
        } else {
            self.selected.push(self.cursor);
            self.selected.sort_unstable();
        }
    }

    pub fn selected_wells(&self) -> Vec<crate::selection::WellElement> {
        self.selected
            .iter()
            .filter_map(|&i| self.wells.get(i).map(|(_, w)| w.clone()))
            .collect()
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn node_icon(node: &TreeNode) -> &'static str {
    match node.rel.as_deref().map(|r| r.replace("-locked", "")).as_deref() {
        Some("experimenter") => "👤",
        Some("project") => "📁",
        Some("dataset") => "🗂",
        Some("image") => "🖼",
        Some("plate") => "🧫",
        Some("share") => "🔗",
        _ => "•",
    }
}

pub fn render_tree(f: &mut Frame, area: Rect, tree: &DataTree, focused: bool) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = tree.cursor.saturating_sub(visible_height.saturating_sub(1));
    let end = (start + visible_height).min(tree.nodes.len());

    let items: Vec<ListItem> = tree.nodes[start..end]
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let index = start + i;
            let indent = "  ".repeat(node.level);
            let expand_icon = if node.has_children {
                if node.is_expanded { "▼" } else { "▶" }
            } else {
                " "
            };
            let mut text = format!("{indent}{expand_icon} {} {}", node_icon(node), node.name);
            if let Some(fileset) = &node.fileset {
                text.push_str(&format!(" [fs {fileset}]"));
            }
            if let Some(page) = node.page {
                text.push_str(&format!(" (p{page})"));
            }

            let style = match (index == tree.cursor && focused, node.selected) {
                (true, true) => Style::default()
                    .bg(Color::Blue)
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default().bg(Color::Blue).fg(Color::White),
                (false, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (false, false) => Style::default().fg(Color::White),
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title("Data")
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    );
    f.render_widget(list, area);
}

pub fn render_table(f: &mut Frame, area: Rect, table: &RowTable, focused: bool) {
    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mark = if row.selected { "●" } else { " " };
            let style = if i == table.cursor && focused {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else if row.selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(mark),
                Cell::from(row.name.clone()),
                Cell::from(row.id.clone()),
            ])
            .style(style)
        })
        .collect();

    let widget = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(55),
            Constraint::Percentage(40),
        ],
    )
    .header(
        Row::new(vec!["", "Name", "Id"]).style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .title("Results")
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    );
    f.render_widget(widget, area);
}

/// Row index of the table body under screen row `row`, given the table area.
pub fn table_row_at(area: Rect, row: u16, scroll: usize) -> Option<usize> {
    // border + header line
    let first = area.y + 2;
    if row < first || row >= area.y + area.height.saturating_sub(1) {
        return None;
    }
    Some((row - first) as usize + scroll)
}

pub fn render_plate(f: &mut Frame, area: Rect, plate: &PlateGrid, focused: bool) {
    let mut lines = Vec::new();
    for (r, chunk) in plate.wells.chunks(plate.columns.max(1)).enumerate() {
        let spans: Vec<Span> = chunk
            .iter()
            .enumerate()
            .map(|(c, (label, _))| {
                let index = r * plate.columns + c;
                let selected = plate.selected.contains(&index);
                let style = match (index == plate.cursor && focused, selected) {
                    (true, _) => Style::default().bg(Color::Blue).fg(Color::White),
                    (false, true) => Style::default().bg(Color::Yellow).fg(Color::Black),
                    (false, false) => Style::default().fg(Color::Green),
                };
                Span::styled(format!(" {label:>3} "), style)
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(
        format!("Field {}  ([ / ] to change)", plate.field),
        Style::default().fg(Color::Gray),
    )));

    let grid = Paragraph::new(lines).block(
        Block::default()
            .title("Plate")
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    );
    f.render_widget(grid, area);
}
