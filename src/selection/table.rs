use super::types::{ClickModifiers, MultiKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

impl TableRow {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            selected: false,
        }
    }
}

/// Flat results table (search, history, basket) with per-row selection marks.
#[derive(Debug, Default)]
pub struct RowTable {
    pub rows: Vec<TableRow>,
    pub cursor: usize,
}

impl RowTable {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows, cursor: 0 }
    }

    /// Apply a click on row `index`.
    ///
    /// Shift extends from the existing marks towards the clicked row without
    /// clearing marks elsewhere; the platform multi key toggles one row; a
    /// plain click leaves only the clicked row marked.
    pub fn handle_click(&mut self, index: usize, modifiers: ClickModifiers, multi_key: MultiKey) {
        if index >= self.rows.len() {
            log::debug!("table: click outside rows ({index})");
            return;
        }
        self.cursor = index;

        if modifiers.shift {
            self.extend_to(index);
        } else if modifiers.is_multi(multi_key) {
            self.rows[index].selected = !self.rows[index].selected;
        } else {
            for row in self.rows.iter_mut() {
                row.selected = false;
            }
            self.rows[index].selected = true;
        }
    }

    fn extend_to(&mut self, index: usize) {
        let (Some(sel_start), Some(sel_end)) = (self.first_selected(), self.last_selected()) else {
            self.rows[index].selected = true;
            return;
        };

        let (new_start, new_end) = if index < sel_start {
            (index, sel_start)
        } else if index > sel_end {
            (sel_end + 1, index + 1)
        } else {
            (sel_start, index)
        };
        for row in &mut self.rows[new_start..new_end] {
            row.selected = true;
        }
    }

    pub fn first_selected(&self) -> Option<usize> {
        self.rows.iter().position(|r| r.selected)
    }

    pub fn last_selected(&self) -> Option<usize> {
        self.rows.iter().rposition(|r| r.selected)
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.id.clone())
            .collect()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let max = self.rows.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }
}
