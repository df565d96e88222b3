use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::actions::toolbar::{ToolbarAction, ToolbarDropdowns};

/// Draws the toolbar buttons and the open dropdown, and maps mouse
/// positions back to buttons and entries.
pub struct MenuRenderer {
    pub toolbar: ToolbarDropdowns,
    pub basket_total: usize,
}

impl MenuRenderer {
    pub fn new(toolbar: ToolbarDropdowns) -> Self {
        Self {
            toolbar,
            basket_total: 0,
        }
    }

    /// Column span of each button, laid out as ` Name ` separated by two spaces.
    fn button_spans(&self) -> Vec<(u16, u16)> {
        let mut spans = Vec::new();
        let mut x = 1u16;
        for dropdown in &self.toolbar.dropdowns {
            let width = dropdown.name.len() as u16 + 2;
            spans.push((x, x + width - 1));
            x += width + 2;
        }
        spans
    }

    fn dropdown_area(&self, index: usize) -> Option<Rect> {
        let (start, _) = *self.button_spans().get(index)?;
        let dropdown = self.toolbar.dropdowns.get(index)?;
        let width = dropdown
            .items
            .iter()
            .map(|i| i.label.len())
            .max()
            .unwrap_or(0) as u16
            + 4;
        Some(Rect {
            x: start,
            y: 1,
            width,
            height: dropdown.items.len() as u16 + 2,
        })
    }

    pub fn render_menu_bar(&self, f: &mut Frame, area: Rect) {
        let mut menu_items = vec![Span::raw(" ")];
        for (i, dropdown) in self.toolbar.dropdowns.iter().enumerate() {
            let style = if self.toolbar.visible() == Some(i) {
                Style::default().fg(Color::White).bg(Color::Blue)
            } else {
                Style::default().fg(Color::Black).bg(Color::Gray)
            };
            menu_items.push(Span::styled(format!(" {} ", dropdown.name), style));
            menu_items.push(Span::raw("  "));
        }
        menu_items.push(Span::styled(
            format!(" Basket: {} ", self.basket_total),
            Style::default().fg(Color::Black).bg(Color::Green),
        ));

        let menu = Paragraph::new(Line::from(menu_items))
            .style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_widget(menu, area);
    }

    pub fn render_dropdown_menu(&self, f: &mut Frame) {
        let Some(index) = self.toolbar.visible() else {
            return;
        };
        let Some(area) = self.dropdown_area(index) else {
            return;
        };

        let lines: Vec<Line> = self.toolbar.dropdowns[index]
            .items
            .iter()
            .map(|item| {
                let style = if item.disabled {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Black)
                };
                Line::from(Span::styled(format!(" {}", item.label), style))
            })
            .collect();

        let dropdown = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().bg(Color::White).fg(Color::Black));

        f.render_widget(Clear, area);
        f.render_widget(dropdown, area);
    }

    /// Click on the menu bar row.
    pub fn handle_menu_click(&mut self, column: u16) {
        let hit = self
            .button_spans()
            .iter()
            .position(|(start, end)| (*start..=*end).contains(&column));
        match hit {
            Some(index) if self.toolbar.visible() == Some(index) => self.toolbar.hide_all(),
            Some(index) => self.toolbar.click_button(index),
            None => self.toolbar.hide_all(),
        }
    }

    /// Click below the menu bar while a dropdown is open. Clicking outside
    /// the list closes it.
    pub fn handle_dropdown_click(&mut self, column: u16, row: u16) -> Option<ToolbarAction> {
        let index = self.toolbar.visible()?;
        let area = self.dropdown_area(index)?;
        let inside = column >= area.x
            && column < area.x + area.width
            && row > area.y
            && row < area.y + area.height - 1;
        if !inside {
            self.toolbar.hover_out(index);
            return None;
        }
        let item = (row - area.y - 1) as usize;
        self.toolbar.activate(index, item)
    }

    /// Mouse moved; leaving the open list hides it.
    pub fn handle_mouse_move(&mut self, column: u16, row: u16) {
        let Some(index) = self.toolbar.visible() else {
            return;
        };
        if row == 0 {
            return;
        }
        if let Some(area) = self.dropdown_area(index) {
            let inside = column >= area.x
                && column < area.x + area.width
                && row >= area.y
                && row < area.y + area.height;
            if !inside {
                self.toolbar.hover_out(index);
            }
        }
    }

    pub fn close_menu(&mut self) {
        self.toolbar.hide_all();
    }

    pub fn is_open(&self) -> bool {
        self.toolbar.visible().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_data;

    fn renderer() -> MenuRenderer {
        MenuRenderer::new(ToolbarDropdowns::init(demo_data::demo_toolbar()))
    }

    #[test]
    fn clicking_button_twice_closes_it() {
        let mut menu = renderer();
        menu.handle_menu_click(2);
        assert_eq!(menu.toolbar.visible(), Some(0));
        menu.handle_menu_click(2);
        assert!(!menu.is_open());
    }

    #[test]
    fn dropdown_click_returns_entry_action() {
        let mut menu = renderer();
        menu.handle_menu_click(2);
        // first entry sits one row below the border at y=1
        assert_eq!(menu.handle_dropdown_click(3, 2), Some(ToolbarAction::AddToBasket));
        assert!(!menu.is_open());
    }

    #[test]
    fn moving_away_hides_list() {
        let mut menu = renderer();
        menu.handle_menu_click(2);
        menu.handle_mouse_move(70, 20);
        assert!(!menu.is_open());
    }
}
