use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Separator between the tooltip title and its body text.
pub const SHOW_BODY_SEPARATOR: &str = " - ";

/// Cursor-tracking tooltip whose content comes from the hovered element's
/// hidden `tooltip_html` sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    pub body: Vec<String>,
    pub top: i32,
    pub left: i32,
    pub track: bool,
    anchor: (u16, u16),
}

impl Tooltip {
    pub fn init(tooltip_html: &str, top: i32, left: i32) -> Self {
        let (title, rest) = match tooltip_html.split_once(SHOW_BODY_SEPARATOR) {
            Some((title, rest)) => (title.trim().to_string(), rest),
            None => (tooltip_html.trim().to_string(), ""),
        };
        let body = rest
            .split(SHOW_BODY_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            title,
            body,
            top,
            left,
            track: true,
            anchor: (0, 0),
        }
    }

    /// Follow the cursor; no show delay.
    pub fn track_to(&mut self, column: u16, row: u16) {
        if self.track {
            self.anchor = (column, row);
        }
    }

    pub fn size(&self) -> (u16, u16) {
        let widest = std::iter::once(self.title.len())
            .chain(self.body.iter().map(|l| l.len()))
            .max()
            .unwrap_or(0);
        ((widest as u16).saturating_add(2), self.body.len() as u16 + 3)
    }

    /// Where the tooltip lands for the current anchor, clamped to `viewport`.
    pub fn placement(&self, viewport: Rect) -> Rect {
        let (width, height) = self.size();
        let width = width.min(viewport.width);
        let height = height.min(viewport.height);

        // Offsets are in pixels upstream; a cell is roughly 10px wide, 20px high.
        let x = self.anchor.0 as i32 + self.left / 10;
        let y = self.anchor.1 as i32 + self.top / 20 + 1;

        let max_x = (viewport.x + viewport.width - width) as i32;
        let max_y = (viewport.y + viewport.height - height) as i32;
        Rect {
            x: x.clamp(viewport.x as i32, max_x) as u16,
            y: y.clamp(viewport.y as i32, max_y) as u16,
            width,
            height,
        }
    }

    pub fn render(&self, f: &mut Frame, viewport: Rect) {
        let area = self.placement(viewport);
        let mut lines = vec![Line::from(Span::styled(
            self.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        lines.extend(self.body.iter().map(|l| Line::from(l.clone())));

        let tooltip = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().bg(Color::Black).fg(Color::White))
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(tooltip, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_splits_on_separator() {
        let tip = Tooltip::init("a.tif - 512 x 512 - 3 channels", 10, -100);
        assert_eq!(tip.title, "a.tif");
        assert_eq!(tip.body, vec!["512 x 512".to_string(), "3 channels".to_string()]);
    }

    #[test]
    fn title_only() {
        let tip = Tooltip::init("Owner: root", 10, -100);
        assert_eq!(tip.title, "Owner: root");
        assert!(tip.body.is_empty());
    }

    #[test]
    fn placement_is_clamped_to_viewport() {
        let mut tip = Tooltip::init("abc - def", 10, -100);
        let viewport = Rect::new(0, 0, 40, 10);

        tip.track_to(2, 2);
        let area = tip.placement(viewport);
        assert_eq!(area.x, 0);
        assert_eq!(area.y, 3);

        tip.track_to(39, 9);
        let area = tip.placement(viewport);
        assert!(area.x + area.width <= 40);
        assert!(area.y + area.height <= 10);
    }
}
