use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::screens::browse::Focus;

pub struct StatusBarRenderer {
    pub status_message: String,
    pub server: String,
    pub focus: Focus,
    pub selected_count: usize,
}

impl StatusBarRenderer {
    pub fn new(server: String) -> Self {
        Self {
            status_message: "Ready".to_string(),
            server,
            focus: Focus::Tree,
            selected_count: 0,
        }
    }

    pub fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", self.server), Style::default().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(
                format!("{} selected", self.selected_count),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(" | Focus: {:?} | {}", self.focus, self.status_message)),
        ]))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
        f.render_widget(status, area);
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = message;
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn set_selected_count(&mut self, count: usize) {
        self.selected_count = count;
    }
}
