//! Bordered overlay shared by the help and invite popups.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::ui::{layouts, theme};

pub struct Popup<'a> {
    title: &'a str,
    /// Width and height as percentages of the frame
    size: (u16, u16),
    border_style: Style,
}

impl<'a> Popup<'a> {
    pub fn new(title: &'a str, size: (u16, u16)) -> Self {
        Self {
            title,
            size,
            border_style: theme::info_border_style(),
        }
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Draw the frame centered over the whole screen. Returns the area left
    /// for content inside the border.
    pub fn render(self, f: &mut Frame) -> Rect {
        let (width, height) = self.size;
        let area = layouts::centered_popup(width, height, f.area());
        f.render_widget(Clear, area);

        let block = Block::default()
            .title(self.title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(self.border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);
        inner
    }
}
