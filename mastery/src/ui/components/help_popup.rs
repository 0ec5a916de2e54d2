use ratatui::{
    prelude::*,
    widgets::{List, ListItem},
    Frame,
};

use super::popup::Popup;
use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, screen: &Screen) {
    let inner = Popup::new(" Help (press ? or Esc to close) ", layouts::popup_sizes::LARGE)
        .border_style(theme::accent_border_style())
        .render(f);

    let items: Vec<ListItem> = help_items(screen)
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

pub(crate) fn help_items(screen: &Screen) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    match screen {
        // Form screens capture every printable key, so their keys live in the help bar
        Screen::Login(..) | Screen::Register(..) => return items,
        Screen::Dashboard(..) => {
            items.push(("↑/k", "Move selection up"));
            items.push(("↓/j", "Move selection down"));
            items.push(("Enter/→/l", "View insights for selected child"));
            items.push(("i", "Generate an invite code"));
            items.push(("r", "Refresh children"));
            items.push(("o", "Log out"));
        }
        Screen::Insights(..) => {
            items.push(("↑/k", "Scroll up"));
            items.push(("↓/j", "Scroll down"));
            items.push(("r", "Reload insights"));
            items.push(("h/←/Esc", "Back to dashboard"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
        }
    }

    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("h/←", "Navigate back"));
    items.push(("g then d", "Go to dashboard"));
    items.push(("g then l", "Go to logs"));
    items.push(("g then g", "Navigate to top"));
    items.push(("G", "Navigate to bottom"));
    items.push(("?", "Toggle this help"));
    items.push(("q", "Quit application"));

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DashboardState, LoginState};

    #[test]
    fn test_form_screens_have_no_popup_entries() {
        assert!(help_items(&Screen::Login(LoginState::default())).is_empty());
    }

    #[test]
    fn test_dashboard_lists_global_keys() {
        let items = help_items(&Screen::Dashboard(DashboardState::default()));
        assert!(items.iter().any(|(key, _)| *key == "i"));
        assert!(items.iter().any(|(key, _)| *key == "g then d"));
    }
}
