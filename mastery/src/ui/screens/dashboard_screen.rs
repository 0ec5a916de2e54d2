use chrono::Utc;
use mastery_api::endpoints::{
    children::{ChildSummary, Roster, RosterStats},
    Mastery,
};
use mastery_auth::ParentIdentity;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table},
};

use crate::state::{DashboardState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme, utils,
};

const INVITES_WIDTH: u16 = 32;
const MASTERY_BAR_WIDTH: usize = 10;

const HINTS: &[(&str, &str)] = &[
    ("j/k", "move"),
    ("Enter", "insights"),
    ("i", "invite child"),
    ("r", "refresh"),
    ("o", "log out"),
    ("?", "help"),
];

pub fn render(f: &mut Frame, state: &DashboardState, identity: Option<&ParentIdentity>) {
    let (title_area, cards_area, content_area, help_area) =
        layouts::screen_layout_with_cards(f.area());

    let title = match identity {
        Some(identity) => format!("Welcome, {}", identity.display_name),
        None => "Dashboard".to_string(),
    };
    screen_title::render_screen_title(f, title_area, &title, &state.roster_loading);

    render_stats(f, cards_area, &roster_stats(&state.roster));

    if state.roster.pending_invites.is_empty() {
        render_children(f, content_area, state);
    } else {
        let [children_area, invites_area] = Layout::horizontal([
            Constraint::Min(40),
            Constraint::Length(INVITES_WIDTH),
        ])
        .areas(content_area);
        render_children(f, children_area, state);
        render_invites(f, invites_area, &state.roster);
    }

    help_bar::render_help_bar(f, help_area, HINTS);
}

/// Aggregates sent by the service, or computed from the children when absent.
pub(crate) fn roster_stats(roster: &Roster) -> RosterStats {
    if let Some(stats) = &roster.stats {
        return stats.clone();
    }

    let now = Utc::now();
    let children = &roster.children;
    let average = if children.is_empty() {
        0.0
    } else {
        children.iter().map(|c| c.mastery.fraction()).sum::<f64>() / children.len() as f64
    };

    RosterStats {
        total_children: children.len() as u32,
        active_this_week: children
            .iter()
            .filter(|c| {
                c.last_active
                    .is_some_and(|at| now.signed_duration_since(at).num_days() < 7)
            })
            .count() as u32,
        average_mastery: Mastery::new(average),
        total_xp: children.iter().map(|c| c.total_xp).sum(),
    }
}

fn render_stats(f: &mut Frame, area: Rect, stats: &RosterStats) {
    let cards = [
        ("Children", Span::raw(stats.total_children.to_string())),
        ("Active this week", Span::raw(stats.active_this_week.to_string())),
        ("Average mastery", utils::fmt_mastery(stats.average_mastery)),
        ("Total XP", Span::raw(stats.total_xp.to_string())),
    ];

    for ((label, value), card_area) in cards.into_iter().zip(layouts::columns(area, 4)) {
        let card = Paragraph::new(Line::from(value.bold()))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::accent_border_style())
                    .title(format!(" {} ", label)),
            );
        f.render_widget(card, card_area);
    }
}

fn render_children(f: &mut Frame, area: Rect, state: &DashboardState) {
    if state.roster.children.is_empty() {
        match &state.roster_loading {
            LoadingState::Loading(_) => {
                empty_state::render_loading_state(f, area, "Children", "Loading children...");
            }
            LoadingState::Error(error) => {
                empty_state::render_error_state(f, area, "Children", error, "Press r to retry");
            }
            _ => empty_state::render_empty_state(
                f,
                area,
                "Children",
                "No children linked yet",
                Some("Press i to generate an invite code for your child"),
            ),
        }
        return;
    }

    let now = Utc::now();
    let rows: Vec<Row> = state
        .roster
        .children
        .iter()
        .map(|child| child_row(child, now))
        .collect();

    let widths = [
        Constraint::Min(16),    // Name
        Constraint::Length(16), // Username
        Constraint::Length(16), // Mastery
        Constraint::Length(8),  // XP
        Constraint::Length(12), // Last active
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Name", "Username", "Mastery", "XP", "Last active"])
                .style(theme::header_style())
                .bottom_margin(1),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Children ({}) ", state.roster.children.len())),
        )
        .column_spacing(theme::TABLE_COLUMN_SPACING)
        .row_highlight_style(theme::selection_style());

    f.render_stateful_widget(table, area, &mut state.table_state.borrow_mut());
}

fn child_row(child: &ChildSummary, now: chrono::DateTime<Utc>) -> Row<'static> {
    let mastery = Line::from(vec![
        Span::styled(
            utils::mastery_bar(child.mastery, MASTERY_BAR_WIDTH),
            Style::default().fg(theme::mastery_color(child.mastery)),
        ),
        Span::raw(" "),
        utils::fmt_mastery(child.mastery),
    ]);

    Row::new(vec![
        Cell::from(child.display_name().to_string()),
        Cell::from(child.username.clone()),
        Cell::from(mastery),
        Cell::from(Text::from(child.total_xp.to_string()).alignment(Alignment::Right)),
        Cell::from(utils::fmt_relative(child.last_active, now)),
    ])
}

fn render_invites(f: &mut Frame, area: Rect, roster: &Roster) {
    let items: Vec<ListItem> = roster
        .pending_invites
        .iter()
        .map(|invite| {
            ListItem::new(vec![
                Line::from(Span::styled(invite.code.clone(), theme::title_style())),
                Line::from(Span::styled(
                    format!("expires {}", utils::fmt_date(invite.expires_at)),
                    theme::help_text_style(),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Pending invites ({}) ", roster.pending_invites.len())),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mastery_api::endpoints::ChildId;

    fn child(id: i64, mastery: f64, xp: i64, days_ago: Option<i64>) -> ChildSummary {
        ChildSummary {
            id: ChildId::from(id),
            username: format!("kid{}", id),
            name: None,
            mastery: Mastery::new(mastery),
            total_xp: xp,
            last_active: days_ago.map(|d| Utc::now() - Duration::days(d)),
        }
    }

    #[test]
    fn test_stats_computed_when_service_omits_them() {
        let roster = Roster {
            children: vec![child(1, 0.5, 100, Some(2)), child(2, 0.9, 50, Some(30))],
            ..Default::default()
        };

        let stats = roster_stats(&roster);

        assert_eq!(stats.total_children, 2);
        assert_eq!(stats.active_this_week, 1);
        assert_eq!(stats.average_mastery.percent(), 70);
        assert_eq!(stats.total_xp, 150);
    }

    #[test]
    fn test_service_stats_take_precedence() {
        let service_stats = RosterStats {
            total_children: 5,
            ..Default::default()
        };
        let roster = Roster {
            children: vec![child(1, 0.5, 100, None)],
            stats: Some(service_stats.clone()),
            ..Default::default()
        };

        assert_eq!(roster_stats(&roster), service_stats);
    }

    #[test]
    fn test_empty_roster_stats() {
        let stats = roster_stats(&Roster::default());
        assert_eq!(stats.total_children, 0);
        assert_eq!(stats.average_mastery, Mastery::default());
    }
}
