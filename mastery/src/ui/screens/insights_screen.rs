use chrono::{DateTime, Utc};
use mastery_api::endpoints::insights::InsightsReport;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::state::{InsightsState, LoadingState};
use crate::ui::{
    components::{empty_state, help_bar, screen_title},
    layouts, theme, utils,
};

const CONCEPT_WIDTH: usize = 24;
const MASTERY_BAR_WIDTH: usize = 16;

const HINTS: &[(&str, &str)] = &[
    ("j/k", "scroll"),
    ("r", "reload"),
    ("h/Esc", "back to dashboard"),
    ("?", "help"),
];

pub fn render(f: &mut Frame, state: &InsightsState) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    screen_title::render_screen_title(
        f,
        title_area,
        &format!("Insights · {}", state.child_name),
        &state.loading,
    );

    let title = format!(" {} ", state.child_name);
    match (&state.report, &state.loading) {
        _ if state.not_found => empty_state::render_empty_state(
            f,
            content_area,
            &title,
            "No data",
            Some("Back to dashboard (Enter)"),
        ),
        (Some(report), _) => {
            let paragraph = Paragraph::new(report_lines(report, Utc::now()))
                .block(Block::default().borders(Borders::ALL).title(title))
                .wrap(Wrap { trim: false })
                .scroll((state.scroll, 0));
            f.render_widget(paragraph, content_area);
        }
        (None, LoadingState::Error(error)) => empty_state::render_error_state(
            f,
            content_area,
            &title,
            error,
            "Press r to retry or Enter to go back",
        ),
        (None, _) => {
            empty_state::render_loading_state(f, content_area, &title, "Loading insights...")
        }
    }

    help_bar::render_help_bar(f, help_area, HINTS);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), theme::header_style()))
}

fn muted(text: impl Into<String>) -> Span<'static> {
    Span::styled(text.into(), theme::help_text_style())
}

/// Lay the report out as text, one section per part the service sent.
pub(crate) fn report_lines(report: &InsightsReport, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(child) = &report.child {
        lines.push(section("Overview"));
        lines.push(Line::from(vec![
            muted("Mastery  "),
            utils::fmt_mastery(child.mastery),
            muted("   XP  "),
            Span::raw(child.total_xp.to_string()),
            muted("   Last active  "),
            Span::raw(utils::fmt_relative(child.last_active, now)),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(pacing) = &report.pacing {
        lines.push(section("Pacing"));
        let status = utils::fmt_label(&pacing.status);
        let mut spans = vec![Span::styled(status, theme::title_style())];
        if let Some(message) = &pacing.message {
            spans.push(Span::raw(format!("  {}", message)));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(vec![
            muted("Sessions per week  "),
            Span::raw(format!("{:.1}", pacing.sessions_per_week)),
            muted("   Average session  "),
            Span::raw(utils::fmt_minutes(pacing.average_session_minutes)),
        ]));
        if let Some(days) = pacing.days_since_last_session {
            lines.push(Line::from(muted(format!("{} days since last session", days))));
        }
        lines.push(Line::from(""));
    }

    if let Some(week) = &report.weekly_summary {
        lines.push(section("This Week"));
        lines.push(Line::from(vec![
            Span::raw(format!("{} sessions", week.sessions)),
            muted(" · "),
            Span::raw(utils::fmt_minutes(week.minutes)),
            muted(" · "),
            Span::raw(format!("{} XP", week.xp_earned)),
            muted(" · "),
            Span::raw(format!("{} atoms mastered", week.atoms_mastered)),
        ]));
        lines.push(Line::from(""));
    }

    if !report.insights.is_empty() {
        lines.push(section("Insights"));
        for insight in &report.insights {
            let mut spans = vec![Span::styled(
                format!("[{}] ", utils::fmt_label(&insight.kind)),
                theme::loading_style(),
            )];
            if !insight.title.is_empty() {
                spans.push(Span::styled(
                    format!("{} ", insight.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::raw(insight.message.clone()));
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    if !report.mastery_by_concept.is_empty() {
        lines.push(section("Mastery by Concept"));
        for concept in &report.mastery_by_concept {
            lines.push(Line::from(vec![
                Span::raw(format!(
                    "{:<width$}",
                    utils::truncate(&concept.concept, CONCEPT_WIDTH),
                    width = CONCEPT_WIDTH
                )),
                Span::styled(
                    utils::mastery_bar(concept.mastery, MASTERY_BAR_WIDTH),
                    Style::default().fg(theme::mastery_color(concept.mastery)),
                ),
                Span::raw(" "),
                utils::fmt_mastery(concept.mastery),
                muted(format!(
                    "  {}/{} atoms",
                    concept.atoms_mastered, concept.atoms_total
                )),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !report.weak_areas.is_empty() {
        lines.push(section("Needs Practice"));
        for area in &report.weak_areas {
            let mut spans = vec![
                Span::styled(
                    format!("{} ", area.concept),
                    Style::default().fg(theme::COLOR_NEGATIVE),
                ),
                utils::fmt_mastery(area.mastery),
            ];
            if let Some(reason) = &area.reason {
                spans.push(muted(format!("  {}", reason)));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    if !report.recent_sessions.is_empty() {
        lines.push(section("Recent Sessions"));
        for session in &report.recent_sessions {
            let duration = session
                .duration_minutes
                .map(utils::fmt_minutes)
                .unwrap_or_else(|| "-".to_string());
            let accuracy = session
                .accuracy
                .map(|a| a.to_string())
                .unwrap_or_else(|| "-".to_string());
            lines.push(Line::from(vec![
                Span::raw(format!("{:<12}", utils::fmt_relative(session.started_at, now))),
                Span::raw(format!("{:>8}", duration)),
                muted(format!("  {} atoms", session.atoms_completed)),
                muted(format!("  accuracy {}", accuracy)),
                muted(format!("  +{} XP", session.xp_earned)),
            ]));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(muted("The service returned an empty report.")));
    }

    lines
}
