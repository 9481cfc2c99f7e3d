use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::app::{Focus, MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::controller::ViewSnapshot;
use crate::models::FavoriteEntry;

const TEXT: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const STAR: Color = Color::Rgb(250, 204, 21);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Everything needed to draw one frame
pub struct RenderState<'a> {
    pub view: &'a ViewSnapshot,
    /// Feed category title, e.g. "Births"
    pub heading: &'a str,
    pub date_input: &'a str,
    pub search_input: &'a str,
    pub focus: Focus,
    pub cursor: usize,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_input(
        frame,
        layout.date_input_area,
        " Date (YYYY-MM-DD) ",
        state.date_input,
        state.focus == Focus::Date,
    );
    render_input(
        frame,
        layout.search_input_area,
        " Search ",
        state.search_input,
        state.focus == Focus::Search,
    );
    render_results_list(frame, layout.results_area, state);
    render_favorites(frame, layout.favorites_area, &state.view.favorites);
    render_status_bar(frame, layout.status_area, state);
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border = if focused { ACCENT } else { MUTED };
    let mut spans = vec![Span::styled(value.to_string(), Style::default().fg(TEXT))];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title.to_string()),
    );

    frame.render_widget(paragraph, area);
}

fn results_title(state: &RenderState) -> String {
    match &state.view.date_label {
        Some(label) => format!(" {} on {} ", state.heading, label),
        None => format!(" {} ", state.heading),
    }
}

fn render_results_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let view = state.view;

    let items: Vec<ListItem> = if view.loading {
        vec![ListItem::new("Loading…").style(Style::default().fg(MUTED))]
    } else if view.selected_date.is_none() {
        vec![ListItem::new("Enter a date and press Enter").style(Style::default().fg(MUTED))]
    } else if view.rows.is_empty() {
        vec![ListItem::new("No events found").style(Style::default().fg(MUTED))]
    } else {
        view.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let star = if row.favorited { "★" } else { "☆" };
                let content = format!("{} {}", star, row.event);

                let style = if idx == state.cursor {
                    Style::default().fg(TEXT).bg(ACCENT).add_modifier(Modifier::BOLD)
                } else if row.favorited {
                    Style::default().fg(STAR)
                } else {
                    Style::default().fg(MUTED)
                };

                ListItem::new(content).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(results_title(state)),
    );

    frame.render_widget(list, area);
}

fn render_favorites(frame: &mut Frame, area: Rect, favorites: &[FavoriteEntry]) {
    let items: Vec<ListItem> = if favorites.is_empty() {
        vec![ListItem::new("No favorites yet").style(Style::default().fg(MUTED))]
    } else {
        favorites
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.event().description().to_string(),
                        Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(" - {}", entry.year)),
                    Span::styled(
                        format!(" ({})", entry.formatted_date),
                        Style::default().fg(MUTED),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
            .title(format!(" Favorites ({}) ", favorites.len())),
    );

    frame.render_widget(list, area);
}

fn status_line(state: &RenderState) -> String {
    let view = state.view;
    let mut parts = vec![];

    parts.push(match state.focus {
        Focus::Date => "[DATE]".to_string(),
        Focus::Search => "[SEARCH]".to_string(),
    });

    if view.loading {
        parts.push("loading".to_string());
    } else if view.selected_date.is_some() {
        parts.push(format!("page {}/{}", view.page, view.page_count));
        if view.search_term.is_empty() {
            parts.push(format!("{} events", view.total_len));
        } else {
            parts.push(format!("{}/{} matching", view.filtered_len, view.total_len));
        }
    }

    if view.unsaved_favorites {
        parts.push("favorites not saved".to_string());
    }

    parts.push("Tab: switch".to_string());
    parts.push("Ctrl+F: favorite".to_string());
    parts.push("PgUp/PgDn: page".to_string());
    parts.push("Ctrl+C: quit".to_string());

    format!(" {} ", parts.join(" | "))
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = match state.status_message {
        Some(msg) => {
            let fg = match msg.message_type {
                MessageType::Success => ACCENT,
                MessageType::Error => ERROR,
            };
            (format!(" {} ", msg.text), Style::default().fg(fg).bg(BAR_BG))
        }
        None => (status_line(state), Style::default().fg(TEXT).bg(BAR_BG)),
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
