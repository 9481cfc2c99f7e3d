use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions
pub struct AppLayout {
    pub date_input_area: Rect,
    pub search_input_area: Rect,
    pub results_area: Rect,
    pub favorites_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Split the screen:
    /// - Input row (3 rows): date field 30%, search field 70%
    /// - Main area: events 60% (left), favorites 40% (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input fields with borders
                Constraint::Min(3),    // Events and favorites
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let input_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(vertical_chunks[0]);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical_chunks[1]);

        Self {
            date_input_area: input_chunks[0],
            search_input_area: input_chunks[1],
            results_area: main_chunks[0],
            favorites_area: main_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}
