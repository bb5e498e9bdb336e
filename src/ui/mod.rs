pub mod header;
pub mod help;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let table_area = chunks[1];
    app.set_viewport(table_area.height.saturating_sub(table::CHROME_LINES) as usize);

    header::render(
        frame,
        chunks[0],
        &app.theme,
        app.theme_kind.label(),
        app.rows.len(),
    );
    table::render(frame, table_area, &app.rows, app.scroll, &app.theme);
    statusbar::render(
        frame,
        chunks[2],
        app.status_message.as_ref(),
        app.refresh_in_flight(),
        &app.theme,
    );

    // Help overlay — rendered last to appear on top
    if app.show_help {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}
