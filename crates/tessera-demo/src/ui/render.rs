//! Main render functions for the demo.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tessera_widgets::{InputField, Theme};

use crate::app::App;
use crate::catalog::{CatalogApp, Story, StoryContent};
use crate::state::Focus;

/// Render the showcase.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Create main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(
        frame,
        header_area,
        &app.theme,
        " Tessera Showcase ",
        Line::from(Span::styled(
            format!(
                "{} of {} users shown",
                app.state.visible.len(),
                app.state.users.len()
            ),
            app.theme.muted_style(),
        )),
    );

    let [fields_area, table_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Fill(1)]).areas(body_area);
    render_fields(frame, fields_area, &app.fields);
    app.table.render(frame, table_area, &app.state.visible);

    let help = match app.state.focus {
        Focus::Table => {
            " Tab: next | ↑↓: move | s/1-9: sort | Space: select | a: all | x: delete | Enter: click | q: quit "
        }
        Focus::Field(_) => {
            " Tab: next | Ctrl+U: clear | Ctrl+T: show password | Ctrl+L: loading | Esc: quit "
        }
    };
    render_footer(frame, footer_area, &app.theme, app.state.status_message.as_deref(), help);
}

/// Render the catalog.
pub fn render_catalog(frame: &mut Frame, app: &CatalogApp) {
    let area = frame.area();

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let position = format!("[{}/{}] ", app.story.index() + 1, Story::ALL.len());
    let heading = Line::from(vec![
        Span::styled(position, app.theme.muted_style()),
        Span::styled(app.story.name(), app.theme.bold()),
        Span::raw("  "),
        Span::styled(app.story.description(), app.theme.muted_style()),
    ]);
    render_header(frame, header_area, &app.theme, " Tessera Catalog ", heading);

    match &app.content {
        StoryContent::Table { table, rows } => table.render(frame, body_area, rows),
        StoryContent::Fields { fields, .. } => {
            let [column, _] =
                Layout::horizontal([Constraint::Max(50), Constraint::Fill(1)]).areas(body_area);
            render_fields(frame, column, fields);
        }
    }

    let help = " PgUp/PgDn: story | Tab: next field | Esc: quit ";
    render_footer(frame, footer_area, &app.theme, app.status_message.as_deref(), help);
}

/// Render a titled header block around one line of text.
fn render_header(frame: &mut Frame, area: Rect, theme: &Theme, title: &str, line: Line) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(theme.focused_border().patch(theme.bold()))
        .border_style(theme.unfocused_border());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Stack fields top to bottom with one row between them.
fn render_fields(frame: &mut Frame, area: Rect, fields: &[InputField]) {
    let constraints = fields
        .iter()
        .map(|field| Constraint::Length(field.height()))
        .chain(std::iter::once(Constraint::Fill(1)));
    let areas = Layout::vertical(constraints).spacing(1).split(area);

    for (field, field_area) in fields.iter().zip(areas.iter()) {
        field.render(frame, *field_area);
    }
}

/// Render the footer with status and key help.
fn render_footer(frame: &mut Frame, area: Rect, theme: &Theme, status: Option<&str>, help: &str) {
    let footer = Line::from(vec![
        Span::styled(status.unwrap_or("Ready"), theme.success_style()),
        Span::raw(" |"),
        Span::styled(help, theme.muted_style()),
    ]);

    frame.render_widget(Paragraph::new(footer), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DemoConfig;
    use crate::data::sample_users;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_render_showcase() {
        let app = App::new(sample_users(), &DemoConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..40)
            .map(|y| (0..160).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");

        assert!(screen.contains("Tessera Showcase"));
        assert!(screen.contains("8 of 8 users shown"));
        assert!(screen.contains("Password"));
        assert!(screen.contains("Enter a valid email address"));
        assert!(screen.contains("John Doe"));
        assert!(screen.contains("Ready"));
    }
}
