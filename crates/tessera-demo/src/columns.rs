//! Column sets for the users table.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tessera_widgets::{Align, Column};

use crate::data::{User, UserStatus};

/// Name, email and age; all sortable.
pub fn basic_columns() -> Vec<Column<User>> {
    vec![
        Column::new("name", "Name", "name").sortable(),
        Column::new("email", "Email", "email").sortable(),
        Column::new("age", "Age", "age")
            .sortable()
            .width(6)
            .align(Align::Right),
    ]
}

/// Basic columns plus a status badge and a formatted join date.
pub fn rich_columns() -> Vec<Column<User>> {
    let mut columns = basic_columns();
    columns.push(Column::new("role", "Role", "role").width(8));
    columns.push(
        Column::<User>::new("status", "Status", "status")
            .sortable()
            .width(10)
            .align(Align::Center)
            .render(|_, user: &User, _| status_badge(user.status)),
    );
    columns.push(
        Column::<User>::new("joined", "Joined", "joined")
            .sortable()
            .width(13)
            .render(|_, user: &User, _| joined_cell(user)),
    );
    columns
}

/// Colored label for a status.
pub fn status_badge(status: UserStatus) -> Line<'static> {
    let color = match status {
        UserStatus::Active => Color::Green,
        UserStatus::Inactive => Color::Red,
        UserStatus::Pending => Color::Yellow,
    };
    Line::from(Span::styled(
        format!(" {status} "),
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    ))
}

fn joined_cell(user: &User) -> Line<'static> {
    match user.joined {
        Some(date) => Line::from(date.format("%b %d, %Y").to_string()),
        None => Line::styled("-", Style::default().fg(Color::DarkGray)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_users;
    use ratatui::layout::Alignment;

    #[test]
    fn test_rich_columns_render_badge_and_date() {
        let users = sample_users();
        let columns = rich_columns();

        let status = columns.iter().find(|c| c.key == "status").unwrap();
        let badge = status.cell(&users[2], 0);
        assert_eq!(badge.to_string(), " inactive ");
        assert_eq!(badge.alignment, Some(Alignment::Center));

        let joined = columns.iter().find(|c| c.key == "joined").unwrap();
        assert_eq!(joined.cell(&users[0], 0).to_string(), "Jan 15, 2023");
    }

    #[test]
    fn test_missing_join_date() {
        let mut user = sample_users().remove(0);
        user.joined = None;
        assert_eq!(joined_cell(&user).to_string(), "-");
    }
}
