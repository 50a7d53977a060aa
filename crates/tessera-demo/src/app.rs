//! Showcase state and main event loop.

use std::collections::HashSet;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tessera_widgets::{DataTable, InputField, InputType, TableView, Theme, ThemeMode};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::columns::rich_columns;
use crate::config::DemoConfig;
use crate::data::User;
use crate::event::{change_sender, click_sender, select_sender, UiEvent};
use crate::state::{Focus, UiState, EMAIL_FIELD, NAME_FIELD, PASSWORD_FIELD, SEARCH_FIELD};
use crate::ui;

/// Main application with host-owned state and the widgets showing it.
pub struct App {
    /// Host data the widgets render.
    pub(crate) state: UiState,

    /// Input fields, indexed by field slot.
    pub(crate) fields: Vec<InputField>,

    /// Users table.
    pub(crate) table: DataTable<User>,

    /// Palette for the surrounding chrome.
    pub(crate) theme: Theme,

    /// Receiver for widget notifications.
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,

    tick_rate: Duration,
}

impl App {
    /// Create the showcase over the given users.
    pub fn new(users: Vec<User>, config: &DemoConfig) -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();

        let mut state = UiState {
            users,
            ..UiState::default()
        };
        state.values[EMAIL_FIELD] = "not-an-email".to_string();
        state.refilter();

        let fields = build_fields(&ui_tx, config.theme, &state.values);
        let table = build_table(&ui_tx, config);

        let mut app = Self {
            state,
            fields,
            table,
            theme: Theme::for_mode(config.theme),
            ui_rx,
            tick_rate: config.tick_rate,
        };
        app.validate_email();
        app.apply_focus();
        app
    }

    /// Run the main event loop.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        loop {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break; // quit requested
                    }
                }
            }

            self.drain_events();
            self.table.tick();
        }

        Ok(())
    }

    /// Apply every pending widget notification.
    pub(crate) fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::FieldChanged { field, value } => {
                let Some(input) = self.fields.get_mut(field) else {
                    return;
                };
                input.set_value(value.clone());
                let label = input.get_label().unwrap_or("Field").to_string();
                self.state.values[field] = value;

                match field {
                    SEARCH_FIELD => self.refilter(),
                    EMAIL_FIELD => self.validate_email(),
                    _ => {}
                }
                self.state.status_message = Some(format!(
                    "{} changed ({} chars)",
                    label,
                    self.state.values[field].chars().count()
                ));
            }
            UiEvent::RowsSelected(names) => {
                self.state.status_message = Some(if names.is_empty() {
                    "Selection cleared".to_string()
                } else {
                    format!("Selected: {}", names.join(", "))
                });
            }
            UiEvent::RowClicked { name, index } => {
                self.state.status_message = Some(format!("Clicked {} (row {})", name, index + 1));
            }
        }
    }

    /// Handle a key press.
    ///
    /// Returns true if the app should quit.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Tab => {
                self.state.focus = self.state.focus.next();
                self.apply_focus();
                return false;
            }
            KeyCode::BackTab => {
                self.state.focus = self.state.focus.prev();
                self.apply_focus();
                return false;
            }
            KeyCode::Char('l') if ctrl => {
                let loading = self.table.view(&self.state.visible) != TableView::Loading;
                self.table.set_loading(loading);
                info!(loading, "Table loading toggled");
                return false;
            }
            _ => {}
        }

        match self.state.focus {
            Focus::Table => match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('x') => self.remove_selected(),
                _ => {
                    self.table.handle_key(key, &self.state.visible);
                }
            },
            Focus::Field(index) => {
                if let Some(field) = self.fields.get_mut(index) {
                    field.handle_key(key);
                }
            }
        }
        false
    }

    fn apply_focus(&mut self) {
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.set_focused(self.state.focus == Focus::Field(index));
        }
        self.table.set_focused(self.state.focus == Focus::Table);
    }

    fn refilter(&mut self) {
        self.state.refilter();
        self.table.sync_rows(&self.state.visible);
    }

    /// Delete the selected users from the dataset.
    fn remove_selected(&mut self) {
        let selected: HashSet<u32> = self
            .table
            .selected_rows(&self.state.visible)
            .iter()
            .map(|u| u.id)
            .collect();
        if selected.is_empty() {
            return;
        }
        self.state.users.retain(|u| !selected.contains(&u.id));
        info!(removed = selected.len(), remaining = self.state.users.len(), "Removed users");
        self.refilter();
    }

    fn validate_email(&mut self) {
        let value = &self.state.values[EMAIL_FIELD];
        let invalid = !value.is_empty() && !value.contains('@');
        debug!(invalid, "Email validated");
        if let Some(field) = self.fields.get_mut(EMAIL_FIELD) {
            field.set_invalid(invalid);
        }
    }
}

fn build_fields(
    ui_tx: &mpsc::UnboundedSender<UiEvent>,
    theme: ThemeMode,
    values: &[String],
) -> Vec<InputField> {
    let field = || InputField::new().theme(theme);
    let mut fields = vec![
        field()
            .label("Name")
            .placeholder("Enter your name")
            .helper_text("Shown on your profile")
            .on_change(change_sender(ui_tx, NAME_FIELD)),
        field()
            .label("Password")
            .placeholder("Enter a password")
            .input_type(InputType::Password)
            .show_password_toggle(true)
            .helper_text("Ctrl+T shows or hides the password")
            .on_change(change_sender(ui_tx, PASSWORD_FIELD)),
        field()
            .label("Search")
            .placeholder("Filter users by name or email")
            .input_type(InputType::Search)
            .show_clear_button(true)
            .helper_text("Ctrl+U clears")
            .on_change(change_sender(ui_tx, SEARCH_FIELD)),
        field()
            .label("Email")
            .placeholder("you@example.com")
            .input_type(InputType::Email)
            .error_message("Enter a valid email address")
            .on_change(change_sender(ui_tx, EMAIL_FIELD)),
    ];

    for (input, value) in fields.iter_mut().zip(values) {
        input.set_value(value.clone());
    }
    fields
}

fn build_table(ui_tx: &mpsc::UnboundedSender<UiEvent>, config: &DemoConfig) -> DataTable<User> {
    DataTable::new(rich_columns())
        .title(" Users ")
        .selectable(config.selectable)
        .loading(config.loading)
        .theme(Theme::for_mode(config.theme))
        .empty_text("No users match the search")
        .on_row_select(select_sender(ui_tx))
        .on_row_click(click_sender(ui_tx))
}
