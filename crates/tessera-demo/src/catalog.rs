//! Story catalog: one widget configuration per story.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tessera_widgets::{
    DataTable, FieldSize, FieldVariant, InputField, InputType, RowId, RowKey, Theme, ThemeMode,
};
use tokio::sync::mpsc;
use tracing::info;

use crate::columns::{basic_columns, rich_columns};
use crate::data::{sample_users, User};
use crate::error::DemoError;
use crate::event::{change_sender, click_sender, select_sender, UiEvent};
use crate::ui;

/// A named widget configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Story {
    Default,
    Selectable,
    Loading,
    Empty,
    CustomRender,
    CustomRowKey,
    Clickable,
    FieldDefault,
    FieldPassword,
    FieldClear,
    FieldError,
    FieldDisabled,
    FieldVariants,
    FieldSizes,
    FieldDark,
}

impl Story {
    pub const ALL: [Story; 15] = [
        Story::Default,
        Story::Selectable,
        Story::Loading,
        Story::Empty,
        Story::CustomRender,
        Story::CustomRowKey,
        Story::Clickable,
        Story::FieldDefault,
        Story::FieldPassword,
        Story::FieldClear,
        Story::FieldError,
        Story::FieldDisabled,
        Story::FieldVariants,
        Story::FieldSizes,
        Story::FieldDark,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Story::Default => "default",
            Story::Selectable => "selectable",
            Story::Loading => "loading",
            Story::Empty => "empty",
            Story::CustomRender => "custom-render",
            Story::CustomRowKey => "custom-row-key",
            Story::Clickable => "clickable",
            Story::FieldDefault => "field-default",
            Story::FieldPassword => "field-password",
            Story::FieldClear => "field-clear",
            Story::FieldError => "field-error",
            Story::FieldDisabled => "field-disabled",
            Story::FieldVariants => "field-variants",
            Story::FieldSizes => "field-sizes",
            Story::FieldDark => "field-dark",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Story::Default => "Sortable columns; press s or 1-3 to sort",
            Story::Selectable => "Checkbox column; Space toggles a row, a toggles all",
            Story::Loading => "Loading indicator replaces everything",
            Story::Empty => "Custom empty-state text",
            Story::CustomRender => "Status badge and formatted join date",
            Story::CustomRowKey => "Rows identified by email instead of id",
            Story::Clickable => "Enter clicks the cursor row",
            Story::FieldDefault => "Label, placeholder and helper text",
            Story::FieldPassword => "Masked input; Ctrl+T shows or hides it",
            Story::FieldClear => "Clear button; Ctrl+U empties the value",
            Story::FieldError => "Error message replaces helper text while invalid",
            Story::FieldDisabled => "Disabled field ignores input",
            Story::FieldVariants => "Filled, outlined and ghost",
            Story::FieldSizes => "Small, medium and large",
            Story::FieldDark => "Dark palette",
        }
    }

    /// Position in [`Story::ALL`].
    pub fn index(&self) -> usize {
        Story::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Story::ALL[(self.index() + 1) % Story::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Story::ALL[(self.index() + Story::ALL.len() - 1) % Story::ALL.len()]
    }
}

impl fmt::Display for Story {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Story {
    type Err = DemoError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Story::ALL
            .iter()
            .copied()
            .find(|s| s.name() == name)
            .ok_or_else(|| DemoError::UnknownStory(name.to_string()))
    }
}

/// Widgets a story shows.
pub enum StoryContent {
    Table {
        table: DataTable<User>,
        rows: Vec<User>,
    },
    Fields {
        fields: Vec<InputField>,
        focus: usize,
    },
}

impl StoryContent {
    /// Build the widgets of `story`, forwarding callbacks to `ui_tx`.
    pub fn build(story: Story, ui_tx: &mpsc::UnboundedSender<UiEvent>) -> Self {
        let users = sample_users();
        let table = || {
            DataTable::new(basic_columns())
                .focused(true)
                .on_row_select(select_sender(ui_tx))
        };
        let field = |index: usize| {
            InputField::new()
                .on_change(change_sender(ui_tx, index))
        };

        let content = match story {
            Story::Default => Self::table(table(), users),
            Story::Selectable => Self::table(table().selectable(true), users),
            Story::Loading => Self::table(table().loading(true), users),
            Story::Empty => Self::table(table().empty_text("No data found"), Vec::new()),
            Story::CustomRender => Self::table(
                DataTable::new(rich_columns())
                    .focused(true)
                    .selectable(true)
                    .on_row_select(select_sender(ui_tx)),
                users,
            ),
            Story::CustomRowKey => Self::table(
                table()
                    .selectable(true)
                    .row_key(RowKey::func(|u: &User| RowId::from(u.email.as_str()))),
                users,
            ),
            Story::Clickable => Self::table(table().on_row_click(click_sender(ui_tx)), users),
            Story::FieldDefault => Self::fields(vec![field(0)
                .label("Username")
                .placeholder("Enter username")
                .helper_text("This is some helpful information")]),
            Story::FieldPassword => Self::fields(vec![field(0)
                .label("Password")
                .value("secret123")
                .input_type(InputType::Password)
                .show_password_toggle(true)]),
            Story::FieldClear => Self::fields(vec![field(0)
                .label("Search")
                .value("Clear me")
                .show_clear_button(true)]),
            Story::FieldError => Self::fields(vec![field(0)
                .label("Email")
                .placeholder("you@example.com")
                .helper_text("We never share your email")
                .error_message("This field is required")
                .invalid(true)]),
            Story::FieldDisabled => Self::fields(vec![field(0)
                .label("Disabled")
                .value("Can't edit this")
                .show_clear_button(true)
                .disabled(true)]),
            Story::FieldVariants => Self::fields(vec![
                field(0).label("Filled").variant(FieldVariant::Filled).placeholder("filled"),
                field(1).label("Outlined").variant(FieldVariant::Outlined).placeholder("outlined"),
                field(2).label("Ghost").variant(FieldVariant::Ghost).placeholder("ghost"),
            ]),
            Story::FieldSizes => Self::fields(vec![
                field(0).label("Small").size(FieldSize::Sm).value("sm"),
                field(1).label("Medium").size(FieldSize::Md).value("md"),
                field(2).label("Large").size(FieldSize::Lg).value("lg"),
            ]),
            Story::FieldDark => Self::fields(vec![
                field(0)
                    .label("Password")
                    .value("secret123")
                    .input_type(InputType::Password)
                    .show_password_toggle(true)
                    .theme(ThemeMode::Dark),
                field(1)
                    .label("Email")
                    .error_message("This field is required")
                    .invalid(true)
                    .theme(ThemeMode::Dark),
            ]),
        };
        content.with_focus()
    }

    fn table(table: DataTable<User>, rows: Vec<User>) -> Self {
        Self::Table { table, rows }
    }

    fn fields(fields: Vec<InputField>) -> Self {
        Self::Fields { fields, focus: 0 }
    }

    fn with_focus(mut self) -> Self {
        if let Self::Fields { fields, focus } = &mut self {
            for (index, field) in fields.iter_mut().enumerate() {
                field.set_focused(index == *focus);
            }
        }
        self
    }
}

/// Catalog browser with the current story and its widgets.
pub struct CatalogApp {
    pub(crate) story: Story,
    pub(crate) content: StoryContent,
    pub(crate) status_message: Option<String>,
    pub(crate) theme: Theme,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    tick_rate: Duration,
}

impl CatalogApp {
    pub fn new(story: Story, tick_rate: Duration) -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
        let content = StoryContent::build(story, &ui_tx);
        Self {
            story,
            content,
            status_message: None,
            theme: Theme::default(),
            ui_tx,
            ui_rx,
            tick_rate,
        }
    }

    /// Run the catalog event loop.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> std::io::Result<()> {
        loop {
            terminal.draw(|frame| ui::render_catalog(frame, self))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break; // quit requested
                    }
                }
            }

            self.drain_events();
            if let StoryContent::Table { table, .. } = &mut self.content {
                table.tick();
            }
        }

        Ok(())
    }

    /// Switch to another story, discarding the current widgets.
    pub(crate) fn show(&mut self, story: Story) {
        // Drop notifications raised by the outgoing story.
        while self.ui_rx.try_recv().is_ok() {}
        self.story = story;
        self.content = StoryContent::build(story, &self.ui_tx);
        self.status_message = None;
        info!(story = %story, "Showing story");
    }

    pub(crate) fn drain_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::FieldChanged { field, value } => {
                if let StoryContent::Fields { fields, .. } = &mut self.content {
                    if let Some(input) = fields.get_mut(field) {
                        if self.story == Story::FieldError {
                            input.set_invalid(value.is_empty());
                        }
                        self.status_message = Some(format!("on_change({value:?})"));
                        input.set_value(value);
                    }
                }
            }
            UiEvent::RowsSelected(names) => {
                self.status_message = Some(format!("on_row_select([{}])", names.join(", ")));
            }
            UiEvent::RowClicked { name, index } => {
                self.status_message = Some(format!("on_row_click({name}, {index})"));
            }
        }
    }

    /// Handle a key press.
    ///
    /// Returns true if the catalog should quit.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            return true;
        }

        match key.code {
            KeyCode::PageDown => {
                self.show(self.story.next());
                return false;
            }
            KeyCode::PageUp => {
                self.show(self.story.prev());
                return false;
            }
            _ => {}
        }

        match &mut self.content {
            StoryContent::Table { table, rows } => {
                if key.code == KeyCode::Char('q') {
                    return true;
                }
                table.handle_key(key, rows);
            }
            StoryContent::Fields { fields, focus } => {
                if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                    let count = fields.len();
                    *focus = if key.code == KeyCode::Tab {
                        (*focus + 1) % count
                    } else {
                        (*focus + count - 1) % count
                    };
                    for (index, field) in fields.iter_mut().enumerate() {
                        field.set_focused(index == *focus);
                    }
                } else if let Some(field) = fields.get_mut(*focus) {
                    field.handle_key(key);
                }
            }
        }
        false
    }
}

/// Print every story with its description.
pub fn print_story_list() {
    for story in Story::ALL {
        println!("{:<16} {}", story.name(), story.description());
    }
}
