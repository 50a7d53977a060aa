//! Sortable, selectable data table.

use std::fmt;
use std::sync::Arc;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use tracing::debug;

use tessera_core::{
    CoreError, Record, RowKey, SortConfig, SortDirection, TableEngine, TableView, Value,
};

use crate::style::{compose, RowStyle};
use crate::theme::Theme;

/// Frames of the loading spinner.
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Default text of the empty state.
pub const DEFAULT_EMPTY_TEXT: &str = "No data available";

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for Alignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Alignment::Left,
            Align::Center => Alignment::Center,
            Align::Right => Alignment::Right,
        }
    }
}

/// Custom cell renderer: `(raw value, record, display index) -> content`.
pub type CellRenderer<T> = Arc<dyn Fn(&Value, &T, usize) -> Line<'static> + Send + Sync>;

/// A column definition for the table.
pub struct Column<T> {
    /// Unique column key.
    pub key: String,
    /// Column header text.
    pub title: String,
    /// Field read from each row.
    pub data_index: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Optional custom cell renderer.
    pub render: Option<CellRenderer<T>>,
    /// Fixed width in cells; flexible when unset.
    pub width: Option<u16>,
    /// Horizontal alignment of header and cells.
    pub align: Align,
}

impl<T> Column<T> {
    /// Create a column reading `data_index`.
    pub fn new(key: impl Into<String>, title: impl Into<String>, data_index: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            data_index: data_index.into(),
            sortable: false,
            render: None,
            width: None,
            align: Align::Left,
        }
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Render cells with a custom function.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &T, usize) -> Line<'static> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// Set a fixed width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    fn constraint(&self) -> Constraint {
        match self.width {
            Some(width) => Constraint::Length(width),
            None => Constraint::Fill(1),
        }
    }
}

impl<T: Record> Column<T> {
    /// Content of this column's cell for `record` shown at `index`.
    pub fn cell(&self, record: &T, index: usize) -> Line<'static> {
        let value = record.field(&self.data_index);
        let line = match &self.render {
            Some(render) => render(&value, record, index),
            None => Line::from(value.to_cell_text()),
        };
        if line.alignment.is_some() {
            line
        } else {
            line.alignment(self.align.into())
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            data_index: self.data_index.clone(),
            sortable: self.sortable,
            render: self.render.clone(),
            width: self.width,
            align: self.align,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("data_index", &self.data_index)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| ".."))
            .field("width", &self.width)
            .field("align", &self.align)
            .finish()
    }
}

type SelectCallback<T> = Box<dyn FnMut(&[&T])>;
type ClickCallback<T> = Box<dyn FnMut(&T, usize)>;

/// Table widget with client-side sorting and row selection.
///
/// The table never stores rows. Pass the host's current rows to every
/// render and interaction; the display order is derived from them each
/// time.
pub struct DataTable<T> {
    /// Column definitions.
    columns: Vec<Column<T>>,
    /// Sort and selection state.
    engine: TableEngine<T>,
    /// Show the loading indicator instead of anything else.
    loading: bool,
    /// Show the checkbox column.
    selectable: bool,
    /// Text of the empty state.
    empty_text: String,
    /// Table title; the populated view appends the row count.
    title: Option<String>,
    /// Outer block style.
    container_style: Style,
    /// Extra header row style.
    header_style: Style,
    /// Caller-supplied row style.
    row_style: Option<RowStyle<T>>,
    /// Theme for styling.
    theme: Theme,
    /// Whether the table has keyboard focus.
    focused: bool,
    /// Cursor position in display order.
    cursor: usize,
    /// Column targeted by the sort key.
    focused_column: usize,
    /// Current spinner frame.
    spinner_frame: usize,
    on_row_select: Option<SelectCallback<T>>,
    on_row_click: Option<ClickCallback<T>>,
}

impl<T: Record> DataTable<T> {
    /// Create a new table with the given columns.
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            engine: TableEngine::default(),
            loading: false,
            selectable: false,
            empty_text: DEFAULT_EMPTY_TEXT.to_string(),
            title: None,
            container_style: Style::default(),
            header_style: Style::default(),
            row_style: None,
            theme: Theme::default(),
            focused: false,
            cursor: 0,
            focused_column: 0,
            spinner_frame: 0,
            on_row_select: None,
            on_row_click: None,
        }
    }

    /// Show the loading indicator.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Show the checkbox column.
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set how row identities are derived.
    pub fn row_key(mut self, row_key: RowKey<T>) -> Self {
        self.engine.set_row_key(row_key);
        self
    }

    /// Set the empty-state text.
    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Set the table title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the outer block style.
    pub fn style(mut self, style: Style) -> Self {
        self.container_style = style;
        self
    }

    /// Set an extra header row style.
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    /// Set a static or per-row style.
    pub fn row_style(mut self, style: impl Into<RowStyle<T>>) -> Self {
        self.row_style = Some(style.into());
        self
    }

    /// Set the theme.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set whether the table has keyboard focus.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Called with the selected displayed rows whenever selection changes.
    pub fn on_row_select<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[&T]) + 'static,
    {
        self.on_row_select = Some(Box::new(f));
        self
    }

    /// Called with a row and its display index when the row is clicked.
    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: FnMut(&T, usize) + 'static,
    {
        self.on_row_click = Some(Box::new(f));
        self
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn sort_config(&self) -> &SortConfig {
        self.engine.sort()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advance the loading spinner by one frame.
    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
    }

    /// What the table currently shows.
    pub fn view(&self, rows: &[T]) -> TableView {
        TableView::resolve(self.loading, rows.len())
    }

    /// Rows in display order.
    pub fn display_rows<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        self.engine.display_rows(rows)
    }

    /// Selected rows in display order.
    pub fn selected_rows<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        self.engine.selected_rows(rows)
    }

    /// Whether the select-all checkbox is checked.
    pub fn header_checked(&self, rows: &[T]) -> bool {
        self.engine.header_checked(rows)
    }

    /// Whether the row at `display_index` is selected.
    pub fn is_row_selected(&self, rows: &[T], display_index: usize) -> bool {
        self.engine.is_selected(rows, display_index)
    }

    /// Click the header of the column at `column_index`.
    ///
    /// Returns true if the sort changed.
    pub fn click_header(&mut self, column_index: usize) -> bool {
        let Some(column) = self.columns.get(column_index) else {
            return false;
        };
        let changed = self.engine.click_header(&column.data_index, column.sortable);
        if changed {
            let sort = self.engine.sort();
            debug!(column = %column.key, direction = ?sort.direction, "Sort changed");
        }
        changed
    }

    /// Sort by the column with the given key, bypassing header clicks.
    pub fn sort_by_key(&mut self, key: &str, direction: SortDirection) -> Result<(), CoreError> {
        let column = self
            .columns
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| CoreError::UnknownColumn(key.to_string()))?;
        self.engine
            .set_sort(SortConfig::by(column.data_index.clone(), direction));
        Ok(())
    }

    /// Remove any sort and show rows in input order.
    pub fn clear_sort(&mut self) {
        self.engine.set_sort(SortConfig::default());
    }

    /// Toggle the checkbox of the row at `display_index`.
    ///
    /// Returns true if the selection changed.
    pub fn toggle_row(&mut self, rows: &[T], display_index: usize) -> bool {
        if !self.selectable {
            return false;
        }
        let Some(selected) = self.engine.toggle_row(rows, display_index) else {
            return false;
        };
        debug!(index = display_index, selected = selected.len(), "Row selection toggled");
        self.notify_selection(&selected);
        true
    }

    /// Toggle the select-all checkbox.
    pub fn toggle_all(&mut self, rows: &[T]) -> bool {
        if !self.selectable {
            return false;
        }
        let selected = self.engine.toggle_all(rows);
        debug!(selected = selected.len(), total = rows.len(), "Select all toggled");
        self.notify_selection(&selected);
        true
    }

    /// Click the row at `display_index`.
    pub fn click_row(&mut self, rows: &[T], display_index: usize) -> bool {
        let Some(record) = self.engine.display_rows(rows).get(display_index).copied() else {
            return false;
        };
        if let Some(on_row_click) = self.on_row_click.as_mut() {
            on_row_click(record, display_index);
        }
        true
    }

    /// Reconcile internal state with a changed data set.
    ///
    /// Selected identities that are no longer displayed are dropped and the
    /// host is notified with the surviving selection. The cursor is clamped
    /// to the new row count.
    pub fn sync_rows(&mut self, rows: &[T]) {
        if let Some(surviving) = self.engine.reconcile(rows) {
            debug!(selected = surviving.len(), "Dropped stale selection");
            self.notify_selection(&surviving);
        }
        self.cursor = self.cursor.min(rows.len().saturating_sub(1));
    }

    fn notify_selection(&mut self, selected: &[&T]) {
        if let Some(on_row_select) = self.on_row_select.as_mut() {
            on_row_select(selected);
        }
    }

    /// Handle a key press.
    ///
    /// Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent, rows: &[T]) -> bool {
        if self.view(rows) != TableView::Populated
            || key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        let last_row = rows.len() - 1;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(last_row);
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = last_row;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.focused_column = self.focused_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.focused_column =
                    (self.focused_column + 1).min(self.columns.len().saturating_sub(1));
            }
            KeyCode::Char('s') => {
                self.click_header(self.focused_column);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index >= self.columns.len() {
                    return false;
                }
                self.focused_column = index;
                self.click_header(index);
            }
            KeyCode::Char(' ') => return self.toggle_row(rows, self.cursor),
            KeyCode::Char('a') => return self.toggle_all(rows),
            KeyCode::Enter => return self.click_row(rows, self.cursor),
            _ => return false,
        }
        true
    }

    /// Render the table.
    pub fn render(&self, frame: &mut Frame, area: Rect, rows: &[T]) {
        match self.view(rows) {
            TableView::Loading => {
                let line = Line::from(vec![
                    Span::styled(SPINNER[self.spinner_frame], self.theme.warning_style()),
                    Span::raw(" "),
                    Span::styled("Loading...", self.theme.muted_style()),
                ]);
                self.render_placeholder(frame, area, line);
            }
            TableView::Empty => {
                let line = Line::styled(self.empty_text.clone(), self.theme.muted_style());
                self.render_placeholder(frame, area, line);
            }
            TableView::Populated => self.render_rows(frame, area, rows),
        }
    }

    fn block(&self, title: Option<String>) -> Block<'static> {
        let border_style = if self.focused {
            self.theme.focused_border()
        } else {
            self.theme.unfocused_border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(self.container_style);
        match title.or_else(|| self.title.clone()) {
            Some(title) => block.title(title),
            None => block,
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect, line: Line<'static>) {
        let block = self.block(None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, rows: &[T]) {
        let display = self.engine.display_rows(rows);
        let ids = self.engine.display_ids(rows);
        let selection = self.engine.selection();
        let sort = self.engine.sort();

        // Header row
        let mut header_cells: Vec<Cell> = Vec::new();
        if self.selectable {
            header_cells.push(Cell::from(checkbox(self.engine.header_checked(rows))));
        }
        for (i, column) in self.columns.iter().enumerate() {
            let indicator = match (column.sortable && sort.is_sorted_by(&column.data_index), sort.direction) {
                (false, _) => "",
                (true, SortDirection::Ascending) => " ▲",
                (true, SortDirection::Descending) => " ▼",
            };
            let mut style = Style::default();
            if self.focused && i == self.focused_column {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            let title = Line::styled(format!("{}{}", column.title, indicator), style)
                .alignment(column.align.into());
            header_cells.push(Cell::from(title));
        }
        let header = Row::new(header_cells)
            .style(self.theme.header_style().patch(self.header_style))
            .height(1);

        // Data rows
        let clickable = self.on_row_click.is_some();
        let table_rows: Vec<Row> = display
            .iter()
            .zip(&ids)
            .enumerate()
            .map(|(index, (record, id))| {
                let is_selected = selection.contains(id);
                let mut cells: Vec<Cell> = Vec::with_capacity(self.columns.len() + 1);
                if self.selectable {
                    cells.push(Cell::from(checkbox(is_selected)));
                }
                cells.extend(self.columns.iter().map(|c| Cell::from(c.cell(record, index))));

                let style = compose([
                    Some(self.theme.text_style()),
                    is_selected.then(|| self.theme.selected_row_style()),
                    self.row_style.as_ref().map(|hook| hook.resolve(record, index)),
                    (clickable && self.focused && index == self.cursor)
                        .then(|| self.theme.hover_row_style()),
                ]);
                Row::new(cells).style(style).height(1)
            })
            .collect();

        // Widths
        let mut widths: Vec<Constraint> = Vec::with_capacity(self.columns.len() + 1);
        if self.selectable {
            widths.push(Constraint::Length(3));
        }
        widths.extend(self.columns.iter().map(Column::constraint));

        // Title
        let selected = self.engine.selected_count(rows);
        let mut parts: Vec<String> = Vec::with_capacity(3);
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            parts.push(title.to_string());
        }
        parts.push(format!("{} rows", rows.len()));
        if self.selectable && selected > 0 {
            parts.push(format!("{selected} selected"));
        }
        let title = format!(" {} ", parts.join(" · "));

        let mut table = Table::new(table_rows, widths)
            .header(header)
            .block(self.block(Some(title)).title_style(self.theme.bold()));
        if self.focused {
            table = table
                .highlight_symbol("› ")
                .row_highlight_style(Style::default().add_modifier(Modifier::BOLD));
        }

        let mut state = TableState::default();
        if self.focused {
            state.select(Some(self.cursor.min(rows.len() - 1)));
        }

        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("loading", &self.loading)
            .field("selectable", &self.selectable)
            .field("empty_text", &self.empty_text)
            .field("focused", &self.focused)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}
