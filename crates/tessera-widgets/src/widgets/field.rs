//! Host-controlled text input with label, messages and inline buttons.

use std::fmt;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tracing::debug;

use crate::theme::{Theme, ThemeMode};
use crate::utils::{display_width, fit_tail, mask};

/// Character shown in place of each password character.
const MASK: char = '•';

const CLEAR_GLYPH: &str = " ✕ ";
const SHOW_GLYPH: &str = " ◉ ";
const HIDE_GLYPH: &str = " ◌ ";

/// Input type of the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Password,
    Email,
    Number,
    Search,
    Tel,
    Url,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Email => "email",
            InputType::Number => "number",
            InputType::Search => "search",
            InputType::Tel => "tel",
            InputType::Url => "url",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual treatment of the input box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldVariant {
    /// Background fill, no border.
    Filled,
    /// Full border.
    #[default]
    Outlined,
    /// Neither border nor fill.
    Ghost,
}

/// Size of the input box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl FieldSize {
    /// Horizontal padding inside the input box.
    fn padding(self) -> u16 {
        match self {
            FieldSize::Sm => 0,
            FieldSize::Md => 1,
            FieldSize::Lg => 2,
        }
    }
}

/// Kind of message shown under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMessage {
    Error,
    Helper,
}

impl FieldMessage {
    /// Accessibility role of the message.
    pub fn role(&self) -> Option<&'static str> {
        match self {
            FieldMessage::Error => Some("alert"),
            FieldMessage::Helper => None,
        }
    }
}

type ChangeCallback = Box<dyn FnMut(&str)>;

/// A single-line text input.
///
/// The value is owned by the host: the field renders whatever was last
/// passed to [`InputField::set_value`] and reports edits through
/// `on_change` without applying them itself.
pub struct InputField {
    /// Current value, as provided by the host.
    value: String,
    /// Label shown above the input.
    label: Option<String>,
    /// Text shown while the value is empty.
    placeholder: Option<String>,
    /// Text shown under the input when valid.
    helper_text: Option<String>,
    /// Text shown under the input when invalid.
    error_message: Option<String>,
    disabled: bool,
    invalid: bool,
    variant: FieldVariant,
    size: FieldSize,
    /// Input type requested by the host.
    input_type: InputType,
    /// Input type in effect; flipped by the password toggle.
    current_input_type: InputType,
    show_clear_button: bool,
    show_password_toggle: bool,
    theme_mode: ThemeMode,
    focused: bool,
    on_change: Option<ChangeCallback>,
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl InputField {
    /// Create an empty outlined text field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            label: None,
            placeholder: None,
            helper_text: None,
            error_message: None,
            disabled: false,
            invalid: false,
            variant: FieldVariant::default(),
            size: FieldSize::default(),
            input_type: InputType::Text,
            current_input_type: InputType::Text,
            show_clear_button: false,
            show_password_toggle: false,
            theme_mode: ThemeMode::default(),
            focused: false,
            on_change: None,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn error_message(mut self, text: impl Into<String>) -> Self {
        self.error_message = Some(text.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn variant(mut self, variant: FieldVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: FieldSize) -> Self {
        self.size = size;
        self
    }

    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.set_input_type(input_type);
        self
    }

    pub fn show_clear_button(mut self, show: bool) -> Self {
        self.show_clear_button = show;
        self
    }

    pub fn show_password_toggle(mut self, show: bool) -> Self {
        self.show_password_toggle = show;
        self
    }

    pub fn theme(mut self, mode: ThemeMode) -> Self {
        self.theme_mode = mode;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Called with the proposed new value on every edit.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Replace the displayed value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Change the requested input type. A different type resets any
    /// password toggle; re-applying the same type keeps it.
    pub fn set_input_type(&mut self, input_type: InputType) {
        if self.input_type != input_type {
            self.input_type = input_type;
            self.current_input_type = input_type;
        }
    }

    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub fn set_error_message(&mut self, text: Option<String>) {
        self.error_message = text;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }

    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn current_input_type(&self) -> InputType {
        self.current_input_type
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn aria_invalid(&self) -> bool {
        self.invalid
    }

    /// Identifier of the error message element.
    pub fn error_id(&self) -> String {
        format!("{}-error", self.label.as_deref().unwrap_or("field"))
    }

    /// Identifier of the element describing the field, if an error is shown.
    pub fn described_by(&self) -> Option<String> {
        match self.message() {
            Some((FieldMessage::Error, _)) => Some(self.error_id()),
            _ => None,
        }
    }

    /// Message shown under the input. An error wins over helper text.
    pub fn message(&self) -> Option<(FieldMessage, &str)> {
        if self.invalid {
            return self
                .error_message
                .as_deref()
                .map(|text| (FieldMessage::Error, text));
        }
        self.helper_text
            .as_deref()
            .map(|text| (FieldMessage::Helper, text))
    }

    pub fn shows_clear_button(&self) -> bool {
        self.show_clear_button && !self.disabled && !self.value.is_empty()
    }

    pub fn shows_password_toggle(&self) -> bool {
        self.show_password_toggle && self.input_type == InputType::Password && !self.disabled
    }

    pub fn clear_button_label(&self) -> &'static str {
        "Clear input"
    }

    pub fn password_toggle_label(&self) -> &'static str {
        if self.current_input_type == InputType::Password {
            "Show password"
        } else {
            "Hide password"
        }
    }

    /// Text drawn in the input box: masked for passwords.
    pub fn display_text(&self) -> String {
        if self.current_input_type == InputType::Password {
            mask(&self.value, MASK)
        } else {
            self.value.clone()
        }
    }

    /// Flip between hidden and visible password.
    ///
    /// Returns false if the toggle is not shown.
    pub fn toggle_password_visibility(&mut self) -> bool {
        if !self.shows_password_toggle() {
            return false;
        }
        self.current_input_type = match self.current_input_type {
            InputType::Password => InputType::Text,
            _ => InputType::Password,
        };
        debug!(label = ?self.label, input_type = %self.current_input_type, "Password visibility toggled");
        true
    }

    /// Ask the host to empty the value and take focus.
    ///
    /// Returns false if the clear button is not shown.
    pub fn clear(&mut self) -> bool {
        if !self.shows_clear_button() {
            return false;
        }
        debug!(label = ?self.label, "Field cleared");
        self.emit("");
        self.focused = true;
        true
    }

    fn emit(&mut self, value: &str) {
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(value);
        }
    }

    /// Handle a key press.
    ///
    /// Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.disabled {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('t') if ctrl => self.toggle_password_visibility(),
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                let next = format!("{}{}", self.value, c);
                self.emit(&next);
                true
            }
            KeyCode::Backspace => {
                let mut next = self.value.clone();
                if next.pop().is_none() {
                    return false;
                }
                self.emit(&next);
                true
            }
            _ => false,
        }
    }

    /// Rows needed to render the field.
    pub fn height(&self) -> u16 {
        let label = u16::from(self.label.is_some());
        let message = u16::from(self.message().is_some());
        let input = match self.variant {
            FieldVariant::Outlined => 3,
            FieldVariant::Filled | FieldVariant::Ghost => 1,
        };
        label + input + message
    }

    /// Render the field.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let theme = Theme::for_mode(self.theme_mode);
        let dim = if self.disabled {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };

        let input_height = match self.variant {
            FieldVariant::Outlined => 3,
            FieldVariant::Filled | FieldVariant::Ghost => 1,
        };
        let [label_area, input_area, message_area] = Layout::vertical([
            Constraint::Length(u16::from(self.label.is_some())),
            Constraint::Length(input_height),
            Constraint::Length(u16::from(self.message().is_some())),
        ])
        .areas(area);

        // Label
        if let Some(label) = &self.label {
            let style = if self.disabled {
                theme.muted_style()
            } else {
                theme.text_style().add_modifier(Modifier::BOLD)
            };
            frame.render_widget(Paragraph::new(label.as_str()).style(style), label_area);
        }

        // Input box
        let inner = match self.variant {
            FieldVariant::Outlined => {
                let border_style = if self.invalid {
                    theme.error_style()
                } else if self.focused && !self.disabled {
                    theme.focused_border()
                } else {
                    theme.unfocused_border()
                };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style.patch(dim));
                let inner = block.inner(input_area);
                frame.render_widget(block, input_area);
                inner
            }
            FieldVariant::Filled => {
                frame.render_widget(Block::default().style(theme.surface_style()), input_area);
                input_area
            }
            FieldVariant::Ghost => input_area,
        };
        self.render_input_line(frame, inner, &theme, dim);

        // Message
        if let Some((kind, text)) = self.message() {
            let style = match kind {
                FieldMessage::Error => theme.error_style(),
                FieldMessage::Helper => theme.muted_style(),
            };
            frame.render_widget(Paragraph::new(text).style(style.patch(dim)), message_area);
        }
    }

    fn render_input_line(&self, frame: &mut Frame, area: Rect, theme: &Theme, dim: Style) {
        let padding = self.size.padding();

        let mut buttons: Vec<Span> = Vec::new();
        if self.shows_clear_button() {
            buttons.push(Span::styled(CLEAR_GLYPH, theme.muted_style()));
        }
        if self.shows_password_toggle() {
            let glyph = if self.current_input_type == InputType::Password {
                SHOW_GLYPH
            } else {
                HIDE_GLYPH
            };
            buttons.push(Span::styled(glyph, theme.muted_style()));
        }
        let buttons_width: u16 = buttons
            .iter()
            .map(|s| display_width(&s.content) as u16)
            .sum();

        let [_, text_area, buttons_area, _] = Layout::horizontal([
            Constraint::Length(padding),
            Constraint::Fill(1),
            Constraint::Length(buttons_width),
            Constraint::Length(padding),
        ])
        .areas(area);

        let mut text_style = theme.text_style().patch(dim);
        if self.size == FieldSize::Lg {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }

        let line = if self.value.is_empty() {
            let placeholder = self.placeholder.as_deref().unwrap_or_default();
            Line::from(Span::styled(placeholder.to_string(), theme.muted_style().patch(dim)))
        } else {
            let text = self.display_text();
            let visible = fit_tail(&text, usize::from(text_area.width.saturating_sub(1)));
            Line::from(Span::styled(visible.to_string(), text_style))
        };
        frame.render_widget(Paragraph::new(line), text_area);
        frame.render_widget(Paragraph::new(Line::from(buttons)), buttons_area);

        if self.focused && !self.disabled && text_area.width > 0 {
            let text_width = if self.value.is_empty() {
                0
            } else {
                display_width(fit_tail(
                    &self.display_text(),
                    usize::from(text_area.width.saturating_sub(1)),
                )) as u16
            };
            frame.set_cursor_position((text_area.x + text_width, text_area.y));
        }
    }
}

impl fmt::Debug for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputField")
            .field("value", &self.value)
            .field("label", &self.label)
            .field("input_type", &self.input_type)
            .field("current_input_type", &self.current_input_type)
            .field("disabled", &self.disabled)
            .field("invalid", &self.invalid)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn draw(field: &InputField) -> Vec<String> {
        let (width, height) = (40, field.height());
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| field.render(frame, frame.area())).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let calls: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = Rc::clone(&calls);
        (calls, move |value: &str| sink.borrow_mut().push(value.to_string()))
    }

    #[test]
    fn test_renders_label_and_placeholder() {
        let field = InputField::new()
            .label("Username")
            .placeholder("Enter username");
        let lines = draw(&field);
        assert!(lines[0].starts_with("Username"));
        assert!(lines[2].contains("Enter username"));
    }

    #[test]
    fn test_password_toggle_scenario() {
        let mut field = InputField::new()
            .value("secret")
            .input_type(InputType::Password)
            .show_password_toggle(true);

        assert_eq!(field.current_input_type(), InputType::Password);
        assert_eq!(field.display_text(), "••••••");
        assert_eq!(field.password_toggle_label(), "Show password");

        assert!(field.toggle_password_visibility());
        assert_eq!(field.current_input_type(), InputType::Text);
        assert_eq!(field.display_text(), "secret");
        assert_eq!(field.password_toggle_label(), "Hide password");

        assert!(field.toggle_password_visibility());
        assert_eq!(field.current_input_type(), InputType::Password);
        assert!(draw(&field).iter().any(|l| l.contains("••••••")));
    }

    #[test]
    fn test_password_toggle_hidden_for_text_or_disabled() {
        let mut text = InputField::new().show_password_toggle(true);
        assert!(!text.shows_password_toggle());
        assert!(!text.toggle_password_visibility());

        let mut disabled = InputField::new()
            .input_type(InputType::Password)
            .show_password_toggle(true)
            .disabled(true);
        assert!(!disabled.shows_password_toggle());
        assert!(!disabled.toggle_password_visibility());
        assert_eq!(disabled.current_input_type(), InputType::Password);
    }

    #[test]
    fn test_input_type_change_resets_toggle() {
        let mut field = InputField::new()
            .value("secret")
            .input_type(InputType::Password)
            .show_password_toggle(true);
        field.toggle_password_visibility();
        assert_eq!(field.current_input_type(), InputType::Text);

        // Re-applying the same type keeps the revealed password.
        field.set_input_type(InputType::Password);
        assert_eq!(field.current_input_type(), InputType::Text);
        assert_eq!(field.display_text(), "secret");

        field.set_input_type(InputType::Email);
        assert_eq!(field.current_input_type(), InputType::Email);
        field.set_input_type(InputType::Password);
        assert_eq!(field.current_input_type(), InputType::Password);
    }

    #[test]
    fn test_clear_button_scenario() {
        let (calls, on_change) = recorder();
        let mut field = InputField::new()
            .value("hello")
            .show_clear_button(true)
            .on_change(on_change);

        assert!(field.shows_clear_button());
        assert_eq!(field.clear_button_label(), "Clear input");
        assert!(draw(&field).iter().any(|l| l.contains("✕")));

        assert!(field.clear());
        assert_eq!(*calls.borrow(), vec![String::new()]);
        assert!(field.is_focused());
        assert_eq!(field.current_input_type(), InputType::Text);
    }

    #[test]
    fn test_clear_button_hidden_when_empty_or_disabled() {
        let mut empty = InputField::new().show_clear_button(true);
        assert!(!empty.shows_clear_button());
        assert!(!empty.clear());

        let disabled = InputField::new()
            .value("x")
            .show_clear_button(true)
            .disabled(true);
        assert!(!disabled.shows_clear_button());
        assert!(draw(&disabled).iter().all(|l| !l.contains("✕")));
    }

    #[test]
    fn test_clear_keeps_revealed_password() {
        let mut field = InputField::new()
            .value("secret")
            .input_type(InputType::Password)
            .show_password_toggle(true)
            .show_clear_button(true);
        field.toggle_password_visibility();
        field.clear();
        assert_eq!(field.current_input_type(), InputType::Text);
    }

    #[test]
    fn test_error_takes_precedence_over_helper() {
        let field = InputField::new()
            .label("Email")
            .helper_text("We never share it")
            .error_message("This field is required")
            .invalid(true);

        assert!(field.aria_invalid());
        assert_eq!(field.message(), Some((FieldMessage::Error, "This field is required")));
        assert_eq!(FieldMessage::Error.role(), Some("alert"));
        assert_eq!(field.described_by().as_deref(), Some("Email-error"));

        let lines = draw(&field);
        assert!(lines.iter().any(|l| l.contains("This field is required")));
        assert!(lines.iter().all(|l| !l.contains("We never share it")));
    }

    #[test]
    fn test_helper_shown_when_valid() {
        let field = InputField::new()
            .label("Email")
            .helper_text("We never share it")
            .error_message("This field is required");

        assert!(!field.aria_invalid());
        assert_eq!(field.message(), Some((FieldMessage::Helper, "We never share it")));
        assert_eq!(field.described_by(), None);
        assert!(draw(&field).iter().any(|l| l.contains("We never share it")));
    }

    #[test]
    fn test_invalid_without_error_shows_nothing() {
        let field = InputField::new().helper_text("hint").invalid(true);
        assert_eq!(field.message(), None);
        assert_eq!(field.error_id(), "field-error");
    }

    #[test]
    fn test_typing_reports_changes() {
        let (calls, on_change) = recorder();
        let mut field = InputField::new().value("ab").on_change(on_change);

        assert!(field.handle_key(KeyEvent::from(KeyCode::Char('c'))));
        assert!(field.handle_key(KeyEvent::from(KeyCode::Backspace)));
        // The host has not applied anything, so both edits start from "ab".
        assert_eq!(*calls.borrow(), vec!["abc".to_string(), "a".to_string()]);

        field.set_value("");
        assert!(!field.handle_key(KeyEvent::from(KeyCode::Backspace)));
    }

    #[test]
    fn test_control_shortcuts() {
        let (calls, on_change) = recorder();
        let mut field = InputField::new()
            .value("pw")
            .input_type(InputType::Password)
            .show_password_toggle(true)
            .show_clear_button(true)
            .on_change(on_change);

        assert!(field.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL)));
        assert_eq!(field.current_input_type(), InputType::Text);
        assert!(field.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert_eq!(*calls.borrow(), vec![String::new()]);
    }

    #[test]
    fn test_disabled_consumes_no_keys() {
        let (calls, on_change) = recorder();
        let mut field = InputField::new().disabled(true).on_change(on_change);
        assert!(!field.handle_key(KeyEvent::from(KeyCode::Char('x'))));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_variant_heights() {
        let outlined = InputField::new().label("L").helper_text("h");
        assert_eq!(outlined.height(), 5);
        let ghost = InputField::new().variant(FieldVariant::Ghost);
        assert_eq!(ghost.height(), 1);
        assert_eq!(draw(&ghost.value("plain"))[0].trim_end(), " plain");
    }

    #[test]
    fn test_size_padding() {
        let small = InputField::new()
            .variant(FieldVariant::Ghost)
            .size(FieldSize::Sm)
            .value("abc");
        assert!(draw(&small)[0].starts_with("abc"));

        let large = InputField::new()
            .variant(FieldVariant::Ghost)
            .size(FieldSize::Lg)
            .value("abc");
        assert!(draw(&large)[0].starts_with("  abc"));
    }
}
