//! Events forwarded from widget callbacks to the app loop.

use tokio::sync::mpsc::UnboundedSender;

use crate::data::User;

/// Notifications raised by widgets while handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Selection changed; names of the selected users in display order.
    RowsSelected(Vec<String>),

    /// A row was clicked.
    RowClicked { name: String, index: usize },

    /// A field proposed a new value.
    FieldChanged { field: usize, value: String },
}

/// Change callback forwarding the field's proposed values.
pub fn change_sender(ui_tx: &UnboundedSender<UiEvent>, field: usize) -> impl FnMut(&str) + 'static {
    let tx = ui_tx.clone();
    move |value: &str| {
        let _ = tx.send(UiEvent::FieldChanged {
            field,
            value: value.to_string(),
        });
    }
}

/// Selection callback forwarding the selected users' names.
pub fn select_sender(ui_tx: &UnboundedSender<UiEvent>) -> impl FnMut(&[&User]) + 'static {
    let tx = ui_tx.clone();
    move |rows: &[&User]| {
        let names = rows.iter().map(|u| u.name.clone()).collect();
        let _ = tx.send(UiEvent::RowsSelected(names));
    }
}

/// Click callback forwarding the clicked user's name.
pub fn click_sender(ui_tx: &UnboundedSender<UiEvent>) -> impl FnMut(&User, usize) + 'static {
    let tx = ui_tx.clone();
    move |user: &User, index| {
        let _ = tx.send(UiEvent::RowClicked {
            name: user.name.clone(),
            index,
        });
    }
}
