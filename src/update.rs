use crate::message::Message;
use crate::picker::{InputMode, PickMode, Picker};
use crossterm::event::{KeyCode, KeyModifiers};

pub fn update(picker: &mut Picker, msg: Message) {
    match msg {
        Message::Key(key) => {
            if let Some(next) = handle_key(picker, key.code, key.modifiers) {
                update(picker, next);
            }
        }
        Message::Tick => {}

        Message::MoveUp => picker.move_up(),
        Message::MoveDown => picker.move_down(),
        Message::MoveFirst => picker.move_first(),
        Message::MoveLast => picker.move_last(),

        Message::Toggle => picker.toggle_current(),
        Message::ToggleAll => picker.toggle_all(),
        Message::Confirm => picker.confirm(),
        Message::Cancel => picker.cancel(),

        Message::StartSearch => {
            picker.input_mode = InputMode::Search;
        }
        Message::SearchChar(c) => {
            let mut query = picker.search_query.clone();
            query.push(c);
            picker.set_search(query);
        }
        Message::SearchBackspace => {
            let mut query = picker.search_query.clone();
            query.pop();
            picker.set_search(query);
        }
        Message::SearchConfirm => {
            picker.input_mode = InputMode::Normal;
        }
        Message::SearchCancel => {
            picker.input_mode = InputMode::Normal;
            picker.set_search(String::new());
        }
    }
}

fn handle_key(picker: &Picker, code: KeyCode, modifiers: KeyModifiers) -> Option<Message> {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(Message::Cancel);
    }

    match picker.input_mode {
        InputMode::Search => match code {
            KeyCode::Esc => Some(Message::SearchCancel),
            KeyCode::Enter => Some(Message::SearchConfirm),
            KeyCode::Backspace => Some(Message::SearchBackspace),
            KeyCode::Up => Some(Message::MoveUp),
            KeyCode::Down => Some(Message::MoveDown),
            KeyCode::Char(c) => Some(Message::SearchChar(c)),
            _ => None,
        },
        InputMode::Normal => match code {
            KeyCode::Up | KeyCode::Char('k') => Some(Message::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::MoveDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Message::MoveFirst),
            KeyCode::End | KeyCode::Char('G') => Some(Message::MoveLast),
            KeyCode::Char(' ') if picker.mode == PickMode::Multiple => Some(Message::Toggle),
            KeyCode::Char('a') if picker.mode == PickMode::Multiple => Some(Message::ToggleAll),
            KeyCode::Char('/') => Some(Message::StartSearch),
            KeyCode::Enter => Some(Message::Confirm),
            KeyCode::Esc | KeyCode::Char('q') => Some(Message::Cancel),
            _ => None,
        },
    }
}
