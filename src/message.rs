use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum Message {
    Key(KeyEvent),
    Tick,

    // Navigation
    MoveUp,
    MoveDown,
    MoveFirst,
    MoveLast,

    // Selection
    Toggle,
    ToggleAll,
    Confirm,
    Cancel,

    // Search
    StartSearch,
    SearchChar(char),
    SearchBackspace,
    SearchConfirm,
    SearchCancel,
}
