/// A discrete key press, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Esc,
    Tab,
    Backspace,
    /// A printable character
    Char(char),
    /// A character pressed together with control
    Ctrl(char),
}
