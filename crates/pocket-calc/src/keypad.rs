//! On-screen keypad and keyboard routing
//!
//! [`Event::from_key`] maps keyboard key names (as a browser or terminal
//! reports them) to calculator events. [`Keypad`] is the 5x4 button grid:
//!
//! ```text
//! [ C ] [ ⌫ ] [ % ] [ ± ]
//! [ 7 ] [ 8 ] [ 9 ] [ / ]
//! [ 4 ] [ 5 ] [ 6 ] [ * ]
//! [ 1 ] [ 2 ] [ 3 ] [ - ]
//! [ 0 ] [ . ] [ = ] [ + ]
//! ```

use crate::core::{Event, Operation};

impl Event {
    /// Routes a keyboard key name to an event
    ///
    /// Digits, `.`, `+ - * /`, `%`, `Enter`/`=`, `Backspace` and `Escape`
    /// are recognised. Anything else returns `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            "." => Some(Self::Decimal),
            "%" => Some(Self::Percent),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Some(Self::Digit(c)),
                    (Some(c), None) => Operation::from_char(c).ok().map(Self::Operator),
                    _ => None,
                }
            }
        }
    }

    /// The canonical key name that routes to this event
    #[must_use]
    pub fn key_name(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "Enter".to_string(),
            Self::ToggleSign => "Negate".to_string(),
            Self::Percent => "%".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Clear => "Escape".to_string(),
        }
    }

    /// The label printed on the keypad button for this event
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Percent => "%".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::Clear => "C".to_string(),
        }
    }

    fn button_id(&self) -> String {
        let name = match self {
            Self::Digit(d) => return format!("btn-{d}"),
            Self::Decimal => "decimal",
            Self::Operator(Operation::Add) => "plus",
            Self::Operator(Operation::Subtract) => "minus",
            Self::Operator(Operation::Multiply) => "times",
            Self::Operator(Operation::Divide) => "divide",
            Self::Equals => "equals",
            Self::ToggleSign => "sign",
            Self::Percent => "percent",
            Self::Backspace => "backspace",
            Self::Clear => "clear",
        };
        format!("btn-{name}")
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text on the button
    pub label: String,
    /// Stable element id, e.g. `btn-7` or `btn-plus`
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Whether the button is currently highlighted
    pub pressed: bool,
    /// Event fired when the button is pressed
    pub event: Event,
}

impl KeypadButton {
    /// Creates a released button at `(row, col)`
    #[must_use]
    pub fn new(event: Event, row: usize, col: usize) -> Self {
        Self {
            label: event.label(),
            id: event.button_id(),
            row,
            col,
            pressed: false,
            event,
        }
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The calculator keypad, a 5x4 grid in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard layout
    #[must_use]
    pub fn new() -> Self {
        let digit = Event::Digit;
        let op = Event::Operator;
        let layout = [
            [Event::Clear, Event::Backspace, Event::Percent, Event::ToggleSign],
            [digit('7'), digit('8'), digit('9'), op(Operation::Divide)],
            [digit('4'), digit('5'), digit('6'), op(Operation::Multiply)],
            [digit('1'), digit('2'), digit('3'), op(Operation::Subtract)],
            [digit('0'), Event::Decimal, Event::Equals, op(Operation::Add)],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, events)| {
                events
                    .iter()
                    .enumerate()
                    .map(move |(col, event)| KeypadButton::new(*event, row, col))
            })
            .collect();

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Button by row-major index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Index of the button with this label
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.label == label)
    }

    /// Index of the button with this element id
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.id == id)
    }

    /// Index of the button that fires `event`
    #[must_use]
    pub fn find_button_by_event(&self, event: Event) -> Option<usize> {
        self.buttons.iter().position(|b| b.event == event)
    }

    /// Marks the button at `index` pressed
    pub fn press_button(&mut self, index: usize) {
        if let Some(btn) = self.buttons.get_mut(index) {
            btn.set_pressed(true);
        }
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for `event`, releasing every other one
    pub fn highlight(&mut self, event: Event) {
        self.release_all();
        if let Some(idx) = self.find_button_by_event(event) {
            self.press_button(idx);
        }
    }

    /// Index of the highlighted button, if any
    #[must_use]
    pub fn pressed_button(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.pressed)
    }

    /// All buttons in row-major order
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Renders the grid as text, one row per line
    ///
    /// A highlighted button is drawn as `[>7<]`.
    #[must_use]
    pub fn render(&self) -> String {
        let (rows, cols) = self.dimensions();
        (0..rows)
            .map(|row| {
                (0..cols)
                    .filter_map(|col| self.get_button_at(row, col))
                    .map(|b| {
                        if b.pressed {
                            format!("[>{}<]", b.label)
                        } else {
                            format!("[ {} ]", b.label)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
