/**
 * Participant Colors
 *
 * Every connected participant is assigned a color from a fixed palette so
 * their cursor is recognizable in other participants' views. Assignment
 * cycles through the palette; with more participants than palette entries
 * the colors repeat.
 */
use std::collections::HashMap;
use uuid::Uuid;

/// An RGB participant color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// The CSS color string sent to clients
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// The fixed cursor palette, in assignment order
pub const PALETTE: [Color; 8] = [
    Color::new(255, 0, 0),     // red
    Color::new(0, 0, 255),     // blue
    Color::new(0, 255, 0),     // green
    Color::new(128, 0, 128),   // purple
    Color::new(255, 165, 0),   // orange
    Color::new(255, 255, 0),   // yellow
    Color::new(255, 192, 203), // pink
    Color::new(165, 42, 42),   // brown
];

/// Tracks which color each connected participant holds
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    assigned: HashMap<Uuid, Color>,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next palette color to a participant
    pub fn assign(&mut self, client_id: Uuid) -> Color {
        let color = PALETTE[self.assigned.len() % PALETTE.len()];
        self.assigned.insert(client_id, color);
        color
    }

    /// Forget a disconnected participant's assignment
    pub fn release(&mut self, client_id: &Uuid) {
        self.assigned.remove(client_id);
    }

    /// The color currently held by a participant, if connected
    pub fn color_of(&self, client_id: &Uuid) -> Option<Color> {
        self.assigned.get(client_id).copied()
    }

    /// Number of participants currently holding a color
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
