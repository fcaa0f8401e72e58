//! Fruit progression table
//!
//! Each level merges into the next. Radii increase strictly by level; the top
//! entry never merges upward (two watermelons pop for double points instead).

use serde::Serialize;

/// One row of the progression table
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Fruit {
    pub name: &'static str,
    pub radius: f32,
    /// Display color (hex, consumed by the rendering collaborator)
    pub color: &'static str,
    pub points: u32,
}

/// The fixed fruit progression, smallest to largest
pub const FRUITS: [Fruit; 10] = [
    Fruit { name: "Cherry", radius: 15.0, color: "#e74c3c", points: 1 },
    Fruit { name: "Strawberry", radius: 20.0, color: "#ff6b81", points: 3 },
    Fruit { name: "Grape", radius: 25.0, color: "#8e44ad", points: 6 },
    Fruit { name: "Orange", radius: 32.0, color: "#f39c12", points: 10 },
    Fruit { name: "Apple", radius: 38.0, color: "#e74c3c", points: 15 },
    Fruit { name: "Pear", radius: 44.0, color: "#a8d948", points: 21 },
    Fruit { name: "Peach", radius: 50.0, color: "#fdcb6e", points: 28 },
    Fruit { name: "Pineapple", radius: 56.0, color: "#f9ca24", points: 36 },
    Fruit { name: "Melon", radius: 63.0, color: "#6ab04c", points: 45 },
    Fruit { name: "Watermelon", radius: 72.0, color: "#27ae60", points: 55 },
];

/// Highest level a random drop may produce (0-indexed); everything above is
/// reachable only by merging
pub const MAX_DROP_LEVEL: usize = 4;

/// Index of the last (terminal) level
pub const fn top_level() -> usize {
    FRUITS.len() - 1
}
