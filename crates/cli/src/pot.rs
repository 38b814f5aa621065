//! Brewing state for a single pot.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;

/// Milk additions (HTCPCP Accept-Additions, milk-type).
pub const MILK_TYPES: &[&str] = &[
    "Cream",
    "Half-and-half",
    "Whole-milk",
    "Part-Skim",
    "Skim",
    "Non-Dairy",
];

/// Syrup additions.
pub const SYRUP_TYPES: &[&str] = &["Vanilla", "Almond", "Raspberry", "Chocolate"];

/// Alcohol additions.
pub const ALCOHOL_TYPES: &[&str] = &["Whisky", "Rum", "Kahlua", "Aquavit"];

/// Sweetener additions.
pub const SUGAR_TYPES: &[&str] = &["Sugar", "Xylitol", "Stevia"];

/// Whether `name` belongs to any addition family.
pub fn is_known_addition(name: &str) -> bool {
    MILK_TYPES.contains(&name)
        || SYRUP_TYPES.contains(&name)
        || ALCOHOL_TYPES.contains(&name)
        || SUGAR_TYPES.contains(&name)
}

#[derive(Debug, Error)]
pub enum PotError {
    #[error("cannot stop brewing: not currently brewing")]
    NotBrewing,
}

struct Brew {
    since: Instant,
    #[allow(dead_code, reason = "recorded for future brew reporting")]
    additions: Vec<String>,
}

/// A beverage pot: supports a fixed set of brew types and tracks whether
/// a brew is in progress. Thread-safe so concurrent connections can hit
/// the same pot.
pub struct Pot {
    types: Vec<String>,
    available_additions: Vec<String>,
    brew: Mutex<Option<Brew>>,
}

impl Pot {
    pub fn new(types: &[&str], available_additions: &[&str]) -> Self {
        Pot {
            types: types.iter().map(|t| t.to_string()).collect(),
            available_additions: available_additions.iter().map(|a| a.to_string()).collect(),
            brew: Mutex::new(None),
        }
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn supports(&self, brew_type: &str) -> bool {
        self.types.iter().any(|t| t == brew_type)
    }

    pub fn available_additions(&self) -> &[String] {
        &self.available_additions
    }

    /// Begin a brew, recording the start time and requested additions.
    /// Starting while already brewing restarts the clock.
    pub fn start(&self, additions: Vec<String>) {
        *self.brew.lock() = Some(Brew {
            since: Instant::now(),
            additions,
        });
    }

    /// Stop the current brew and return how long it ran. Fails when no
    /// brew is in progress.
    pub fn stop(&self) -> Result<Duration, PotError> {
        self.brew
            .lock()
            .take()
            .map(|brew| brew.since.elapsed())
            .ok_or(PotError::NotBrewing)
    }

    pub fn brewing(&self) -> bool {
        self.brew.lock().is_some()
    }
}
