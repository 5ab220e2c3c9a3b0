//! Market-analyst insights and the typewriter reveal

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

/// Delay between revealed characters
pub const TYPE_DELAY: Duration = Duration::from_millis(20);

pub const MARKET_INSIGHTS: [&str; 5] = [
    "Capital is rotating from Tech Stocks to Safe Assets due to rising treasury yields.",
    "Risk-On sentiment detected: Crypto and Growth stocks showing strong inflows.",
    "Korean Won weakness driving foreign capital outflows from KOSPI.",
    "Gold rallying as inflation expectations rise; defensive positioning increasing.",
    "Bitcoin breaking resistance; institutional flows accelerating into digital assets.",
];

/// Pick any insight; repeats are allowed
pub fn random_insight<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MARKET_INSIGHTS
        .choose(rng)
        .copied()
        .unwrap_or(MARKET_INSIGHTS[0])
}

/// Progressive reveal of a message, driven by clock readings
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: &'static str,
    started: Duration,
    revealed: usize,
}

impl Typewriter {
    pub fn start(text: &'static str, now: Duration) -> Self {
        Self {
            text,
            started: now,
            revealed: 0,
        }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Advance the reveal to `now`
    pub fn update(&mut self, now: Duration) {
        let elapsed = now.saturating_sub(self.started);
        let chars = (elapsed.as_millis() / TYPE_DELAY.as_millis()) as usize;
        self.revealed = chars.min(self.text.chars().count());
    }

    pub fn is_typing(&self) -> bool {
        self.revealed < self.text.chars().count()
    }

    /// Characters revealed so far
    pub fn visible(&self) -> &'static str {
        match self.text.char_indices().nth(self.revealed) {
            Some((idx, _)) => &self.text[..idx],
            None => self.text,
        }
    }
}
