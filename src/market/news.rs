//! News keywords, sentiment breakdown and the bubble-cloud layout

use rand::Rng;

/// Tone of a keyword in the news flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsKeyword {
    pub word: &'static str,
    pub count: u32,
    pub sentiment: Sentiment,
}

pub fn news_keywords() -> Vec<NewsKeyword> {
    use Sentiment::*;
    let k = |word, count, sentiment| NewsKeyword {
        word,
        count,
        sentiment,
    };
    vec![
        k("Samsung", 847, Positive),
        k("Interest Rate", 623, Negative),
        k("AI Chips", 512, Positive),
        k("Battery", 489, Positive),
        k("Export", 445, Neutral),
        k("Inflation", 398, Negative),
        k("Hyundai", 356, Positive),
        k("Tech Rally", 312, Positive),
        k("Won Weakness", 287, Negative),
        k("SK Hynix", 276, Positive),
        k("Fed Policy", 234, Neutral),
        k("Trade Surplus", 198, Positive),
    ]
}

/// Keyword counts per sentiment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentBreakdown {
    pub fn of(keywords: &[NewsKeyword]) -> Self {
        keywords.iter().fold(Self::default(), |mut acc, k| {
            match k.sentiment {
                Sentiment::Positive => acc.positive += 1,
                Sentiment::Negative => acc.negative += 1,
                Sentiment::Neutral => acc.neutral += 1,
            }
            acc
        })
    }

    pub fn mood(&self) -> Mood {
        use std::cmp::Ordering;
        match self.positive.cmp(&self.negative) {
            Ordering::Greater => Mood::Bullish,
            Ordering::Less => Mood::Bearish,
            Ordering::Equal => Mood::Neutral,
        }
    }
}

/// Overall market mood from keyword balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Bullish,
    Bearish,
    Neutral,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
            Self::Neutral => "NEUTRAL",
        }
    }
}

/// Largest mention count, used to scale bars and bubbles
pub fn max_count(keywords: &[NewsKeyword]) -> u32 {
    keywords.iter().map(|k| k.count).max().unwrap_or(0)
}

/// Number of size tiers a bubble can fall into
pub const BUBBLE_TIERS: u16 = 3;
/// Placement attempts per bubble before giving up on avoiding overlap
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// A placed keyword bubble, in cell coordinates relative to the cloud area
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    pub word: &'static str,
    pub count: u32,
    pub sentiment: Sentiment,
    /// 0 = smallest
    pub tier: u16,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// Whether a non-overlapping slot was found
    pub placed: bool,
}

impl Bubble {
    fn overlaps(&self, other: &Bubble) -> bool {
        // One cell of breathing room on every side
        let gap = 1;
        self.x < other.x + other.width + gap
            && other.x < self.x + self.width + gap
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Size tier from mention volume relative to the loudest keyword
pub fn bubble_tier(count: u32, max: u32) -> u16 {
    if max == 0 {
        return 0;
    }
    let ratio = count as f64 / max as f64;
    ((ratio * BUBBLE_TIERS as f64).ceil() as u16)
        .saturating_sub(1)
        .min(BUBBLE_TIERS - 1)
}

/// Lay keywords out inside a `width` x `height` cell area.
///
/// Keywords are placed loudest first. Each gets up to
/// `PLACEMENT_ATTEMPTS` random positions; the first one that does not
/// overlap an already placed bubble wins, otherwise a random position is
/// used and the bubble is marked unplaced. Bubbles wider than the area are
/// truncated to fit.
pub fn layout_bubbles<R: Rng + ?Sized>(
    rng: &mut R,
    keywords: &[NewsKeyword],
    width: u16,
    height: u16,
) -> Vec<Bubble> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let max = max_count(keywords);
    let mut sorted: Vec<&NewsKeyword> = keywords.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    let mut result: Vec<Bubble> = Vec::with_capacity(sorted.len());
    for keyword in sorted {
        let tier = bubble_tier(keyword.count, max);
        // "( word )" grows by one cell of padding per tier on each side
        let natural = keyword.word.chars().count() as u16 + 2 + tier * 2;
        let w = natural.min(width);
        let h = if tier + 1 == BUBBLE_TIERS && height >= 3 { 3 } else { 1 };

        let mut candidate = Bubble {
            word: keyword.word,
            count: keyword.count,
            sentiment: keyword.sentiment,
            tier,
            x: 0,
            y: 0,
            width: w,
            height: h,
            placed: false,
        };

        for _ in 0..PLACEMENT_ATTEMPTS {
            candidate.x = rng.gen_range(0..=width - w);
            candidate.y = rng.gen_range(0..=height - h);
            if !result.iter().filter(|b| b.placed).any(|b| b.overlaps(&candidate)) {
                candidate.placed = true;
                break;
            }
        }

        if !candidate.placed {
            candidate.x = rng.gen_range(0..=width - w);
            candidate.y = rng.gen_range(0..=height - h);
        }

        result.push(candidate);
    }

    result
}
