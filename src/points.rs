// 🏆 Points Engine - Receipt scoring rules
//
// Seven independent rules, each scored against the whole receipt. The total
// is their plain sum; no rule short-circuits or excludes another.

use crate::money::Amount;
use crate::receipt::{Item, Receipt};
use chrono::{NaiveTime, Timelike};
use serde::Serialize;

// ============================================================================
// RULE CONSTANTS
// ============================================================================

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const QUARTER: Amount = Amount::from_cents(25);
const POINTS_PER_ITEM_PAIR: u64 = 5;
const DESCRIPTION_LENGTH_MULTIPLE: usize = 3;
/// Description bonus is `ceil(price * 1/5)`.
const DESCRIPTION_PRICE_FACTOR: (u64, u64) = (1, 5);
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

/// Afternoon window in minutes past midnight; both bounds exclusive.
const AFTERNOON_WINDOW: (u32, u32) = (14 * 60, 16 * 60);

// ============================================================================
// BREAKDOWN
// ============================================================================

/// Points contributed by each rule for one receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PointsBreakdown {
    pub retailer_name: u64,
    pub round_dollar_total: u64,
    pub quarter_multiple_total: u64,
    pub item_pairs: u64,
    pub item_descriptions: u64,
    pub odd_purchase_day: u64,
    pub afternoon_purchase: u64,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        self.retailer_name
            + self.round_dollar_total
            + self.quarter_multiple_total
            + self.item_pairs
            + self.item_descriptions
            + self.odd_purchase_day
            + self.afternoon_purchase
    }

    /// `(rule name, points)` pairs in rule order, for display.
    pub fn rules(&self) -> [(&'static str, u64); 7] {
        [
            ("retailer name", self.retailer_name),
            ("round dollar total", self.round_dollar_total),
            ("quarter multiple total", self.quarter_multiple_total),
            ("item pairs", self.item_pairs),
            ("item descriptions", self.item_descriptions),
            ("odd purchase day", self.odd_purchase_day),
            ("afternoon purchase", self.afternoon_purchase),
        ]
    }
}

// ============================================================================
// POINTS ENGINE
// ============================================================================

/// Stateless scorer. Same receipt in, same points out.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsEngine;

impl PointsEngine {
    pub fn new() -> Self {
        PointsEngine
    }

    /// Total points for a receipt.
    pub fn compute(&self, receipt: &Receipt) -> u64 {
        self.breakdown(receipt).total()
    }

    /// Points for a receipt, rule by rule.
    pub fn breakdown(&self, receipt: &Receipt) -> PointsBreakdown {
        PointsBreakdown {
            retailer_name: retailer_name_points(receipt.retailer()),
            round_dollar_total: round_dollar_points(receipt.total()),
            quarter_multiple_total: quarter_multiple_points(receipt.total()),
            item_pairs: item_pair_points(receipt.items().len()),
            item_descriptions: receipt.items().iter().map(description_points).sum(),
            odd_purchase_day: odd_day_points(receipt.purchase_day()),
            afternoon_purchase: afternoon_points(receipt.purchase_time()),
        }
    }
}

/// Shorthand for `PointsEngine::new().compute(receipt)`.
pub fn score(receipt: &Receipt) -> u64 {
    PointsEngine::new().compute(receipt)
}

// ============================================================================
// RULES
// ============================================================================

fn retailer_name_points(retailer: &str) -> u64 {
    retailer.chars().filter(|c| c.is_alphanumeric()).count() as u64
}

fn round_dollar_points(total: Amount) -> u64 {
    if total.is_whole_dollar() {
        ROUND_DOLLAR_POINTS
    } else {
        0
    }
}

fn quarter_multiple_points(total: Amount) -> u64 {
    if total.is_multiple_of(QUARTER) {
        QUARTER_MULTIPLE_POINTS
    } else {
        0
    }
}

fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * POINTS_PER_ITEM_PAIR
}

fn description_points(item: &Item) -> u64 {
    let len = item.short_description().trim().chars().count();
    if len > 0 && len % DESCRIPTION_LENGTH_MULTIPLE == 0 {
        let (num, den) = DESCRIPTION_PRICE_FACTOR;
        item.price().scaled_ceil_dollars(num, den)
    } else {
        0
    }
}

fn odd_day_points(day: u32) -> u64 {
    if day % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

fn afternoon_points(time: NaiveTime) -> u64 {
    let (start, end) = AFTERNOON_WINDOW;
    let minutes = time.hour() * 60 + time.minute();
    if minutes > start && minutes < end {
        AFTERNOON_POINTS
    } else {
        0
    }
}

// ============================================================================
// TESTS
// ============================================================================
