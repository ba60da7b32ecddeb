// 1.0: all the primitives live here. nothing in the ledger works without these types.
// IDs, prices, sides, timestamps. each is a newtype so the compiler catches type mixups.
// prices are integers in currency minor units (cents), volumes are integer lots.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// Bid = resting buy. Ask = resting sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// +1 for bids, -1 for asks. a bid fill adds to position.
    pub fn sign(&self) -> i64 {
        match self {
            Side::Bid => 1,
            Side::Ask => -1,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }

    /// Signed lots for a fill of `volume` on this side.
    pub fn signed(&self, volume: i64) -> i64 {
        self.sign() * volume
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Ask => write!(f, "ASK"),
        }
    }
}

// 1.1: price in minor units. must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(i64);

impl Price {
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        if value > 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn new_unchecked(value: i64) -> Self {
        debug_assert!(value > 0);
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Absolute distance in minor units.
    pub fn distance(&self, other: Price) -> i64 {
        (self.0 - other.0).abs()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// 1.2: how long an inserted order works at the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifespan {
    /// Fill what is possible immediately, cancel the rest.
    FillAndKill,
    /// Rest on the book until filled or cancelled.
    #[default]
    GoodForDay,
}

// 1.3: millisecond timestamp. the engine never reads the wall clock itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    pub fn plus_millis(&self, ms: i64) -> Self {
        Self(self.0 + ms)
    }

    pub fn elapsed_millis(&self, later: &Timestamp) -> i64 {
        later.0 - self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_sign_and_opposite() {
        assert_eq!(Side::Bid.sign(), 1);
        assert_eq!(Side::Ask.sign(), -1);
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.signed(10), -10);
    }

    #[test]
    fn price_must_be_positive() {
        assert!(Price::new(0).is_none());
        assert!(Price::new(-100).is_none());
        assert_eq!(Price::new(10_000).unwrap().value(), 10_000);
    }

    #[test]
    fn price_distance_is_symmetric() {
        let a = Price::new_unchecked(90);
        let b = Price::new_unchecked(110);
        assert_eq!(a.distance(b), 20);
        assert_eq!(b.distance(a), 20);
    }

    #[test]
    fn timestamp_arithmetic() {
        let t = Timestamp::from_millis(1_000);
        assert_eq!(t.plus_millis(500).as_millis(), 1_500);
        assert_eq!(t.elapsed_millis(&Timestamp::from_millis(1_250)), 250);
    }
}
