// src/data.rs
//
// Row types shared by the ledger, the reconciler and the listing parser.
//
// - DrawRecord: one (draw, store listing) observation; the ledger's row.
// - Event: a ledger row resolved (or not) against the store registry.
//          Matched and unmatched events share the shape; unmatched ones
//          carry an empty store_id.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Prize tier of a winning store listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rank {
    First = 1,
    Second = 2,
}

impl TryFrom<u8> for Rank {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Rank::First),
            2 => Ok(Rank::Second),
            other => Err(Error::InvalidRank(other)),
        }
    }
}

impl From<Rank> for u8 {
    fn from(r: Rank) -> u8 {
        r as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Ledger row. Columns: draw, draw_date, rank, name, choice_type, address.
/// `draw_date` is `YYYY-MM-DD`, or empty when the metadata lookup failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub draw: u32,
    pub draw_date: String,
    pub rank: Rank,
    pub name: String,
    pub choice_type: String,
    pub address: String,
}

/// Reconciled row. Columns: store_id, date, rank, draw_no, name, address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub store_id: String,
    pub date: String,
    pub rank: Rank,
    pub draw_no: u32,
    pub name: String,
    pub address: String,
}

impl Event {
    /// `None` → unmatched event (empty store_id).
    pub fn from_record(rec: &DrawRecord, store_id: Option<&str>) -> Self {
        Self {
            store_id: store_id.map(String::from).unwrap_or_default(),
            date: rec.draw_date.clone(),
            rank: rec.rank,
            draw_no: rec.draw,
            name: rec.name.clone(),
            address: rec.address.clone(),
        }
    }

    pub fn is_matched(&self) -> bool {
        !self.store_id.is_empty()
    }
}
