// src/reconcile.rs
//
// Split the ledger into events that resolve to a registry store and those
// that don't. Exact match on the normalized (name, address) key only:
// no fuzzy matching, no geocoding.

use std::path::Path;

use tracing::info;

use crate::data::Event;
use crate::error::Result;
use crate::file;
use crate::index::StoreIndex;
use crate::store::Ledger;

pub const EVENT_HEADERS: [&str; 6] = ["store_id", "date", "rank", "draw_no", "name", "address"];

/// Every ledger row lands in exactly one side, in ledger order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub matched: Vec<Event>,
    pub unmatched: Vec<Event>,
}

impl Reconciliation {
    pub fn len(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrite both event files in full. Each always has a header line.
    pub fn save(&self, wins: &Path, unmatched: &Path) -> Result<()> {
        file::write_csv(wins, &EVENT_HEADERS, &self.matched)?;
        file::write_csv(unmatched, &EVENT_HEADERS, &self.unmatched)?;
        info!(
            matched = self.matched.len(),
            unmatched = self.unmatched.len(),
            wins = %wins.display(),
            "event files written"
        );
        Ok(())
    }
}

pub fn reconcile(ledger: &Ledger, index: &StoreIndex) -> Reconciliation {
    let mut out = Reconciliation::default();
    for rec in ledger.rows() {
        match index.lookup(&rec.name, &rec.address) {
            Some(id) => out.matched.push(Event::from_record(rec, Some(id))),
            None => out.unmatched.push(Event::from_record(rec, None)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DrawRecord, Rank};

    fn rec(draw: u32, rank: Rank, name: &str, address: &str) -> DrawRecord {
        DrawRecord {
            draw,
            draw_date: s!("2025-11-29"),
            rank,
            name: s!(name),
            choice_type: s!("자동"),
            address: s!(address),
        }
    }

    fn index() -> StoreIndex {
        let mut idx = StoreIndex::new();
        idx.insert("행복점", "서울 강남구 1길", s!("S1"));
        idx.insert("로또명당", "부산 해운대구 우동", s!("S2"));
        idx
    }

    #[test]
    fn whitespace_differences_still_match() {
        let ledger = Ledger::from_rows(vec![rec(1200, Rank::First, "행복  점", "서울강남구1길")]);
        let r = reconcile(&ledger, &index());
        assert!(r.unmatched.is_empty());
        assert_eq!(
            r.matched,
            vec![Event {
                store_id: s!("S1"),
                date: s!("2025-11-29"),
                rank: Rank::First,
                draw_no: 1200,
                name: s!("행복  점"),
                address: s!("서울강남구1길"),
            }]
        );
    }

    #[test]
    fn address_mismatch_goes_unmatched() {
        // no admin suffix on the listing side; no fuzzy fallback
        let ledger = Ledger::from_rows(vec![rec(1200, Rank::Second, "로또명당", "부산 해운대 우동")]);
        let r = reconcile(&ledger, &index());
        assert!(r.matched.is_empty());
        assert_eq!(r.unmatched.len(), 1);
        assert_eq!(r.unmatched[0].store_id, "");
        assert_eq!(r.unmatched[0].draw_no, 1200);
    }

    #[test]
    fn partition_is_complete_and_ordered() {
        let ledger = Ledger::from_rows(vec![
            rec(1, Rank::First, "행복점", "서울 강남구 1길"),
            rec(1, Rank::Second, "모름", "어딘가"),
            rec(2, Rank::First, "로또 명당", "부산 해운대구 우동"),
            rec(3, Rank::Second, "행복점", "서울 강남구 1길"),
        ]);
        let r = reconcile(&ledger, &index());
        assert_eq!(r.len(), ledger.len());
        let ids: Vec<&str> = r.matched.iter().map(|e| e.store_id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S1"]);
        assert_eq!(r.unmatched.iter().map(|e| e.draw_no).collect::<Vec<_>>(), vec![1]);
        assert!(r.matched.iter().all(Event::is_matched));
        assert!(!r.unmatched.iter().any(Event::is_matched));
    }

    #[test]
    fn empty_ledger_writes_header_only_files() {
        let dir = tempfile::tempdir().unwrap();
        let wins = dir.path().join("wins.csv");
        let unmatched = dir.path().join("wins_unmatched.csv");
        let r = reconcile(&Ledger::new(), &index());
        assert!(r.is_empty());
        r.save(&wins, &unmatched).unwrap();
        for p in [&wins, &unmatched] {
            assert_eq!(std::fs::read_to_string(p).unwrap(), "store_id,date,rank,draw_no,name,address\n");
        }
    }

    #[test]
    fn saved_rows_follow_event_columns() {
        let dir = tempfile::tempdir().unwrap();
        let wins = dir.path().join("wins.csv");
        let unmatched = dir.path().join("wins_unmatched.csv");
        let ledger = Ledger::from_rows(vec![
            rec(1200, Rank::First, "행복점", "서울 강남구 1길"),
            rec(1200, Rank::Second, "모름", "어딘가"),
        ]);
        reconcile(&ledger, &index()).save(&wins, &unmatched).unwrap();
        let w = std::fs::read_to_string(&wins).unwrap();
        let u = std::fs::read_to_string(&unmatched).unwrap();
        assert!(w.ends_with("S1,2025-11-29,1,1200,행복점,서울 강남구 1길\n"));
        assert!(u.ends_with(",2025-11-29,2,1200,모름,어딘가\n"));
    }
}
