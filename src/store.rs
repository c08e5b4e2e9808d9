use crate::model::{Draft, NewsEntry, today};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeSet;
use std::ops::Range;

/// Ordered, in-memory collection of entries owned by the screen.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<NewsEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NewsEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&NewsEntry> {
        self.entries.get(index)
    }

    /// Appends the draft as a new entry and returns a blank draft dated today.
    pub fn submit(&mut self, draft: Draft) -> Draft {
        self.submit_on(draft, today())
    }

    pub fn submit_on(&mut self, draft: Draft, today: NaiveDate) -> Draft {
        let entry = draft.into_entry();
        debug!(
            "event=entry_submit id={} position={}",
            entry.id,
            self.entries.len()
        );
        self.entries.push(entry);
        Draft::new(today)
    }

    /// Removes the entries at `offsets`, returning them in their former order.
    /// Offsets past the end are ignored.
    pub fn delete(&mut self, offsets: &BTreeSet<usize>) -> Vec<NewsEntry> {
        if offsets.is_empty() {
            return Vec::new();
        }
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .enumerate()
            .partition(|(i, _)| offsets.contains(i));
        self.entries = kept.into_iter().map(|(_, e)| e).collect();

        let removed: Vec<NewsEntry> = removed.into_iter().map(|(_, e)| e).collect();
        debug!(
            "event=entry_delete removed={} remaining={}",
            removed.len(),
            self.entries.len()
        );
        removed
    }

    /// Moves the entries at `from` so they sit contiguously before the entry
    /// that was at `to`, keeping their relative order.
    ///
    /// `to` is measured against the sequence before the move; anything past
    /// the end appends. Returns the positions the moved block now occupies.
    pub fn move_entries(&mut self, from: &BTreeSet<usize>, to: usize) -> Range<usize> {
        let len = self.entries.len();
        let to = to.min(len);

        let (moving, mut rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .enumerate()
            .partition(|(i, _)| from.contains(i));

        let before = from.range(..to).count();
        let insert_at = (to - before).min(rest.len());
        let moved = moving.len();
        rest.splice(insert_at..insert_at, moving);
        self.entries = rest.into_iter().map(|(_, e)| e).collect();

        debug!(
            "event=entry_move count={} destination={} landed_at={}",
            moved, to, insert_at
        );
        insert_at..insert_at + moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(title: &str, description: &str, date: NaiveDate) -> Draft {
        Draft {
            title: title.to_string(),
            description: description.to_string(),
            date,
        }
    }

    fn store_of(titles: &[&str]) -> EntryStore {
        let mut store = EntryStore::new();
        for t in titles {
            store.submit(draft(t, "", ymd(2024, 1, 1)));
        }
        store
    }

    fn titles(store: &EntryStore) -> Vec<&str> {
        store.entries().iter().map(|e| e.title.as_str()).collect()
    }

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_submit_appends_in_call_order_with_unique_ids() {
        let mut store = EntryStore::new();
        for i in 0..20 {
            let d = draft(&format!("t{}", i), &format!("d{}", i), ymd(2024, 1, 1));
            store.submit(d);
        }
        assert_eq!(store.len(), 20);
        for (i, e) in store.entries().iter().enumerate() {
            assert_eq!(e.title, format!("t{}", i));
            assert_eq!(e.description, format!("d{}", i));
        }
        let ids: HashSet<_> = store.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_submit_resets_draft() {
        let mut store = EntryStore::new();
        let reset_day = ymd(2030, 6, 1);
        let next = store.submit_on(draft("Launch", "v1 ships", ymd(2024, 1, 5)), reset_day);
        assert_eq!(next, Draft::new(reset_day));

        // Blank drafts are accepted as-is
        let next = store.submit_on(next, reset_day);
        assert_eq!(next, Draft::new(reset_day));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).map(|e| e.title.as_str()), Some(""));
    }

    #[test]
    fn test_delete_single_keeps_relative_order() {
        let mut store = store_of(&["a", "b", "c", "d"]);
        let removed = store.delete(&set(&[1]));
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].title, "b");
        assert_eq!(titles(&store), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_delete_many_and_out_of_range() {
        let mut store = store_of(&["a", "b", "c", "d", "e"]);
        let removed = store.delete(&set(&[0, 2, 4, 9]));
        assert_eq!(removed.len(), 3);
        assert_eq!(titles(&store), vec!["b", "d"]);

        let removed = store.delete(&set(&[7]));
        assert!(removed.is_empty());
        assert_eq!(titles(&store), vec!["b", "d"]);
    }

    #[test]
    fn test_move_down_and_up() {
        let mut store = store_of(&["a", "b", "c"]);
        let landed = store.move_entries(&set(&[0]), 2);
        assert_eq!(titles(&store), vec!["b", "a", "c"]);
        assert_eq!(landed, 1..2);

        let landed = store.move_entries(&set(&[2]), 0);
        assert_eq!(titles(&store), vec!["c", "b", "a"]);
        assert_eq!(landed, 0..1);
    }

    #[test]
    fn test_move_to_own_or_adjacent_position_is_noop() {
        let mut store = store_of(&["a", "b", "c"]);
        store.move_entries(&set(&[1]), 1);
        assert_eq!(titles(&store), vec!["a", "b", "c"]);
        store.move_entries(&set(&[1]), 2);
        assert_eq!(titles(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_move_past_end_clamps() {
        let mut store = store_of(&["a", "b", "c"]);
        let landed = store.move_entries(&set(&[0]), 99);
        assert_eq!(titles(&store), vec!["b", "c", "a"]);
        assert_eq!(landed, 2..3);
    }

    #[test]
    fn test_move_block_keeps_relative_order() {
        let mut store = store_of(&["a", "b", "c", "d", "e"]);
        let landed = store.move_entries(&set(&[0, 3]), 5);
        assert_eq!(titles(&store), vec!["b", "c", "e", "a", "d"]);
        assert_eq!(landed, 3..5);

        let landed = store.move_entries(&set(&[1, 4]), 0);
        assert_eq!(titles(&store), vec!["c", "d", "b", "e", "a"]);
        assert_eq!(landed, 0..2);
    }

    #[test]
    fn test_move_preserves_count_and_set() {
        for from in 0..4 {
            for to in 0..=5 {
                let mut store = store_of(&["a", "b", "c", "d"]);
                let before: HashSet<_> = store.entries().iter().map(|e| e.id).collect();
                store.move_entries(&set(&[from]), to);
                let after: HashSet<_> = store.entries().iter().map(|e| e.id).collect();
                assert_eq!(store.len(), 4);
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn test_launch_recap_scenario() {
        let mut store = EntryStore::new();
        let d = store.submit(draft("Launch", "v1 ships", ymd(2024, 1, 5)));
        assert!(d.title.is_empty());
        assert_eq!(store.len(), 1);
        let first = &store.entries()[0];
        assert_eq!(first.title, "Launch");
        assert_eq!(first.description, "v1 ships");
        assert_eq!(first.date, ymd(2024, 1, 5));

        store.submit(draft("Recap", "", ymd(2024, 1, 6)));
        assert_eq!(titles(&store), vec!["Launch", "Recap"]);

        store.delete(&set(&[0]));
        assert_eq!(titles(&store), vec!["Recap"]);

        let snapshot = store.entries().to_vec();
        store.move_entries(&set(&[0]), 0);
        assert_eq!(store.entries(), snapshot.as_slice());
    }
}
