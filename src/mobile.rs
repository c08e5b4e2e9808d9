// File: ./src/mobile.rs
use crate::config::Config;
use crate::logging;
use crate::model::{Draft, NewsEntry, format_medium_date};
use crate::paths::AppPaths;
use crate::store::EntryStore;
use chrono::NaiveDate;
use log::{info, warn};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MobileError {
    Generic(String),
}
impl std::fmt::Display for MobileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MobileError::Generic(s) => s,
            }
        )
    }
}
impl std::error::Error for MobileError {}

// --- DTOs ---

#[derive(uniffi::Record, Debug, Clone, PartialEq)]
pub struct MobileEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_iso: String,
    pub date_display: String,
}

#[derive(uniffi::Record, Debug, Clone, PartialEq)]
pub struct MobileDraft {
    pub title: String,
    pub description: String,
    pub date_iso: String,
}

fn entry_to_mobile(e: &NewsEntry) -> MobileEntry {
    MobileEntry {
        id: e.id.to_string(),
        title: e.title.clone(),
        description: e.description.clone(),
        date_iso: e.date.format(ISO_DATE_FORMAT).to_string(),
        date_display: format_medium_date(e.date),
    }
}

fn draft_to_mobile(d: &Draft) -> MobileDraft {
    MobileDraft {
        title: d.title.clone(),
        description: d.description.clone(),
        date_iso: d.date.format(ISO_DATE_FORMAT).to_string(),
    }
}

fn draft_from_mobile(d: MobileDraft) -> Result<Draft, MobileError> {
    let date = NaiveDate::parse_from_str(d.date_iso.trim(), ISO_DATE_FORMAT)
        .map_err(|e| MobileError::Generic(format!("Invalid date '{}': {}", d.date_iso, e)))?;
    Ok(Draft {
        title: d.title,
        description: d.description,
        date,
    })
}

#[cfg(target_os = "android")]
fn start_logging(level: &str) {
    logging::init_android_logging(level);
}

#[cfg(not(target_os = "android"))]
fn start_logging(level: &str) {
    if let Err(e) = AppPaths::get_log_dir().and_then(|dir| logging::init_logging(level, &dir)) {
        eprintln!("Logging disabled: {:#}", e);
    }
}

fn offsets(raw: Vec<u32>) -> BTreeSet<usize> {
    raw.into_iter().map(|i| i as usize).collect()
}

/// Implemented by the host UI to re-render whenever the list changes.
#[uniffi::export(with_foreign)]
pub trait EntriesObserver: Send + Sync {
    fn entries_changed(&self, entries: Vec<MobileEntry>);
}

// --- MAIN OBJECT ---

#[derive(uniffi::Object)]
pub struct NewsMobile {
    store: Mutex<EntryStore>,
    observer: Mutex<Option<Arc<dyn EntriesObserver>>>,
    config: Config,
}

impl NewsMobile {
    fn store(&self) -> MutexGuard<'_, EntryStore> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self, entries: Vec<MobileEntry>) {
        let observer = self
            .observer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if let Some(obs) = observer {
            obs.entries_changed(entries);
        }
    }

    fn snapshot(store: &EntryStore) -> Vec<MobileEntry> {
        store.entries().iter().map(entry_to_mobile).collect()
    }
}

#[uniffi::export]
impl NewsMobile {
    #[uniffi::constructor]
    pub fn new(files_dir: String) -> Self {
        AppPaths::init_mobile_path(files_dir);
        let config = Config::load().unwrap_or_else(|e| {
            warn!("event=config_load_failed error={:#}", e);
            Config::default()
        });

        start_logging(&config.log_level);
        info!("event=mobile_init");
        Self {
            store: Mutex::new(EntryStore::new()),
            observer: Mutex::new(None),
            config,
        }
    }

    pub fn screen_title(&self) -> String {
        self.config.screen_title.clone()
    }

    pub fn empty_message(&self) -> String {
        self.config.empty_message.clone()
    }

    pub fn default_draft(&self) -> MobileDraft {
        draft_to_mobile(&Draft::default())
    }

    pub fn set_observer(&self, observer: Arc<dyn EntriesObserver>) {
        *self.observer.lock().unwrap_or_else(|e| e.into_inner()) = Some(observer);
    }

    pub fn clear_observer(&self) {
        *self.observer.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn entries(&self) -> Vec<MobileEntry> {
        Self::snapshot(&self.store())
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    /// Saves the draft and returns the blank draft the form should show next.
    pub fn submit(&self, draft: MobileDraft) -> Result<MobileDraft, MobileError> {
        let draft = draft_from_mobile(draft)?;
        let (next, entries) = {
            let mut store = self.store();
            let next = store.submit(draft);
            (next, Self::snapshot(&store))
        };
        self.notify(entries);
        Ok(draft_to_mobile(&next))
    }

    pub fn delete(&self, offsets_to_remove: Vec<u32>) -> u32 {
        let (removed, entries) = {
            let mut store = self.store();
            let removed = store.delete(&offsets(offsets_to_remove));
            (removed.len(), Self::snapshot(&store))
        };
        self.notify(entries);
        removed as u32
    }

    pub fn move_entries(&self, from: Vec<u32>, to: u32) {
        let entries = {
            let mut store = self.store();
            store.move_entries(&offsets(from), to as usize);
            Self::snapshot(&store)
        };
        self.notify(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl EntriesObserver for Recorder {
        fn entries_changed(&self, entries: Vec<MobileEntry>) {
            let titles = entries.into_iter().map(|e| e.title).collect();
            self.calls.lock().unwrap().push(titles);
        }
    }

    fn mobile() -> NewsMobile {
        let dir = std::env::temp_dir().join("dailynews-mobile-tests");
        NewsMobile::new(dir.to_string_lossy().to_string())
    }

    fn draft(title: &str, description: &str, date_iso: &str) -> MobileDraft {
        MobileDraft {
            title: title.to_string(),
            description: description.to_string(),
            date_iso: date_iso.to_string(),
        }
    }

    #[test]
    fn test_submit_returns_blank_draft() {
        let m = mobile();
        assert!(m.is_empty());
        let next = m.submit(draft("Launch", "v1 ships", "2024-01-05")).unwrap();
        assert!(next.title.is_empty());
        assert!(next.description.is_empty());
        assert_eq!(next, m.default_draft());

        let entries = m.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Launch");
        assert_eq!(entries[0].date_iso, "2024-01-05");
        assert_eq!(entries[0].date_display, "Jan 5, 2024");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let m = mobile();
        let err = m.submit(draft("x", "", "05/01/2024")).unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        assert!(m.is_empty());
    }

    #[test]
    fn test_observer_sees_every_mutation() {
        let m = mobile();
        let recorder = Arc::new(Recorder {
            calls: Mutex::new(Vec::new()),
        });
        m.set_observer(recorder.clone());

        m.submit(draft("Launch", "v1 ships", "2024-01-05")).unwrap();
        m.submit(draft("Recap", "", "2024-01-06")).unwrap();
        m.move_entries(vec![1], 0);
        assert_eq!(m.delete(vec![1, 7]), 1);

        let calls = recorder.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                vec!["Launch".to_string()],
                vec!["Launch".to_string(), "Recap".to_string()],
                vec!["Recap".to_string(), "Launch".to_string()],
                vec!["Recap".to_string()],
            ]
        );

        m.clear_observer();
        m.move_entries(vec![0], 0);
        assert_eq!(recorder.calls.lock().unwrap().len(), 4);
    }

    #[test]
    fn test_ids_cross_the_boundary_unchanged() {
        let m = mobile();
        m.submit(draft("a", "", "2024-01-01")).unwrap();
        m.submit(draft("b", "", "2024-01-01")).unwrap();
        let before = m.entries();
        m.move_entries(vec![0], 2);
        let after = m.entries();
        assert_eq!(before[0].id, after[1].id);
        assert_eq!(before[1].id, after[0].id);
        assert_ne!(after[0].id, after[1].id);
    }
}
