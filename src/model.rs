use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Medium-length date style, e.g. "Dec 20, 2023".
pub const MEDIUM_DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsEntry {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

impl NewsEntry {
    pub fn new(title: &str, description: &str, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            date,
        }
    }

    pub fn formatted_date(&self) -> String {
        format_medium_date(self.date)
    }
}

/// The three form fields, held as a value rather than as screen state.
///
/// Submitting consumes a draft and hands back a fresh one, so the form never
/// mutates anything in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
}

impl Default for Draft {
    fn default() -> Self {
        Self::new(today())
    }
}

impl Draft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date,
        }
    }

    pub fn into_entry(self) -> NewsEntry {
        NewsEntry {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            date: self.date,
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_medium_date(date: NaiveDate) -> String {
    date.format(MEDIUM_DATE_FORMAT).to_string()
}
