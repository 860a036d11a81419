//! Table filtering, sorting, and summary counts.
//!
//! People tables (patients, radiographers, physicians) are filtered and
//! sorted in the console after a full fetch; the records API has no query
//! support for any of this.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

use crate::api::types::{Patient, Physician, Radiographer};

/// Fields the people tables filter and sort on.
pub trait Person {
    fn firstname(&self) -> &str;
    fn lastname(&self) -> &str;
    fn email(&self) -> &str;
    fn username(&self) -> &str;
    fn gender(&self) -> Option<&str>;
    fn language(&self) -> Option<&str>;
    fn date_of_birth(&self) -> Option<&str>;
    fn account_locked(&self) -> bool;
}

impl Person for Patient {
    fn firstname(&self) -> &str {
        self.firstname.as_deref().unwrap_or_default()
    }
    fn lastname(&self) -> &str {
        self.lastname.as_deref().unwrap_or_default()
    }
    fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
    fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
    fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }
    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
    fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }
    fn account_locked(&self) -> bool {
        self.account_locked.unwrap_or(false)
    }
}

impl Person for Radiographer {
    fn firstname(&self) -> &str {
        self.firstname.as_deref().unwrap_or_default()
    }
    fn lastname(&self) -> &str {
        self.lastname.as_deref().unwrap_or_default()
    }
    fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
    fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
    fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }
    fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
    fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }
    fn account_locked(&self) -> bool {
        self.account_locked.unwrap_or(false)
    }
}

impl Person for Physician {
    fn firstname(&self) -> &str {
        self.firstname.as_deref().unwrap_or_default()
    }
    fn lastname(&self) -> &str {
        self.lastname.as_deref().unwrap_or_default()
    }
    fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
    // Physicians have no username; search falls through to the other fields.
    fn username(&self) -> &str {
        ""
    }
    fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }
    fn language(&self) -> Option<&str> {
        None
    }
    fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }
    fn account_locked(&self) -> bool {
        self.account_locked.unwrap_or(false)
    }
}

// =============================================================================
// QUERY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Email,
    Gender,
    Born,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filter and sort options taken from a list page's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    pub gender: Option<String>,
    pub language: Option<String>,
    pub locked: Option<bool>,
    pub search: Option<String>,
    /// Inclusive lower bound on date of birth, `YYYY-MM-DD`.
    pub born_from: Option<String>,
    /// Inclusive upper bound on date of birth, `YYYY-MM-DD`.
    pub born_to: Option<String>,
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub order: SortOrder,
}

/// Parse the date part of a `YYYY-MM-DD[...]` value.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let day = raw.trim().get(..10)?;
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

impl ListQuery {
    fn keeps<T: Person>(&self, row: &T, search: Option<&str>, from: Option<Date>, to: Option<Date>) -> bool {
        if let Some(gender) = self.gender.as_deref() {
            if row.gender() != Some(gender) {
                return false;
            }
        }
        if let Some(language) = self.language.as_deref() {
            if row.language() != Some(language) {
                return false;
            }
        }
        if let Some(locked) = self.locked {
            if row.account_locked() != locked {
                return false;
            }
        }
        if let Some(needle) = search {
            let hit = [row.firstname(), row.lastname(), row.email(), row.username()]
                .iter()
                .any(|field| field.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }
        if from.is_some() || to.is_some() {
            let Some(born) = row.date_of_birth().and_then(parse_date) else {
                return false;
            };
            if from.is_some_and(|from| born < from) || to.is_some_and(|to| born > to) {
                return false;
            }
        }
        true
    }

    /// Filter then sort `rows`. Unparseable date bounds are ignored.
    #[must_use]
    pub fn apply<T: Person>(&self, rows: Vec<T>) -> Vec<T> {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let from = self.born_from.as_deref().and_then(parse_date);
        let to = self.born_to.as_deref().and_then(parse_date);

        let mut kept: Vec<T> = rows
            .into_iter()
            .filter(|row| self.keeps(row, search.as_deref(), from, to))
            .collect();

        if let Some(key) = self.sort {
            kept.sort_by(|a, b| {
                let ordering = compare(key, a, b);
                match self.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
        kept
    }
}

fn compare<T: Person>(key: SortKey, a: &T, b: &T) -> Ordering {
    match key {
        SortKey::Name => a
            .firstname()
            .to_lowercase()
            .cmp(&b.firstname().to_lowercase())
            .then_with(|| a.lastname().to_lowercase().cmp(&b.lastname().to_lowercase())),
        SortKey::Email => a.email().to_lowercase().cmp(&b.email().to_lowercase()),
        SortKey::Gender => a.gender().cmp(&b.gender()),
        // Rows without a readable date sort first.
        SortKey::Born => a
            .date_of_birth()
            .and_then(parse_date)
            .cmp(&b.date_of_birth().and_then(parse_date)),
        SortKey::Locked => a.account_locked().cmp(&b.account_locked()),
    }
}

// =============================================================================
// STATS
// =============================================================================

/// Summary counts shown above a people table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub locked: usize,
}

impl Stats {
    #[must_use]
    pub fn tally<T: Person>(rows: &[T]) -> Self {
        rows.iter().fold(Self::default(), |mut stats, row| {
            stats.total += 1;
            match row.gender() {
                Some("MALE") => stats.male += 1,
                Some("FEMALE") => stats.female += 1,
                _ => {}
            }
            if row.account_locked() {
                stats.locked += 1;
            }
            stats
        })
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// Filtered rows ready for a table, with their summary counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub stats: Stats,
}

impl<T: Person> ListPage<T> {
    #[must_use]
    pub fn build(rows: Vec<T>, query: &ListQuery) -> Self {
        let rows = query.apply(rows);
        let stats = Stats::tally(&rows);
        Self { rows, stats }
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
