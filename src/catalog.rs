use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::{Equivalence, Set};

/// A cataloged painting.
///
/// Two paintings are the same entry only when every field matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Painting {
    pub school: String,
    pub author: String,
    pub title: String,
    /// Free text, e.g. `1482 circa` or `1504-1506`.
    pub date: String,
    pub room: String,
}

impl Painting {
    pub fn new(
        school: impl Into<String>,
        author: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            school: school.into(),
            author: author.into(),
            title: title.into(),
            date: date.into(),
            room: room.into(),
        }
    }

    /// Century bucket of [`Painting::date`]; see [`century`].
    pub fn century(&self) -> Option<String> {
        century(&self.date)
    }
}

impl Display for Painting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.school, self.author, self.title, self.date, self.room
        )
    }
}

/// Matches paintings whose title contains the query, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSearch {
    query: String,
}

impl TitleSearch {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_lowercase().into(),
        }
    }

    pub fn matches(&self, painting: &Painting) -> bool {
        painting.title.to_lowercase().contains(self.query.as_str())
    }

    /// Paintings in `set` whose title matches.
    pub fn apply<E>(&self, set: &Set<Painting, E>) -> Set<Painting, E>
    where
        E: Equivalence<Painting> + Clone,
    {
        crate::filter(set, |painting| self.matches(painting))
    }
}

/// Buckets a free-text date into the century it starts in, e.g. `1789` and
/// `1789-1790` both give `1700`.
///
/// Leading non-digits are skipped and at most five digits are read. Returns
/// `None` if the text has no digits.
pub fn century(date: &str) -> Option<String> {
    let digits: String = date
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .take(5)
        .collect();
    if digits.is_empty() {
        return None;
    }
    let year: u32 = digits.parse().ok()?;
    Some(format!("{}00", year / 100).into())
}

/// Counts the paintings in `set` per key, e.g. per school or per century.
pub fn tally_by<E, K, F>(set: &Set<Painting, E>, mut key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: FnMut(&Painting) -> K,
{
    let mut counts = BTreeMap::new();
    for painting in set {
        *counts.entry(key(painting)).or_insert(0) += 1;
    }
    counts
}
