//! Filtering, sorting and grouping helpers for list-backed pages

use afrifiscal_core::utils::contains_ignore_case;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::str::FromStr;

/// Keyword that disables a category filter
pub const ALL: &str = "ALL";

/// Category filter with an explicit "everything" option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter<C> {
    /// Match every record
    #[default]
    All,
    /// Match records whose category equals the value
    Only(C),
}

impl<C: PartialEq> Filter<C> {
    /// Whether `category` passes the filter
    pub fn matches(&self, category: &C) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// Whether any of `categories` passes the filter
    pub fn matches_any<'a, I>(&self, categories: I) -> bool
    where
        I: IntoIterator<Item = &'a C>,
        C: 'a,
    {
        match self {
            Self::All => true,
            Self::Only(_) => categories.into_iter().any(|c| self.matches(c)),
        }
    }
}

impl<C: FromStr> Filter<C> {
    /// Parse a query value; `ALL`, an empty value, or a missing value
    /// disable the filter, and anything unparsable falls back to `All`
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(v) if v.eq_ignore_ascii_case(ALL) => Self::All,
            Some(v) => v.parse().map_or(Self::All, Self::Only),
        }
    }
}

impl<C: ToString> Filter<C> {
    /// Query value for the filter, `ALL` when disabled
    pub fn query_value(&self) -> String {
        match self {
            Self::All => ALL.to_string(),
            Self::Only(c) => c.to_string(),
        }
    }
}

/// Keep records whose name contains `search` (case-insensitive) and whose
/// category passes `filter`
pub fn filter_records<'a, T, C, N, G>(
    records: &'a [T],
    search: &str,
    filter: &Filter<C>,
    name: N,
    category: G,
) -> Vec<&'a T>
where
    C: PartialEq,
    N: Fn(&T) -> &str,
    G: Fn(&T) -> &C,
{
    records
        .iter()
        .filter(|record| contains_ignore_case(name(record), search))
        .filter(|record| filter.matches(category(record)))
        .collect()
}

/// Sort direction of a numeric key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// Stable sort by a numeric key
///
/// Ties keep their prior relative order, and `NaN` keys are ordered by
/// `f64::total_cmp`, so the result is always a total order.
pub fn sort_by_key<T, F>(records: &mut [T], direction: Direction, key: F)
where
    F: Fn(&T) -> f64,
{
    records.sort_by(|a, b| {
        let ordering = key(a).total_cmp(&key(b));
        match direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    });
}

/// Whether `records` are ordered according to `direction` on `key`
pub fn is_sorted_by_key<T, F>(records: &[T], direction: Direction, key: F) -> bool
where
    F: Fn(&T) -> f64,
{
    records.windows(2).all(|pair| match pair {
        [a, b] => {
            let ordering = key(a).total_cmp(&key(b));
            match direction {
                Direction::Ascending => ordering != Ordering::Greater,
                Direction::Descending => ordering != Ordering::Less,
            }
        }
        _ => true,
    })
}

/// Distinct values in first-seen order
pub fn distinct<'a, T, F>(records: &'a [T], value: F) -> Vec<&'a str>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut seen: Vec<&str> = Vec::new();
    for record in records {
        let v = value(record);
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}

/// Count records per category, keeping the order of `categories`
///
/// Categories with no records are reported with a zero count.
pub fn count_by<T, C, F>(records: &[T], categories: &[C], category: F) -> IndexMap<C, usize>
where
    C: Hash + Eq + Clone,
    F: Fn(&T) -> C,
{
    let mut counts: IndexMap<C, usize> = categories.iter().map(|c| (c.clone(), 0)).collect();
    for record in records {
        *counts.entry(category(record)).or_insert(0) += 1;
    }
    counts
}

/// Group records by category, keeping the order of `categories`
pub fn group_by<'a, T, C, F>(records: &'a [T], categories: &[C], category: F) -> IndexMap<C, Vec<&'a T>>
where
    C: Hash + Eq + Clone,
    F: Fn(&T) -> C,
{
    let mut groups: IndexMap<C, Vec<&T>> =
        categories.iter().map(|c| (c.clone(), Vec::new())).collect();
    for record in records {
        groups.entry(category(record)).or_default().push(record);
    }
    groups
}
