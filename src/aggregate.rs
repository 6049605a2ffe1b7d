//! Grouping and counting over the fetched user list.
//!
//! All functions are pure: the same input in the same order gives the same
//! output. Only [`growth_series`] draws randomness, from the RNG it is handed.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::models::{AggregatedCount, DashboardSummary, GrowthPoint, UserRecord};

pub const GROWTH_MONTHS: u32 = 12;

/// Counts occurrences of each distinct field value, in first-seen order.
///
/// Records whose field is empty are skipped.
pub fn count_by_field<T, F>(records: &[T], field: F) -> Vec<AggregatedCount>
where
    F: Fn(&T) -> &str,
{
    let mut counts: Vec<AggregatedCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let value = field(record);
        if value.is_empty() {
            continue;
        }
        match index.get(value) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(AggregatedCount {
                    label: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Number of distinct non-empty values of a field.
pub fn distinct_count<T, F>(records: &[T], field: F) -> usize
where
    F: Fn(&T) -> &str,
{
    records
        .iter()
        .map(field)
        .filter(|v| !v.is_empty())
        .collect::<HashSet<_>>()
        .len()
}

/// Simulated monthly signups. Not derived from real data.
pub fn growth_series<R: Rng>(rng: &mut R) -> Vec<GrowthPoint> {
    (0..GROWTH_MONTHS)
        .map(|i| GrowthPoint {
            label: format!("Month {}", i + 1),
            users: rng.random_range(0..10u32) + i * 2,
        })
        .collect()
}

/// Percentage of `total` that `count` represents; 0 when `total` is 0.
pub fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Builds every dashboard panel from one user list.
pub fn summarize<R: Rng>(users: Vec<UserRecord>, rng: &mut R) -> DashboardSummary {
    DashboardSummary {
        total_users: users.len(),
        total_cities: distinct_count(&users, |u| u.address.city.as_str()),
        total_streets: distinct_count(&users, |u| u.address.street.as_str()),
        total_emails: distinct_count(&users, |u| u.email.as_str()),
        by_city: count_by_field(&users, |u| u.address.city.as_str()),
        by_company: count_by_field(&users, |u| u.company.name.as_str()),
        growth: growth_series(rng),
        users,
    }
}
