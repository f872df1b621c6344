use super::queue::Transaction;
use chrono::{Local, NaiveDate, TimeZone};
use std::collections::BTreeMap;
use vault_utils::time::{format_day_label, local_day_in};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub day: NaiveDate,
    /// e.g. "Monday, 4 Mar 2024"
    pub label: String,
    pub transactions: Vec<Transaction>,
}

/// Buckets by local calendar day, oldest day first.
pub fn group_by_day(transactions: &[Transaction]) -> Vec<DayGroup> {
    group_by_day_in(transactions, &Local)
}

pub fn group_by_day_in<Tz: TimeZone>(transactions: &[Transaction], tz: &Tz) -> Vec<DayGroup> {
    let mut days: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for tx in transactions {
        days.entry(local_day_in(&tx.created_at, tz))
            .or_default()
            .push(tx.clone());
    }

    days.into_iter()
        .map(|(day, mut transactions)| {
            transactions.sort_by_key(|t| t.created_at);
            DayGroup {
                day,
                label: format_day_label(day),
                transactions,
            }
        })
        .collect()
}
