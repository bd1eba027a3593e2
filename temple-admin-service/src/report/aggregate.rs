use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use temple_admin_db::models::ledger::TransactionModel;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Donation plus RentIncome
    pub total_income: Decimal,
    /// Expense, Utilities and Salary
    pub total_expense: Decimal,
    pub net: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub count: usize,
}

pub fn summarize(transactions: &[TransactionModel]) -> Summary {
    let mut summary = Summary::default();
    for tx in transactions {
        if tx.transaction_type.is_income() {
            summary.total_income += tx.amount;
        } else {
            summary.total_expense += tx.amount;
        }
        summary.count += 1;
    }
    summary.net = summary.total_income - summary.total_expense;
    summary
}

/// Largest amount first; ties by category name.
pub fn by_category(transactions: &[TransactionModel]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
    for tx in transactions {
        let entry = totals.entry(tx.category.as_str()).or_default();
        entry.0 += tx.amount;
        entry.1 += 1;
    }
    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (amount, count))| CategoryTotal {
            category: category.to_string(),
            amount,
            count,
        })
        .collect();
    out.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));
    out
}

/// Oldest month first.
pub fn by_month(transactions: &[TransactionModel]) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<String, MonthlyTotal> = BTreeMap::new();
    for tx in transactions {
        let key = tx.date.format("%Y-%m").to_string();
        let entry = months.entry(key.clone()).or_insert_with(|| MonthlyTotal {
            month: key,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            net: Decimal::ZERO,
            count: 0,
        });
        if tx.transaction_type.is_income() {
            entry.income += tx.amount;
        } else {
            entry.expense += tx.amount;
        }
        entry.count += 1;
    }
    months
        .into_values()
        .map(|mut m| {
            m.net = m.income - m.expense;
            m
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use temple_admin_api::TransactionType;

    fn tx(month: u32, t: TransactionType, category: &str, amount: i64) -> TransactionModel {
        TransactionModel::new(
            NaiveDate::from_ymd_opt(2026, month, 10).unwrap(),
            t,
            category,
            "",
            Decimal::new(amount, 0),
        )
    }

    fn sample() -> Vec<TransactionModel> {
        vec![
            tx(1, TransactionType::Donation, "Annadan", 1000),
            tx(1, TransactionType::RentIncome, "Rent", 6000),
            tx(2, TransactionType::Utilities, "Electricity", 1500),
            tx(2, TransactionType::Salary, "Pujari", 8000),
            tx(2, TransactionType::Donation, "Annadan", 500),
        ]
    }

    #[test]
    fn test_summary_splits_income_and_expense() {
        let summary = summarize(&sample());
        assert_eq!(summary.total_income, Decimal::new(7500, 0));
        assert_eq!(summary.total_expense, Decimal::new(9500, 0));
        assert_eq!(summary.net, Decimal::new(-2000, 0));
        assert_eq!(summary.count, 5);
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn test_categories_sorted_by_amount() {
        let categories: Vec<_> = by_category(&sample())
            .into_iter()
            .map(|c| (c.category, c.amount, c.count))
            .collect();
        assert_eq!(
            categories,
            vec![
                ("Pujari".to_string(), Decimal::new(8000, 0), 1),
                ("Rent".to_string(), Decimal::new(6000, 0), 1),
                ("Annadan".to_string(), Decimal::new(1500, 0), 2),
                ("Electricity".to_string(), Decimal::new(1500, 0), 1),
            ]
        );
    }

    #[test]
    fn test_months_ascending_with_net() {
        let months = by_month(&sample());
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2026-01");
        assert_eq!(months[0].income, Decimal::new(7000, 0));
        assert_eq!(months[1].month, "2026-02");
        assert_eq!(months[1].expense, Decimal::new(9500, 0));
        assert_eq!(months[1].net, Decimal::new(-9000, 0));
    }
}
