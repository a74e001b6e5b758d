//! Financial figures derived from a ledger snapshot.
//!
//! Pure functions, recomputed on every read. Empty tables sum to zero.
//! Row invariants cap each amount at `MAX_AMOUNT`; sums saturate so the
//! figures stay total even for unvalidated rows.

use serde::{Deserialize, Serialize};

use crate::expense::ExpenseRecord;
use crate::order::OrderRecord;
use crate::store::LedgerSnapshot;

fn total(amounts: impl Iterator<Item = i64>) -> i64 {
    amounts.fold(0i64, i64::saturating_add)
}

/// Sum of price over all orders.
pub fn revenue(orders: &[OrderRecord]) -> i64 {
    total(orders.iter().map(|o| o.price))
}

/// Sum of price over paid orders.
pub fn cash_in(orders: &[OrderRecord]) -> i64 {
    total(orders.iter().filter(|o| o.status.is_paid()).map(|o| o.price))
}

/// Sum of cost over all expenses.
pub fn cost(expenses: &[ExpenseRecord]) -> i64 {
    total(expenses.iter().map(|e| e.cost))
}

/// Revenue not yet collected (unpaid orders).
pub fn receivables(orders: &[OrderRecord]) -> i64 {
    total(orders.iter().filter(|o| !o.status.is_paid()).map(|o| o.price))
}

/// Cash collected minus money spent. Unpaid orders do not count.
pub fn profit(orders: &[OrderRecord], expenses: &[ExpenseRecord]) -> i64 {
    cash_in(orders).saturating_sub(cost(expenses))
}

/// Direction label shown next to the profit figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitTrend {
    Profit,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialSummary {
    pub revenue: i64,
    pub cash_in: i64,
    pub receivables: i64,
    pub cost: i64,
    pub profit: i64,
}

impl FinancialSummary {
    pub fn from_snapshot(snapshot: &LedgerSnapshot) -> Self {
        Self::compute(&snapshot.orders, &snapshot.expenses)
    }

    pub fn compute(orders: &[OrderRecord], expenses: &[ExpenseRecord]) -> Self {
        Self {
            revenue: revenue(orders),
            cash_in: cash_in(orders),
            receivables: receivables(orders),
            cost: cost(expenses),
            profit: profit(orders, expenses),
        }
    }

    /// Break-even counts as a loss.
    pub fn trend(&self) -> ProfitTrend {
        if self.profit > 0 {
            ProfitTrend::Profit
        } else {
            ProfitTrend::Loss
        }
    }

    pub fn has_outstanding_receivables(&self) -> bool {
        self.receivables > 0
    }
}

/// Render whole currency units as `Rp 15,000`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
