//! Session ledger: the orders and expenses tables.
//!
//! Two mutations only: append one validated row, or replace a whole table
//! after validating every row. A failed mutation leaves the ledger untouched.

use chrono::{DateTime, Utc};

use standpos_core::{DomainError, DomainResult};

use crate::expense::{ExpenseInput, ExpenseRecord};
use crate::order::{OrderInput, OrderRecord};

/// Names one of the two ledger tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Orders,
    Expenses,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Orders => "orders",
            Table::Expenses => "expenses",
        }
    }

    /// Suggested download name for the table's CSV backup.
    pub fn file_name(self) -> &'static str {
        match self {
            Table::Orders => "orders_backup.csv",
            Table::Expenses => "expenses_backup.csv",
        }
    }
}

/// Owned copy of both tables at a point in time, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub orders: Vec<OrderRecord>,
    pub expenses: Vec<ExpenseRecord>,
}

/// In-memory ledger owned by exactly one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    orders: Vec<OrderRecord>,
    expenses: Vec<ExpenseRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            orders: self.orders.clone(),
            expenses: self.expenses.clone(),
        }
    }

    /// Validate a submitted order and append it, stamped with `now`.
    pub fn append_order(&mut self, input: OrderInput, now: DateTime<Utc>) -> DomainResult<OrderRecord> {
        input.validate()?;
        let record = input.into_record(now);
        record.validate()?;
        self.orders.push(record.clone());
        tracing::debug!(rows = self.orders.len(), price = record.price, "order appended");
        Ok(record)
    }

    /// Validate a submitted expense and append it, stamped with `now`.
    pub fn append_expense(
        &mut self,
        input: ExpenseInput,
        now: DateTime<Utc>,
    ) -> DomainResult<ExpenseRecord> {
        let record = input.into_record(now);
        record.validate()?;
        self.expenses.push(record.clone());
        tracing::debug!(rows = self.expenses.len(), cost = record.cost, "expense appended");
        Ok(record)
    }

    /// Replace the whole orders table (bulk grid edit). All-or-nothing.
    pub fn replace_orders(&mut self, rows: Vec<OrderRecord>) -> DomainResult<()> {
        validate_rows(&rows, OrderRecord::validate)?;
        tracing::debug!(before = self.orders.len(), after = rows.len(), "orders replaced");
        self.orders = rows;
        Ok(())
    }

    /// Replace the whole expenses table (bulk grid edit). All-or-nothing.
    pub fn replace_expenses(&mut self, rows: Vec<ExpenseRecord>) -> DomainResult<()> {
        validate_rows(&rows, ExpenseRecord::validate)?;
        tracing::debug!(before = self.expenses.len(), after = rows.len(), "expenses replaced");
        self.expenses = rows;
        Ok(())
    }
}

fn validate_rows<T>(rows: &[T], validate: impl Fn(&T) -> DomainResult<()>) -> DomainResult<()> {
    for (idx, row) in rows.iter().enumerate() {
        validate(row).map_err(|e| match e {
            DomainError::Validation(msg) => DomainError::validation(format!("row {}: {msg}", idx + 1)),
            other => other,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{MenuItem, PaymentStatus, PredefinedItem};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, minute, 0).unwrap()
    }

    fn order_input(price: i64, status: PaymentStatus) -> OrderInput {
        OrderInput {
            payer: "Sari".to_string(),
            menu: MenuItem::Predefined(PredefinedItem::AvocadoJuice),
            quantity: 1,
            price,
            status,
        }
    }

    fn order_row(price: i64) -> OrderRecord {
        order_input(price, PaymentStatus::Unpaid).into_record(at(0))
    }

    #[test]
    fn append_assigns_timestamp_and_preserves_order() {
        let mut ledger = Ledger::new();
        ledger.append_order(order_input(10_000, PaymentStatus::Paid), at(1)).unwrap();
        ledger.append_order(order_input(20_000, PaymentStatus::Unpaid), at(2)).unwrap();

        let prices: Vec<_> = ledger.orders().iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![10_000, 20_000]);
        assert_eq!(ledger.orders()[0].recorded_at, at(1));
        assert_eq!(ledger.orders()[1].recorded_at, at(2));
    }

    #[test]
    fn rejected_append_leaves_ledger_untouched() {
        let mut ledger = Ledger::new();
        ledger.append_order(order_input(10_000, PaymentStatus::Paid), at(1)).unwrap();
        let before = ledger.clone();

        let mut bad = order_input(5_000, PaymentStatus::Paid);
        bad.quantity = 0;
        assert!(ledger.append_order(bad, at(2)).is_err());

        let bad_expense = ExpenseInput {
            item: String::new(),
            cost: 1_000,
        };
        assert!(ledger.append_expense(bad_expense, at(3)).is_err());

        assert_eq!(ledger, before);
    }

    #[test]
    fn replace_with_one_invalid_row_is_all_or_nothing() {
        let mut ledger = Ledger::new();
        ledger.append_order(order_input(10_000, PaymentStatus::Paid), at(1)).unwrap();
        let before = ledger.snapshot();

        let mut broken = order_row(3_000);
        broken.price = -3_000;
        let err = ledger
            .replace_orders(vec![order_row(1_000), broken, order_row(2_000)])
            .unwrap_err();

        match err {
            DomainError::Validation(msg) if msg.starts_with("row 2:") => {}
            other => panic!("expected row 2 validation error, got {other:?}"),
        }
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn replace_expenses_can_delete_all_rows() {
        let mut ledger = Ledger::new();
        ledger
            .append_expense(
                ExpenseInput {
                    item: "Ice".to_string(),
                    cost: 5_000,
                },
                at(1),
            )
            .unwrap();
        ledger.replace_expenses(Vec::new()).unwrap();
        assert!(ledger.expenses().is_empty());
        assert_eq!(ledger.snapshot().expenses, Vec::new());
    }

    #[test]
    fn table_names_and_file_names() {
        assert_eq!(Table::Orders.as_str(), "orders");
        assert_eq!(Table::Expenses.file_name(), "expenses_backup.csv");
    }

    proptest! {
        /// Property: replace followed by snapshot returns exactly the given rows, in order.
        #[test]
        fn replace_then_snapshot_round_trips(prices in prop::collection::vec(0i64..1_000_000i64, 0..20)) {
            let rows: Vec<OrderRecord> = prices.iter().map(|p| order_row(*p)).collect();
            let mut ledger = Ledger::new();
            ledger.append_order(order_input(1, PaymentStatus::Paid), at(5)).unwrap();

            ledger.replace_orders(rows.clone()).unwrap();

            prop_assert_eq!(ledger.snapshot().orders, rows);
        }
    }
}
