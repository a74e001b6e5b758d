//! Stand ledger: orders, expenses, derived figures and CSV backup.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod expense;
pub mod export;
pub mod order;
pub mod store;
pub mod summary;

pub use expense::{ExpenseInput, ExpenseRecord};
pub use export::{export_expenses, export_orders, export_table, parse_expenses, parse_orders};
pub use order::{
    MAX_AMOUNT, MAX_FORM_PRICE, MAX_FORM_QUANTITY, MenuItem, OrderInput, OrderRecord, PaymentStatus, PredefinedItem,
};
pub use store::{Ledger, LedgerSnapshot, Table};
pub use summary::{FinancialSummary, ProfitTrend, format_amount};
