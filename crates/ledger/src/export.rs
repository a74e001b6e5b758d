//! CSV backup of a single table.
//!
//! Header row plus one line per record, fields in declared order, timestamps
//! as RFC 3339. Aggregates are never exported. The same rows always produce
//! byte-identical output.

use chrono::{DateTime, Utc};

use standpos_core::{DomainError, DomainResult};

use crate::expense::ExpenseRecord;
use crate::order::{MenuItem, OrderRecord, PaymentStatus};
use crate::store::{LedgerSnapshot, Table};

pub const ORDER_HEADERS: [&str; 6] = ["recorded_at", "payer", "menu", "quantity", "price", "status"];
pub const EXPENSE_HEADERS: [&str; 3] = ["recorded_at", "item", "cost"];

pub fn export_table(snapshot: &LedgerSnapshot, table: Table) -> DomainResult<String> {
    match table {
        Table::Orders => export_orders(&snapshot.orders),
        Table::Expenses => export_expenses(&snapshot.expenses),
    }
}

pub fn export_orders(orders: &[OrderRecord]) -> DomainResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(ORDER_HEADERS).map_err(write_error)?;
    for o in orders {
        wtr.write_record([
            o.recorded_at.to_rfc3339(),
            o.payer.clone(),
            o.menu.to_string(),
            o.quantity.to_string(),
            o.price.to_string(),
            o.status.to_string(),
        ])
        .map_err(write_error)?;
    }
    finish(wtr)
}

pub fn export_expenses(expenses: &[ExpenseRecord]) -> DomainResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(EXPENSE_HEADERS).map_err(write_error)?;
    for e in expenses {
        wtr.write_record([e.recorded_at.to_rfc3339(), e.item.clone(), e.cost.to_string()])
            .map_err(write_error)?;
    }
    finish(wtr)
}

/// Read an orders backup back into records.
pub fn parse_orders(text: &str) -> DomainResult<Vec<OrderRecord>> {
    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    check_headers(&mut rdr, &ORDER_HEADERS)?;

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(read_error)?;
        let field = |i: usize| record.get(i).unwrap_or_default();
        let row = OrderRecord {
            recorded_at: parse_timestamp(field(0))?,
            payer: field(1).to_string(),
            menu: MenuItem::parse(field(2))?,
            quantity: parse_number(field(3), "quantity")?,
            price: parse_number(field(4), "price")?,
            status: field(5).parse::<PaymentStatus>()?,
        };
        row.validate()
            .map_err(|e| DomainError::validation(format!("line {}: {e}", idx + 2)))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Read an expenses backup back into records.
pub fn parse_expenses(text: &str) -> DomainResult<Vec<ExpenseRecord>> {
    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    check_headers(&mut rdr, &EXPENSE_HEADERS)?;

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(read_error)?;
        let field = |i: usize| record.get(i).unwrap_or_default();
        let row = ExpenseRecord {
            recorded_at: parse_timestamp(field(0))?,
            item: field(1).to_string(),
            cost: parse_number(field(2), "cost")?,
        };
        row.validate()
            .map_err(|e| DomainError::validation(format!("line {}: {e}", idx + 2)))?;
        rows.push(row);
    }
    Ok(rows)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> DomainResult<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| DomainError::internal(format!("csv flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| DomainError::internal(format!("csv output not utf-8: {e}")))
}

fn check_headers(rdr: &mut csv::Reader<&[u8]>, expected: &[&str]) -> DomainResult<()> {
    let headers = rdr.headers().map_err(read_error)?;
    if headers.iter().ne(expected.iter().copied()) {
        return Err(DomainError::validation(format!(
            "unexpected header row, expected {}",
            expected.join(",")
        )));
    }
    Ok(())
}

fn parse_timestamp(s: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::validation(format!("invalid timestamp {s:?}: {e}")))
}

fn parse_number<T: core::str::FromStr>(s: &str, field: &str) -> DomainResult<T> {
    s.trim()
        .parse()
        .map_err(|_| DomainError::validation(format!("{field} is not a number: {s:?}")))
}

fn write_error(e: csv::Error) -> DomainError {
    DomainError::internal(format!("csv write failed: {e}"))
}

fn read_error(e: csv::Error) -> DomainError {
    DomainError::validation(format!("malformed csv: {e}"))
}
