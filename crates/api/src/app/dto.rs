use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use standpos_core::{DomainError, DomainResult};
use standpos_ledger::{
    ExpenseInput, ExpenseRecord, FinancialSummary, MenuItem, OrderInput, OrderRecord, PaymentStatus,
    format_amount,
};

// -------------------------
// Request DTOs
// -------------------------

/// Order form. `menu` is a predefined menu name or free custom text.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub payer: String,
    pub menu: String,
    pub quantity: i64,
    pub price: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub item: String,
    pub cost: i64,
}

/// One grid row. Rows inserted in the grid may omit `recorded_at`.
#[derive(Debug, Deserialize)]
pub struct OrderRow {
    pub recorded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payer: String,
    pub menu: String,
    pub quantity: i64,
    pub price: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ExpenseRow {
    pub recorded_at: Option<DateTime<Utc>>,
    pub item: String,
    pub cost: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceOrdersRequest {
    pub rows: Vec<OrderRow>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceExpensesRequest {
    pub rows: Vec<ExpenseRow>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

// -------------------------
// Request -> domain mapping
// -------------------------

fn quantity(raw: i64) -> DomainResult<u32> {
    if raw < 1 {
        return Err(DomainError::validation("quantity must be at least 1"));
    }
    u32::try_from(raw).map_err(|_| DomainError::validation(format!("quantity out of range: {raw}")))
}

pub fn to_order_input(body: CreateOrderRequest) -> DomainResult<OrderInput> {
    Ok(OrderInput {
        payer: body.payer,
        menu: MenuItem::parse(&body.menu)?,
        quantity: quantity(body.quantity)?,
        price: body.price,
        status: body.status.parse::<PaymentStatus>()?,
    })
}

pub fn to_expense_input(body: CreateExpenseRequest) -> ExpenseInput {
    ExpenseInput {
        item: body.item,
        cost: body.cost,
    }
}

/// Map grid rows to records; the first unparsable row fails the whole batch.
pub fn to_order_rows(rows: Vec<OrderRow>, now: DateTime<Utc>) -> DomainResult<Vec<OrderRecord>> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            order_row_to_record(row, now).map_err(|e| match e {
                DomainError::Validation(msg) => DomainError::validation(format!("row {}: {msg}", idx + 1)),
                other => other,
            })
        })
        .collect()
}

fn order_row_to_record(row: OrderRow, now: DateTime<Utc>) -> DomainResult<OrderRecord> {
    Ok(OrderRecord {
        recorded_at: row.recorded_at.unwrap_or(now),
        payer: row.payer,
        menu: MenuItem::parse(&row.menu)?,
        quantity: quantity(row.quantity)?,
        price: row.price,
        status: row.status.parse::<PaymentStatus>()?,
    })
}

pub fn to_expense_rows(rows: Vec<ExpenseRow>, now: DateTime<Utc>) -> Vec<ExpenseRecord> {
    rows.into_iter()
        .map(|row| ExpenseRecord {
            recorded_at: row.recorded_at.unwrap_or(now),
            item: row.item,
            cost: row.cost,
        })
        .collect()
}

// -------------------------
// Response mapping
// -------------------------

pub fn order_to_json(o: &OrderRecord) -> Value {
    json!({
        "recorded_at": o.recorded_at.to_rfc3339(),
        "payer": o.payer,
        "menu": o.menu.to_string(),
        "custom_menu": matches!(o.menu, MenuItem::Custom(_)),
        "quantity": o.quantity,
        "price": o.price,
        "status": o.status.as_str(),
    })
}

pub fn expense_to_json(e: &ExpenseRecord) -> Value {
    json!({
        "recorded_at": e.recorded_at.to_rfc3339(),
        "item": e.item,
        "cost": e.cost,
    })
}

pub fn summary_to_json(s: &FinancialSummary) -> Value {
    json!({
        "revenue": s.revenue,
        "cash_in": s.cash_in,
        "receivables": s.receivables,
        "cost": s.cost,
        "profit": s.profit,
        "trend": s.trend(),
        "outstanding_receivables": s.has_outstanding_receivables(),
        "formatted": {
            "revenue": format_amount(s.revenue),
            "cash_in": format_amount(s.cash_in),
            "receivables": format_amount(s.receivables),
            "cost": format_amount(s.cost),
            "profit": format_amount(s.profit),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use standpos_ledger::PredefinedItem;

    #[test]
    fn order_request_maps_menu_and_status() {
        let input = to_order_input(CreateOrderRequest {
            payer: "Budi".to_string(),
            menu: "Mango Juice".to_string(),
            quantity: 2,
            price: 30_000,
            status: "unpaid".to_string(),
        })
        .unwrap();
        assert_eq!(input.menu, MenuItem::Predefined(PredefinedItem::MangoJuice));
        assert_eq!(input.status, PaymentStatus::Unpaid);
    }

    #[test]
    fn negative_quantity_is_a_validation_error() {
        let err = to_order_input(CreateOrderRequest {
            payer: String::new(),
            menu: "Mango Juice".to_string(),
            quantity: -1,
            price: 0,
            status: "Paid".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn oversized_quantity_is_out_of_range() {
        let err = to_order_input(CreateOrderRequest {
            payer: String::new(),
            menu: "Mango Juice".to_string(),
            quantity: i64::from(u32::MAX) + 1,
            price: 0,
            status: "Paid".to_string(),
        })
        .unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.starts_with("quantity out of range") => {}
            other => panic!("expected out-of-range error, got {other:?}"),
        }
    }

    #[test]
    fn bad_row_is_reported_with_its_position() {
        let now = Utc::now();
        let rows = vec![
            OrderRow {
                recorded_at: None,
                payer: String::new(),
                menu: "Avocado Juice".to_string(),
                quantity: 1,
                price: 10_000,
                status: "Paid".to_string(),
            },
            OrderRow {
                recorded_at: None,
                payer: String::new(),
                menu: "Avocado Juice".to_string(),
                quantity: 1,
                price: 10_000,
                status: "maybe".to_string(),
            },
        ];
        match to_order_rows(rows, now).unwrap_err() {
            DomainError::Validation(msg) if msg.starts_with("row 2:") => {}
            other => panic!("expected row 2 error, got {other:?}"),
        }
    }

    #[test]
    fn inserted_rows_get_the_current_time() {
        let now = Utc::now();
        let rows = to_expense_rows(
            vec![ExpenseRow {
                recorded_at: None,
                item: "Ice".to_string(),
                cost: 5_000,
            }],
            now,
        );
        assert_eq!(rows[0].recorded_at, now);
    }
}
