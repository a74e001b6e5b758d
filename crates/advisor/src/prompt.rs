//! Prompt rendering: ledger figures + both tables as plain text + the question.

use standpos_ledger::{ExpenseRecord, FinancialSummary, LedgerSnapshot, OrderRecord, format_amount};

const PERSONA: &str = "You are a relaxed, sharp consultant for a small beverage business.";
const INSTRUCTIONS: &str =
    "Answer concisely (at most 5 paragraphs), practically, and in down-to-earth language.";

/// Figures line plus the flattened order and expense histories.
pub fn render_ledger_context(snapshot: &LedgerSnapshot, summary: &FinancialSummary) -> String {
    format!(
        "FINANCIALS: Cost: {}, Cash in: {}, Profit: {}, Receivables: {}.\n\
         ORDER HISTORY:\n{}\n\
         EXPENSE HISTORY:\n{}",
        format_amount(summary.cost),
        format_amount(summary.cash_in),
        format_amount(summary.profit),
        format_amount(summary.receivables),
        render_orders(&snapshot.orders),
        render_expenses(&snapshot.expenses),
    )
}

pub fn build_prompt(snapshot: &LedgerSnapshot, summary: &FinancialSummary, question: &str) -> String {
    format!(
        "{PERSONA}\nAnalyse the following data:\n{}\n\nUser question: {}\n\n{INSTRUCTIONS}\n",
        render_ledger_context(snapshot, summary),
        question.trim(),
    )
}

fn render_orders(orders: &[OrderRecord]) -> String {
    let rows = orders
        .iter()
        .map(|o| {
            vec![
                o.recorded_at.format("%Y-%m-%d %H:%M").to_string(),
                o.payer.clone(),
                o.menu.to_string(),
                o.quantity.to_string(),
                o.price.to_string(),
                o.status.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["recorded_at", "payer", "menu", "qty", "price", "status"], &rows)
}

fn render_expenses(expenses: &[ExpenseRecord]) -> String {
    let rows = expenses
        .iter()
        .map(|e| {
            vec![
                e.recorded_at.format("%Y-%m-%d %H:%M").to_string(),
                e.item.clone(),
                e.cost.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["recorded_at", "item", "cost"], &rows)
}

/// Column-aligned text table with a leading row index.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }

    let index_width = (rows.len() - 1).to_string().len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (h, &w) in headers.iter().zip(&widths) {
        out.push_str(&format!("  {h:<w$}"));
    }
    for (i, row) in rows.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{i:<index_width$}"));
        for (cell, &w) in row.iter().zip(&widths) {
            out.push_str(&format!("  {cell:<w$}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use standpos_ledger::{MenuItem, PaymentStatus, PredefinedItem};

    fn snapshot() -> LedgerSnapshot {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 15, 0).unwrap();
        LedgerSnapshot {
            orders: vec![
                OrderRecord {
                    recorded_at: at,
                    payer: "Budi".to_string(),
                    menu: MenuItem::Predefined(PredefinedItem::MangoJuice),
                    quantity: 1,
                    price: 15_000,
                    status: PaymentStatus::Paid,
                },
                OrderRecord {
                    recorded_at: at,
                    payer: "Sari".to_string(),
                    menu: MenuItem::custom("Soursop Juice"),
                    quantity: 2,
                    price: 20_000,
                    status: PaymentStatus::Unpaid,
                },
            ],
            expenses: vec![ExpenseRecord {
                recorded_at: at,
                item: "1kg mango".to_string(),
                cost: 10_000,
            }],
        }
    }

    #[test]
    fn prompt_carries_figures_tables_and_question() {
        let snap = snapshot();
        let summary = FinancialSummary::from_snapshot(&snap);
        let prompt = build_prompt(&snap, &summary, "  Is my avocado stock enough?  ");

        assert!(prompt.starts_with(PERSONA));
        assert!(prompt.contains("Cost: Rp 10,000"));
        assert!(prompt.contains("Cash in: Rp 15,000"));
        assert!(prompt.contains("Profit: Rp 5,000"));
        assert!(prompt.contains("Receivables: Rp 20,000"));
        assert!(prompt.contains("Soursop Juice"));
        assert!(prompt.contains("1kg mango"));
        assert!(prompt.contains("User question: Is my avocado stock enough?\n"));
        assert!(prompt.contains(INSTRUCTIONS));
    }

    #[test]
    fn empty_tables_render_placeholder() {
        let snap = LedgerSnapshot::default();
        let context = render_ledger_context(&snap, &FinancialSummary::from_snapshot(&snap));
        assert!(context.contains("ORDER HISTORY:\n(no rows)"));
        assert!(context.contains("EXPENSE HISTORY:\n(no rows)"));
    }

    #[test]
    fn table_rows_are_indexed_and_aligned() {
        let table = render_table(
            &["item", "cost"],
            &[
                vec!["Ice".to_string(), "5000".to_string()],
                vec!["Plastic cups".to_string(), "30000".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   item          cost ");
        assert_eq!(lines[1], "0  Ice           5000 ");
        assert_eq!(lines[2], "1  Plastic cups  30000");
    }
}
