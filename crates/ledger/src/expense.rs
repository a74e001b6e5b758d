use chrono::{DateTime, Utc};

use standpos_core::{DomainError, DomainResult, ValueObject};

use crate::order::MAX_AMOUNT;

/// One row of the expenses table (stock, cups, ice...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub recorded_at: DateTime<Utc>,
    pub item: String,
    /// Whole currency units.
    pub cost: i64,
}

impl ValueObject for ExpenseRecord {}

impl ExpenseRecord {
    pub fn validate(&self) -> DomainResult<()> {
        if self.item.trim().is_empty() {
            return Err(DomainError::validation("expense item must not be empty"));
        }
        if self.cost < 0 {
            return Err(DomainError::validation("cost must not be negative"));
        }
        if self.cost > MAX_AMOUNT {
            return Err(DomainError::validation(format!("cost must not exceed {MAX_AMOUNT}")));
        }
        Ok(())
    }
}

/// Expense form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    pub item: String,
    pub cost: i64,
}

impl ExpenseInput {
    pub fn into_record(self, recorded_at: DateTime<Utc>) -> ExpenseRecord {
        ExpenseRecord {
            recorded_at,
            item: self.item.trim().to_string(),
            cost: self.cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_item_is_rejected() {
        let record = ExpenseInput {
            item: "  ".to_string(),
            cost: 5_000,
        }
        .into_record(Utc::now());
        match record.validate().unwrap_err() {
            DomainError::Validation(msg) if msg.contains("item") => {}
            other => panic!("expected item validation error, got {other:?}"),
        }
    }

    #[test]
    fn negative_cost_is_rejected() {
        let record = ExpenseInput {
            item: "Plastic cups".to_string(),
            cost: -1,
        }
        .into_record(Utc::now());
        assert!(record.validate().is_err());
    }

    #[test]
    fn cost_above_max_amount_is_rejected() {
        let record = ExpenseInput {
            item: "Blender".to_string(),
            cost: i64::MAX,
        }
        .into_record(Utc::now());
        match record.validate().unwrap_err() {
            DomainError::Validation(msg) if msg.contains("cost") => {}
            other => panic!("expected cost validation error, got {other:?}"),
        }
    }

    #[test]
    fn item_is_trimmed_on_record() {
        let record = ExpenseInput {
            item: " 1kg mango ".to_string(),
            cost: 20_000,
        }
        .into_record(Utc::now());
        assert_eq!(record.item, "1kg mango");
        assert!(record.validate().is_ok());
    }
}
