use chrono::{DateTime, Utc};

use standpos_core::{DomainError, DomainResult, ValueObject};

/// Largest quantity the order form accepts.
pub const MAX_FORM_QUANTITY: u32 = 100;

/// Largest total price (whole currency units) the order form accepts.
pub const MAX_FORM_PRICE: i64 = 1_000_000;

/// Upper bound on any single price or cost stored in the ledger.
///
/// Keeps every table sum far inside `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Fixed menu of the stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredefinedItem {
    MangoJuice,
    AvocadoJuice,
    DragonFruitJuice,
}

impl PredefinedItem {
    pub const ALL: [PredefinedItem; 3] = [
        PredefinedItem::MangoJuice,
        PredefinedItem::AvocadoJuice,
        PredefinedItem::DragonFruitJuice,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PredefinedItem::MangoJuice => "Mango Juice",
            PredefinedItem::AvocadoJuice => "Avocado Juice",
            PredefinedItem::DragonFruitJuice => "Dragon Fruit Juice",
        }
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|item| item.display_name().eq_ignore_ascii_case(name))
    }
}

/// Menu field of an order: a fixed menu entry or a free-text custom drink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Predefined(PredefinedItem),
    Custom(String),
}

impl ValueObject for MenuItem {}

impl MenuItem {
    /// Custom item from free text; a predefined name maps to its menu entry.
    pub fn custom(text: impl Into<String>) -> Self {
        let text = text.into();
        match PredefinedItem::from_display_name(&text) {
            Some(item) => MenuItem::Predefined(item),
            None => MenuItem::Custom(text),
        }
    }

    /// Parse the text form produced by `Display`.
    ///
    /// Predefined names match case-insensitively; anything else becomes a
    /// custom item.
    pub fn parse(text: &str) -> DomainResult<Self> {
        if let Some(item) = PredefinedItem::from_display_name(text) {
            return Ok(MenuItem::Predefined(item));
        }
        let item = MenuItem::Custom(text.to_string());
        item.validate()?;
        Ok(item)
    }

    pub fn validate(&self) -> DomainResult<()> {
        match self {
            MenuItem::Predefined(_) => Ok(()),
            MenuItem::Custom(text) if text.trim().is_empty() => {
                Err(DomainError::validation("custom menu item must not be empty"))
            }
            MenuItem::Custom(text) if PredefinedItem::from_display_name(text).is_some() => {
                Err(DomainError::validation(format!(
                    "custom menu item {text:?} clashes with a menu entry"
                )))
            }
            MenuItem::Custom(_) => Ok(()),
        }
    }
}

impl core::fmt::Display for MenuItem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MenuItem::Predefined(item) => f.write_str(item.display_name()),
            MenuItem::Custom(text) => f.write_str(text),
        }
    }
}

/// Whether the customer has settled the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
        }
    }

    pub fn is_paid(self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl core::str::FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            other => Err(DomainError::validation(format!(
                "payment status must be Paid or Unpaid, got {other:?}"
            ))),
        }
    }
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the orders table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub recorded_at: DateTime<Utc>,
    /// May be empty (walk-in customer).
    pub payer: String,
    pub menu: MenuItem,
    pub quantity: u32,
    /// Total price in whole currency units.
    pub price: i64,
    pub status: PaymentStatus,
}

impl ValueObject for OrderRecord {}

impl OrderRecord {
    /// Check the row invariants (`quantity >= 1`, `0 <= price <= MAX_AMOUNT`, valid menu).
    pub fn validate(&self) -> DomainResult<()> {
        self.menu.validate()?;
        if self.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        if self.price < 0 {
            return Err(DomainError::validation("price must not be negative"));
        }
        if self.price > MAX_AMOUNT {
            return Err(DomainError::validation(format!("price must not exceed {MAX_AMOUNT}")));
        }
        Ok(())
    }
}

/// Order form submission; the timestamp is assigned on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderInput {
    pub payer: String,
    pub menu: MenuItem,
    pub quantity: u32,
    pub price: i64,
    pub status: PaymentStatus,
}

impl OrderInput {
    /// Row invariants plus the order form's input ranges.
    pub fn validate(&self) -> DomainResult<()> {
        self.menu.validate()?;
        if !(1..=MAX_FORM_QUANTITY).contains(&self.quantity) {
            return Err(DomainError::validation(format!(
                "quantity must be between 1 and {MAX_FORM_QUANTITY}"
            )));
        }
        if !(0..=MAX_FORM_PRICE).contains(&self.price) {
            return Err(DomainError::validation(format!(
                "price must be between 0 and {MAX_FORM_PRICE}"
            )));
        }
        Ok(())
    }

    pub fn into_record(self, recorded_at: DateTime<Utc>) -> OrderRecord {
        OrderRecord {
            recorded_at,
            payer: self.payer.trim().to_string(),
            menu: self.menu,
            quantity: self.quantity,
            price: self.price,
            status: self.status,
        }
    }
}
