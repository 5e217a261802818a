//! Customer orders as managed by the admin console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DiningOption, Email, EmailError, MenuItemId, OrderId, OrderStatus, Price};

/// One ordered item within an [`Order`].
///
/// Carries a snapshot of the name and unit price as sold; later menu
/// edits do not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderLine {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_address: Option<String>,
    pub lines: Vec<OrderLine>,
    /// Grand total as charged, snapshot at order time.
    pub total: Price,
    pub status: OrderStatus,
    pub dining_option: DiningOption,
    pub placed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of line totals (excludes fee and tax, which are folded into
    /// the stored `total`).
    #[must_use]
    pub fn items_total(&self) -> Price {
        self.lines.iter().map(OrderLine::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// A re-submitted copy of this order: new id, pending again, placed
    /// now.
    #[must_use]
    pub fn duplicate_as(&self, id: OrderId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            status: OrderStatus::Pending,
            placed_at: now,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

/// Validation errors for [`OrderDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderDraftError {
    #[error("customer name is required")]
    EmptyCustomerName,
    #[error("customer phone is required")]
    EmptyCustomerPhone,
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),
}

/// Editable order fields as submitted by the console's edit form.
///
/// Lines, totals, and status are out of scope here: money is a snapshot
/// of what was charged, and status moves through its own operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub customer_phone: String,
    /// Empty means no email on file.
    pub customer_email: String,
    pub customer_address: String,
    pub dining_option: DiningOption,
    pub table_number: String,
    pub payment_method: String,
    pub payment_status: String,
    pub estimated_time: String,
    pub notes: String,
}

impl OrderDraft {
    /// Check the draft's field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: empty customer name or
    /// phone, or a structurally invalid email.
    pub fn validate(&self) -> Result<(), OrderDraftError> {
        if self.customer_name.trim().is_empty() {
            return Err(OrderDraftError::EmptyCustomerName);
        }
        if self.customer_phone.trim().is_empty() {
            return Err(OrderDraftError::EmptyCustomerPhone);
        }
        self.parse_email()?;
        Ok(())
    }

    /// Validate and apply the draft on top of an existing order.
    ///
    /// # Errors
    ///
    /// See [`OrderDraft::validate`].
    pub fn apply_to(self, order: &Order, now: DateTime<Utc>) -> Result<Order, OrderDraftError> {
        self.validate()?;
        let email = self.parse_email()?;
        let none_if_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        };
        Ok(Order {
            customer_name: self.customer_name.trim().to_owned(),
            customer_phone: self.customer_phone.trim().to_owned(),
            customer_email: email,
            customer_address: none_if_empty(&self.customer_address),
            dining_option: self.dining_option,
            table_number: none_if_empty(&self.table_number),
            payment_method: none_if_empty(&self.payment_method),
            payment_status: none_if_empty(&self.payment_status),
            estimated_time: none_if_empty(&self.estimated_time),
            notes: none_if_empty(&self.notes),
            updated_at: now,
            ..order.clone()
        })
    }

    fn parse_email(&self) -> Result<Option<Email>, EmailError> {
        let raw = self.customer_email.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        Email::parse(raw).map(Some)
    }
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            customer_email: order
                .customer_email
                .as_ref()
                .map(|e| e.as_str().to_owned())
                .unwrap_or_default(),
            customer_address: order.customer_address.clone().unwrap_or_default(),
            dining_option: order.dining_option,
            table_number: order.table_number.clone().unwrap_or_default(),
            payment_method: order.payment_method.clone().unwrap_or_default(),
            payment_status: order.payment_status.clone().unwrap_or_default(),
            estimated_time: order.estimated_time.clone().unwrap_or_default(),
            notes: order.notes.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_items_total_and_count() {
        let orders = seed::orders();
        let first = orders.first().unwrap();
        assert_eq!(
            first.items_total(),
            first.lines.iter().map(OrderLine::line_total).sum()
        );
        assert!(first.item_count() > 0);
    }

    #[test]
    fn test_draft_edits_customer_fields_only() {
        let orders = seed::orders();
        let original = orders.first().unwrap();

        let mut draft = OrderDraft::from(original);
        draft.customer_name = "Eric Mugisha".to_owned();
        draft.dining_option = DiningOption::Takeout;
        draft.table_number = String::new();

        let updated = draft.apply_to(original, Utc::now()).unwrap();
        assert_eq!(updated.customer_name, "Eric Mugisha");
        assert_eq!(updated.dining_option, DiningOption::Takeout);
        assert_eq!(updated.table_number, None);
        // What was charged never moves with an edit.
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.lines, original.lines);
        assert_eq!(updated.total, original.total);
        assert_eq!(updated.status, original.status);
    }

    #[test]
    fn test_draft_rejects_empty_name_and_bad_email() {
        let orders = seed::orders();
        let original = orders.first().unwrap();

        let mut draft = OrderDraft::from(original);
        draft.customer_name = "  ".to_owned();
        assert_eq!(draft.validate(), Err(OrderDraftError::EmptyCustomerName));

        let mut draft = OrderDraft::from(original);
        draft.customer_email = "not-an-address".to_owned();
        assert!(matches!(
            draft.validate(),
            Err(OrderDraftError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_draft_blank_email_clears_it() {
        let orders = seed::orders();
        let original = orders.first().unwrap();
        assert!(original.customer_email.is_some());

        let mut draft = OrderDraft::from(original);
        draft.customer_email = String::new();
        let updated = draft.apply_to(original, Utc::now()).unwrap();
        assert_eq!(updated.customer_email, None);
    }

    #[test]
    fn test_duplicate_resets_status_and_timestamps() {
        let orders = seed::orders();
        let original = orders.last().unwrap();
        let now = Utc::now();
        let copy = original.duplicate_as(OrderId::from_seq(99), now);

        assert_eq!(copy.id.as_str(), "ORD099");
        assert_eq!(copy.status, OrderStatus::Pending);
        assert_eq!(copy.placed_at, now);
        assert_eq!(copy.lines, original.lines);
        assert_eq!(copy.total, original.total);
    }
}
