use crate::entities::order_entity;
use crate::error::{AppError, AppResult};
use crate::models::FieldErrors;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const INVALID_DATE_MESSAGE: &str = "Invalid date format. Expected dd/MM/yyyy or dd-MM-yyyy.";

/// Accepted request date layouts, tried in order.
const ORDER_DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%d/%m/%Y"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,
    #[schema(example = "2024-01-01")]
    pub order_date: NaiveDate,
    pub description: String,
    pub customer_name: String,
    pub was_order_invoiced: bool,
    pub was_order_deleted: bool,
}

/// An order that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub order_date: NaiveDate,
    pub description: String,
    pub customer_name: String,
    pub was_order_invoiced: bool,
    pub was_order_deleted: bool,
}

impl NewOrder {
    pub fn with_id(self, id: i32) -> Order {
        Order {
            id,
            order_date: self.order_date,
            description: self.description,
            customer_name: self.customer_name,
            was_order_invoiced: self.was_order_invoiced,
            was_order_deleted: self.was_order_deleted,
        }
    }
}

impl From<order_entity::Model> for Order {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            order_date: m.order_date,
            description: m.description,
            customer_name: m.customer_name,
            was_order_invoiced: m.was_order_invoiced,
            was_order_deleted: m.was_order_deleted,
        }
    }
}

/// Create/update payload. `orderDate` stays a string until validation so a
/// bad value becomes a field error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[schema(example = "01-01-2024")]
    #[validate(required(message = "OrderDate is required."))]
    pub order_date: Option<String>,

    #[schema(example = "Two boxes of paper")]
    #[validate(
        required(message = "Description is required."),
        length(max = 100, message = "Description can't be longer than 100 characters.")
    )]
    pub description: Option<String>,

    #[schema(example = "Dunder Mifflin")]
    #[validate(
        required(message = "Customer name is required."),
        length(max = 100, message = "Customer name can't be longer than 100 characters.")
    )]
    pub customer_name: Option<String>,

    #[serde(default = "default_was_order_invoiced")]
    #[schema(default = true)]
    pub was_order_invoiced: bool,

    #[serde(default)]
    pub was_order_deleted: bool,
}

fn default_was_order_invoiced() -> bool {
    true
}

impl Default for OrderRequest {
    fn default() -> Self {
        Self {
            order_date: None,
            description: None,
            customer_name: None,
            was_order_invoiced: default_was_order_invoiced(),
            was_order_deleted: false,
        }
    }
}

impl OrderRequest {
    /// Validates every field and maps the payload to a record ready for
    /// insertion. All field errors are reported together.
    pub fn into_new_order(self) -> AppResult<NewOrder> {
        let mut fields = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        };

        // `required` only sees a missing key; blank text is missing as well
        for (field, value, message) in [
            ("orderDate", &self.order_date, "OrderDate is required."),
            ("description", &self.description, "Description is required."),
            ("customerName", &self.customer_name, "Customer name is required."),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                fields.add(field, message);
            }
        }

        let order_date = self.order_date.as_deref().and_then(parse_order_date);
        let date_given = self
            .order_date
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty());
        if date_given && order_date.is_none() {
            fields.add("orderDate", INVALID_DATE_MESSAGE);
        }
        if !fields.is_empty() {
            return Err(AppError::ValidationError(fields));
        }

        let (Some(order_date), Some(description), Some(customer_name)) =
            (order_date, self.description, self.customer_name)
        else {
            return Err(AppError::InternalError(
                "validated order request is missing fields".to_string(),
            ));
        };

        Ok(NewOrder {
            order_date,
            description,
            customer_name,
            was_order_invoiced: self.was_order_invoiced,
            was_order_deleted: self.was_order_deleted,
        })
    }

    /// Same as [`into_new_order`](Self::into_new_order), keeping `id` from the route.
    pub fn into_order(self, id: i32) -> AppResult<Order> {
        Ok(self.into_new_order()?.with_id(id))
    }
}

/// Parses `dd-MM-yyyy` first, then `dd/MM/yyyy`.
pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    // chrono tolerates padding, signs and short fields; the request layouts are fixed width
    if !has_fixed_date_layout(value) {
        return None;
    }
    ORDER_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Two-digit day and month, four-digit year, one separator used in both places.
fn has_fixed_date_layout(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 {
        return false;
    }
    let separator = bytes[2];
    (separator == b'-' || separator == b'/')
        && bytes[5] == separator
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit())
}

/// First calendar day counted as recent: `today - days_before`.
/// A negative `days_before` moves the cutoff forward. `None` on calendar overflow.
pub fn recent_cutoff(today: NaiveDate, days_before: i64) -> Option<NaiveDate> {
    if days_before >= 0 {
        today.checked_sub_days(Days::new(days_before.unsigned_abs()))
    } else {
        today.checked_add_days(Days::new(days_before.unsigned_abs()))
    }
}
