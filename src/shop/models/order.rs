//! # Order Model
//!
//! The in-progress order, the two checkout steps and the validation rules
//! each step enforces.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Payment methods the order service accepts
pub const PAYMENT_METHODS: [&str; 2] = ["online", "cash"];

/// Editable order fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderField {
    Payment,
    Address,
    Email,
    Phone,
}

impl OrderField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Address => "address",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// The checkout step whose form owns this field
    pub fn step(&self) -> CheckoutStep {
        match self {
            Self::Payment | Self::Address => CheckoutStep::PaymentAddress,
            Self::Email | Self::Phone => CheckoutStep::Contact,
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OrderField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payment" => Ok(Self::Payment),
            "address" => Ok(Self::Address),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            other => Err(anyhow::anyhow!("Unknown order field: {other}")),
        }
    }
}

/// A required-field rule: the field must be non-empty or `message` is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: OrderField,
    pub message: &'static str,
}

const PAYMENT_ADDRESS_RULES: [FieldRule; 2] = [
    FieldRule {
        field: OrderField::Payment,
        message: "payment method must be selected",
    },
    FieldRule {
        field: OrderField::Address,
        message: "delivery address is required",
    },
];

const CONTACT_RULES: [FieldRule; 2] = [
    FieldRule {
        field: OrderField::Email,
        message: "email is required",
    },
    FieldRule {
        field: OrderField::Phone,
        message: "phone is required",
    },
];

/// Checkout phase. Each step validates its own disjoint set of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutStep {
    /// Step one: payment method and delivery address
    PaymentAddress,
    /// Step two: email and phone
    Contact,
}

impl CheckoutStep {
    pub fn rules(&self) -> &'static [FieldRule] {
        match self {
            Self::PaymentAddress => &PAYMENT_ADDRESS_RULES,
            Self::Contact => &CONTACT_RULES,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = OrderField> {
        self.rules().iter().map(|rule| rule.field)
    }

    /// Errors this step reports for `order`
    pub fn validate(&self, order: &Order) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for rule in self.rules() {
            if order.field(rule.field).is_empty() {
                errors.insert(rule.field, rule.message);
            }
        }
        errors
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentAddress => "order",
            Self::Contact => "contacts",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The order being assembled, and the record submitted to the order service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub payment: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total: u64,
    /// Product ids in insertion order, without duplicates
    pub items: Vec<String>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: OrderField) -> &str {
        match field {
            OrderField::Payment => &self.payment,
            OrderField::Address => &self.address,
            OrderField::Email => &self.email,
            OrderField::Phone => &self.phone,
        }
    }

    pub fn set_field(&mut self, field: OrderField, value: impl Into<String>) {
        let value = value.into();
        match field {
            OrderField::Payment => self.payment = value,
            OrderField::Address => self.address = value,
            OrderField::Email => self.email = value,
            OrderField::Phone => self.phone = value,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item == id)
    }

    /// Add an id unless it is already present
    pub fn include(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.items.push(id.to_string());
        true
    }

    /// Remove every occurrence of an id
    pub fn exclude(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != id);
        before != self.items.len()
    }
}

/// Field name -> human-readable error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<OrderField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: OrderField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: OrderField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: OrderField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = OrderField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OrderField, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Whether any error belongs to `step`
    pub fn has_errors_for(&self, step: CheckoutStep) -> bool {
        step.fields().any(|field| self.contains(field))
    }

    /// Swap in a fresh result for one step; other steps' entries are kept
    pub fn replace_step(&mut self, step: CheckoutStep, errors: ValidationErrors) {
        for field in step.fields() {
            self.0.remove(&field);
        }
        self.0.extend(errors.0);
    }

    /// All messages joined for a form's error line
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
