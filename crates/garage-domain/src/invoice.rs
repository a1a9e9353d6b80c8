use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub vehicle_id: String,
    #[serde(default)]
    pub license_plate: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Invoice {
    pub fn new(id: impl Into<String>, invoice_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            invoice_number: invoice_number.into(),
            ..Default::default()
        }
    }

    /// Set the pre-tax amount and derive the total.
    pub fn with_amount(mut self, amount: f64, tax: f64) -> Self {
        self.amount = amount;
        self.tax = tax;
        self.total_amount = amount + tax;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_amount_sets_total() {
        let invoice = Invoice::new("i1", "INV-0001").with_amount(100.0, 13.0);
        assert_eq!(invoice.total_amount, 113.0);
    }
}
