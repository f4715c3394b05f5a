//! Order record sent to the order endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Buy => f.write_str("BUY"),
            TransactionType::Sell => f.write_str("SELL"),
        }
    }
}

/// An order as accepted by the place, modify and cancel endpoints.
///
/// Only `order_id` is inspected by the client (modify requires it). Fields
/// the client does not model can be carried in `extra` and are sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument_token: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclosed_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Order {
    /// A new order for `quantity` units of an instrument.
    pub fn new(instrument_token: u64, transaction_type: TransactionType, quantity: u32) -> Self {
        Self {
            instrument_token: Some(instrument_token),
            transaction_type: Some(transaction_type),
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_trigger_price(mut self, trigger_price: f64) -> Self {
        self.trigger_price = Some(trigger_price);
        self
    }

    pub fn with_validity(mut self, validity: impl Into<String>) -> Self {
        self.validity = Some(validity.into());
        self
    }

    pub fn with_variety(mut self, variety: impl Into<String>) -> Self {
        self.variety = Some(variety.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The order id, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.order_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let order = Order::new(727, TransactionType::Buy, 10)
            .with_price(101.5)
            .with_validity("GFD");
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "instrumentToken": 727,
                "transactionType": "BUY",
                "quantity": 10,
                "price": 101.5,
                "validity": "GFD"
            })
        );
    }

    #[test]
    fn extra_fields_survive() {
        let order: Order = serde_json::from_value(json!({
            "orderId": "ORD1",
            "quantity": 5,
            "product": "NORMAL"
        }))
        .unwrap();
        assert_eq!(order.id(), Some("ORD1"));
        assert_eq!(order.extra["product"], "NORMAL");

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["product"], "NORMAL");
    }

    #[test]
    fn empty_order_id_is_treated_as_absent() {
        let order = Order::default().with_order_id("");
        assert_eq!(order.id(), None);
        assert_eq!(Order::default().id(), None);
    }
}
