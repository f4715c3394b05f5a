//! Endpoint table for the trade API.
//!
//! Every operation is one row: a name for logs and errors, the verb, a path
//! template, and whether it carries a body. Templates hold at most one
//! `{placeholder}`, filled by plain string substitution.

use crate::error::ValidationError;
use crate::transport::Verb;

/// Whether an endpoint sends a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    None,
    Json,
}

/// One row of the endpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub verb: Verb,
    pub path: &'static str,
    pub body: BodyKind,
}

impl Endpoint {
    const fn new(name: &'static str, verb: Verb, path: &'static str, body: BodyKind) -> Self {
        Self {
            name,
            verb,
            path,
            body,
        }
    }

    /// Name of the template placeholder, e.g. `orderId`.
    pub fn parameter(&self) -> Option<&'static str> {
        let start = self.path.find('{')?;
        let end = self.path[start..].find('}')? + start;
        Some(&self.path[start + 1..end])
    }

    /// Resolve the path template.
    ///
    /// A value supplied for a template without a placeholder is ignored.
    /// An empty value counts as missing.
    pub fn resolve(&self, param: Option<&str>) -> Result<String, ValidationError> {
        let Some(name) = self.parameter() else {
            return Ok(self.path.to_string());
        };
        let value = param
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::MissingPathParameter {
                endpoint: self.name,
                parameter: name,
            })?;
        Ok(self.path.replace(&format!("{{{}}}", name), value))
    }
}

// ============================================================================
// Session Handshake
// ============================================================================

pub const SESSION_INIT: Endpoint = Endpoint::new(
    "session_init",
    Verb::Get,
    "/session/1.0/session/init",
    BodyKind::None,
);

pub const SESSION_LOGIN: Endpoint = Endpoint::new(
    "session_login",
    Verb::Post,
    "/session/1.0/session/login/userid",
    BodyKind::Json,
);

pub const SESSION_2FA: Endpoint = Endpoint::new(
    "session_2fa",
    Verb::Post,
    "/session/1.0/session/2FA/accesscode",
    BodyKind::Json,
);

// ============================================================================
// Orders
// ============================================================================

pub const PLACE_INTRADAY_ORDER: Endpoint = Endpoint::new(
    "place_intraday_order",
    Verb::Post,
    "/orders/1.0/order/mis",
    BodyKind::Json,
);

pub const PLACE_NORMAL_ORDER: Endpoint = Endpoint::new(
    "place_normal_order",
    Verb::Post,
    "/orders/1.0/order/normal",
    BodyKind::Json,
);

pub const MODIFY_ORDER: Endpoint =
    Endpoint::new("modify_order", Verb::Put, "/orders/1.0/order", BodyKind::Json);

pub const CANCEL_ORDER: Endpoint = Endpoint::new(
    "cancel_order",
    Verb::Delete,
    "/orders/1.0/order/{orderId}",
    BodyKind::None,
);

// ============================================================================
// Positions
// ============================================================================

pub const TODAYS_POSITIONS: Endpoint = Endpoint::new(
    "todays_positions",
    Verb::Get,
    "/positions/1.0/positions/todays",
    BodyKind::None,
);

pub const OPEN_POSITIONS: Endpoint = Endpoint::new(
    "open_positions",
    Verb::Get,
    "/positions/1.0/positions/open",
    BodyKind::None,
);

pub const STOCK_POSITIONS: Endpoint = Endpoint::new(
    "stock_positions",
    Verb::Get,
    "/positions/1.0/positions/stocks",
    BodyKind::None,
);

// ============================================================================
// Reports
// ============================================================================

pub const ORDERS: Endpoint =
    Endpoint::new("orders", Verb::Get, "/reports/1.0/orders", BodyKind::None);

pub const ORDER_BY_ID: Endpoint = Endpoint::new(
    "order_by_id",
    Verb::Get,
    "/reports/1.0/orders/{orderId}",
    BodyKind::None,
);

pub const TRADES: Endpoint =
    Endpoint::new("trades", Verb::Get, "/reports/1.0/trades", BodyKind::None);

pub const TRADE_BY_ID: Endpoint = Endpoint::new(
    "trade_by_id",
    Verb::Get,
    "/reports/1.0/trades/{orderId}",
    BodyKind::None,
);

// ============================================================================
// Quotes
// ============================================================================

pub const QUOTE: Endpoint = Endpoint::new(
    "quote",
    Verb::Get,
    "/quotes/v1.0/instruments/{instrumentId}",
    BodyKind::None,
);

pub const QUOTE_LTP: Endpoint = Endpoint::new(
    "quote_ltp",
    Verb::Get,
    "/quotes/v1.0/ltp/instruments/{instrumentId}",
    BodyKind::None,
);

pub const QUOTE_DEPTH: Endpoint = Endpoint::new(
    "quote_depth",
    Verb::Get,
    "/quotes/v1.0/depth/instruments/{instrumentId}",
    BodyKind::None,
);

pub const QUOTE_OHLC: Endpoint = Endpoint::new(
    "quote_ohlc",
    Verb::Get,
    "/quotes/v1.0/ohlc/instruments/{instrumentId}",
    BodyKind::None,
);

/// Every authenticated endpoint.
pub const AUTHENTICATED: [Endpoint; 15] = [
    PLACE_INTRADAY_ORDER,
    PLACE_NORMAL_ORDER,
    MODIFY_ORDER,
    CANCEL_ORDER,
    TODAYS_POSITIONS,
    OPEN_POSITIONS,
    STOCK_POSITIONS,
    ORDERS,
    ORDER_BY_ID,
    TRADES,
    TRADE_BY_ID,
    QUOTE,
    QUOTE_LTP,
    QUOTE_DEPTH,
    QUOTE_OHLC,
];
