//! The trade API client.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::Dispatcher;
use crate::api::endpoints::{
    CANCEL_ORDER, Endpoint, MODIFY_ORDER, OPEN_POSITIONS, ORDER_BY_ID, ORDERS,
    PLACE_INTRADAY_ORDER, PLACE_NORMAL_ORDER, QUOTE, QUOTE_DEPTH, QUOTE_LTP, QUOTE_OHLC,
    STOCK_POSITIONS, TODAYS_POSITIONS, TRADE_BY_ID, TRADES,
};
use crate::auth::{SessionManager, SessionState};
use crate::config::Config;
use crate::error::{Error, ValidationError};
use crate::transport::{HttpTransport, Transport};
use crate::types::{BaseUrl, Order};

/// A client for the trade API.
///
/// Obtain one with [`KotakClient::connect()`], which returns only after the
/// session handshake has completed. Clients are cheap to clone and can be
/// shared across tasks; concurrent calls are independent.
///
/// # Example
///
/// ```no_run
/// use kotak::{Config, Credentials, KotakClient};
///
/// # async fn example() -> Result<(), kotak::Error> {
/// let credentials = Credentials::new("AB1234", "password", "app", "ck", "sk", "1234");
/// let client = KotakClient::connect(Config::new(credentials)).await?;
///
/// let positions = client.todays_positions().await?;
/// println!("{positions}");
/// # Ok(())
/// # }
/// ```
pub struct KotakClient<T = HttpTransport> {
    inner: Arc<ClientInner<T>>,
}

struct ClientInner<T> {
    manager: SessionManager<T>,
    dispatcher: Dispatcher<T>,
}

impl<T> Clone for KotakClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl KotakClient<HttpTransport> {
    /// Build an HTTP client and establish a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be built or the handshake fails.
    pub async fn connect(config: Config) -> Result<Self, Error> {
        let transport = HttpTransport::new(config.timeout)?;
        Self::connect_with_transport(config, transport).await
    }

    /// Rebuild a client from a persisted session, without a handshake.
    ///
    /// The restored client holds no credentials, so it cannot
    /// [`reauthenticate`](KotakClient::reauthenticate).
    pub fn restore(
        base_url: BaseUrl,
        state: SessionState,
        timeout: std::time::Duration,
    ) -> Result<Self, Error> {
        let transport = HttpTransport::new(timeout)?;
        Ok(Self::from_session(base_url, state, transport))
    }
}

impl<T: Transport> KotakClient<T> {
    /// Establish a session over a caller-supplied transport.
    pub async fn connect_with_transport(config: Config, transport: T) -> Result<Self, Error> {
        let client = Self::unauthenticated(config, transport);
        client.login().await?;
        Ok(client)
    }

    /// A client with no session yet.
    ///
    /// Every API call fails with [`Error::NotAuthenticated`] until
    /// [`login`](KotakClient::login) has been awaited successfully.
    pub fn unauthenticated(config: Config, transport: T) -> Self {
        let transport = Arc::new(transport);
        Self::from_parts(
            SessionManager::new(
                config.base_url.clone(),
                config.credentials,
                Arc::clone(&transport),
            ),
            Dispatcher::new(config.base_url, transport),
        )
    }

    /// A client around an existing session, over a caller-supplied transport.
    pub fn from_session(base_url: BaseUrl, state: SessionState, transport: T) -> Self {
        let transport = Arc::new(transport);
        Self::from_parts(
            SessionManager::restored(base_url.clone(), state, Arc::clone(&transport)),
            Dispatcher::new(base_url, transport),
        )
    }

    fn from_parts(manager: SessionManager<T>, dispatcher: Dispatcher<T>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                manager,
                dispatcher,
            }),
        }
    }

    /// Run the session handshake.
    pub async fn login(&self) -> Result<SessionState, Error> {
        self.inner.manager.initialize().await
    }

    /// Run the handshake again and replace the session.
    ///
    /// There is no automatic refresh; call this when the server starts
    /// rejecting the session token.
    pub async fn reauthenticate(&self) -> Result<SessionState, Error> {
        self.inner.manager.reauthenticate().await
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Option<SessionState> {
        self.inner.manager.current().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.manager.is_authenticated().await
    }

    pub fn base_url(&self) -> &BaseUrl {
        self.inner.dispatcher.base_url()
    }

    /// Call any endpoint from the table.
    ///
    /// The typed methods below are thin wrappers over this.
    pub async fn call(
        &self,
        endpoint: &Endpoint,
        param: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let session = self.inner.manager.current().await;
        self.inner
            .dispatcher
            .dispatch(session.as_ref(), endpoint, param, body)
            .await
    }

    async fn send_order(&self, endpoint: &Endpoint, order: &Order) -> Result<Value, Error> {
        let body = serde_json::to_value(order).map_err(|e| ValidationError::Body {
            endpoint: endpoint.name,
            reason: e.to_string(),
        })?;
        self.call(endpoint, None, Some(&body)).await
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Place an intraday (MIS) order.
    #[instrument(skip(self, order))]
    pub async fn place_intraday_order(&self, order: &Order) -> Result<Value, Error> {
        debug!("Placing intraday order");
        self.send_order(&PLACE_INTRADAY_ORDER, order).await
    }

    /// Place a normal (delivery) order.
    #[instrument(skip(self, order))]
    pub async fn place_normal_order(&self, order: &Order) -> Result<Value, Error> {
        debug!("Placing normal order");
        self.send_order(&PLACE_NORMAL_ORDER, order).await
    }

    /// Modify an open order.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError::MissingOrderId`] before any request is
    /// made when the order has no non-empty id.
    #[instrument(skip(self, order), fields(order_id = order.order_id.as_deref()))]
    pub async fn modify_order(&self, order: &Order) -> Result<Value, Error> {
        if order.id().is_none() {
            return Err(ValidationError::MissingOrderId.into());
        }
        debug!("Modifying order");
        self.send_order(&MODIFY_ORDER, order).await
    }

    /// Cancel an order by id.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> Result<Value, Error> {
        debug!("Cancelling order");
        self.call(&CANCEL_ORDER, Some(order_id), None).await
    }

    // ========================================================================
    // Positions
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn todays_positions(&self) -> Result<Value, Error> {
        self.call(&TODAYS_POSITIONS, None, None).await
    }

    #[instrument(skip(self))]
    pub async fn open_positions(&self) -> Result<Value, Error> {
        self.call(&OPEN_POSITIONS, None, None).await
    }

    #[instrument(skip(self))]
    pub async fn stock_positions(&self) -> Result<Value, Error> {
        self.call(&STOCK_POSITIONS, None, None).await
    }

    // ========================================================================
    // Reports
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Value, Error> {
        self.call(&ORDERS, None, None).await
    }

    #[instrument(skip(self))]
    pub async fn order_by_id(&self, order_id: &str) -> Result<Value, Error> {
        self.call(&ORDER_BY_ID, Some(order_id), None).await
    }

    #[instrument(skip(self))]
    pub async fn trades(&self) -> Result<Value, Error> {
        self.call(&TRADES, None, None).await
    }

    /// Trades filled against one order.
    #[instrument(skip(self))]
    pub async fn trade_by_id(&self, order_id: &str) -> Result<Value, Error> {
        self.call(&TRADE_BY_ID, Some(order_id), None).await
    }

    // ========================================================================
    // Quotes
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn quote(&self, instrument_id: &str) -> Result<Value, Error> {
        self.call(&QUOTE, Some(instrument_id), None).await
    }

    /// Last traded price.
    #[instrument(skip(self))]
    pub async fn quote_ltp(&self, instrument_id: &str) -> Result<Value, Error> {
        self.call(&QUOTE_LTP, Some(instrument_id), None).await
    }

    /// Market depth.
    #[instrument(skip(self))]
    pub async fn quote_depth(&self, instrument_id: &str) -> Result<Value, Error> {
        self.call(&QUOTE_DEPTH, Some(instrument_id), None).await
    }

    #[instrument(skip(self))]
    pub async fn quote_ohlc(&self, instrument_id: &str) -> Result<Value, Error> {
        self.call(&QUOTE_OHLC, Some(instrument_id), None).await
    }
}

impl<T> std::fmt::Debug for KotakClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KotakClient")
            .field("manager", &self.inner.manager)
            .field("dispatcher", &self.inner.dispatcher)
            .finish()
    }
}
