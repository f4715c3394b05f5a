//! Order placement, modification and cancellation.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand, ValueEnum};

use kotak::{Order, TransactionType};

use super::Context;

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Place a new order
    Place(PlaceArgs),

    /// Modify an open order
    Modify(ModifyArgs),

    /// Cancel an open order
    Cancel(CancelArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl From<Side> for TransactionType {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => TransactionType::Buy,
            Side::Sell => TransactionType::Sell,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    /// Squared off the same trading day
    Intraday,
    /// Carried forward
    Normal,
}

/// Optional order attributes shared by place and modify.
#[derive(Args, Debug)]
pub struct OrderFields {
    /// Limit price (omit or 0 for market)
    #[arg(long)]
    pub price: Option<f64>,

    /// Trigger price for stop-loss orders
    #[arg(long)]
    pub trigger_price: Option<f64>,

    /// Quantity shown to the market
    #[arg(long)]
    pub disclosed_quantity: Option<u32>,

    /// Order validity, e.g. GFD or IOC
    #[arg(long)]
    pub validity: Option<String>,

    /// Order variety, e.g. REGULAR
    #[arg(long)]
    pub variety: Option<String>,

    /// Free-form tag attached to the order
    #[arg(long)]
    pub tag: Option<String>,
}

impl OrderFields {
    fn apply(self, mut order: Order) -> Order {
        order.price = self.price.or(order.price);
        order.trigger_price = self.trigger_price;
        order.disclosed_quantity = self.disclosed_quantity;
        order.validity = self.validity;
        order.variety = self.variety;
        order.tag = self.tag;
        order
    }
}

#[derive(Args, Debug)]
pub struct PlaceArgs {
    /// Product type
    #[arg(long, value_enum, default_value_t = Product::Normal)]
    pub product: Product,

    /// Instrument token
    #[arg(long)]
    pub instrument: u64,

    /// Buy or sell
    #[arg(long, value_enum)]
    pub side: Side,

    #[arg(long)]
    pub quantity: u32,

    #[command(flatten)]
    pub fields: OrderFields,
}

#[derive(Args, Debug)]
pub struct ModifyArgs {
    /// Id of the order to modify
    #[arg(long)]
    pub order_id: String,

    /// New quantity
    #[arg(long)]
    pub quantity: Option<u32>,

    #[command(flatten)]
    pub fields: OrderFields,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Id of the order to cancel
    pub order_id: String,
}

impl PlaceArgs {
    fn order(self) -> Order {
        let order = Order::new(self.instrument, self.side.into(), self.quantity).with_price(0.0);
        self.fields.apply(order)
    }
}

impl ModifyArgs {
    fn order(self) -> Order {
        let order = Order {
            quantity: self.quantity,
            ..Order::default()
        }
        .with_order_id(self.order_id);
        self.fields.apply(order)
    }
}

pub async fn handle(cmd: OrderCommand, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let response = match cmd {
        OrderCommand::Place(args) => {
            let product = args.product;
            let order = args.order();
            let placed = match product {
                Product::Intraday => client.place_intraday_order(&order).await,
                Product::Normal => client.place_normal_order(&order).await,
            };
            placed.context("Failed to place order")?
        }
        OrderCommand::Modify(args) => client
            .modify_order(&args.order())
            .await
            .context("Failed to modify order")?,
        OrderCommand::Cancel(args) => client
            .cancel_order(&args.order_id)
            .await
            .context("Failed to cancel order")?,
    };

    ctx.print(&response)
}
