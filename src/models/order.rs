//! Purchase order models.
//!
//! Timestamps on the wire are epoch milliseconds. They are kept as raw
//! integers and exposed through `chrono` accessors.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::Sku;

/// Convert epoch milliseconds into a UTC timestamp.
fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// A monetary amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    /// ISO currency code
    pub currency: String,
    /// Amount
    pub amount: Decimal,
}

/// Tax applied to a charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    /// Tax name
    pub tax_name: String,
    /// Tax amount
    pub tax_amount: Money,
}

/// A single charge on an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charge {
    /// Charge type (e.g. "PRODUCT", "SHIPPING")
    pub charge_type: String,
    /// Charge name
    pub charge_name: String,
    /// Charge amount
    pub charge_amount: Money,
    /// Tax on this charge
    pub tax: Tax,
}

/// Charges on an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charges {
    /// Individual charges
    pub charge: Vec<Charge>,
}

/// Ordered quantity of an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineQuantity {
    /// Unit (e.g. "EACH")
    pub unit_of_measurement: String,
    /// Quantity, as sent by the upstream
    pub amount: String,
}

/// Ship node that fulfils the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipNode {
    /// Node type (e.g. "SellerFulfilled")
    #[serde(rename = "type")]
    pub node_type: String,
}

/// Customer shipping address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    /// Recipient name
    pub name: String,
    /// Address line 1
    pub address1: String,
    /// Address line 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// City
    pub city: String,
    /// State
    pub state: String,
    /// Postal code
    pub postal_code: String,
    /// Country
    pub country: String,
    /// Address type (e.g. "RESIDENTIAL")
    pub address_type: String,
}

/// Shipping details for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    /// Customer phone
    pub phone: String,
    /// Estimated delivery date (epoch millis)
    pub estimated_delivery_date: i64,
    /// Estimated ship date (epoch millis)
    pub estimated_ship_date: i64,
    /// Shipping method code
    pub method_code: String,
    /// Destination address
    pub postal_address: PostalAddress,
}

impl ShippingInfo {
    /// Estimated delivery date as a timestamp.
    pub fn estimated_delivery(&self) -> Option<DateTime<Utc>> {
        from_millis(self.estimated_delivery_date)
    }

    /// Estimated ship date as a timestamp.
    pub fn estimated_ship(&self) -> Option<DateTime<Utc>> {
        from_millis(self.estimated_ship_date)
    }
}

/// Item reference on an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product name
    pub product_name: String,
    /// Seller SKU
    pub sku: Sku,
}

/// Carrier used for a shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierName {
    /// Carrier name (e.g. "UPS")
    pub carrier: String,
}

/// Tracking information for a shipped line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    /// Ship time (epoch millis)
    pub ship_date_time: i64,
    /// Carrier
    pub carrier_name: CarrierName,
    /// Shipping method code
    pub method_code: String,
    /// Carrier tracking number
    pub tracking_number: String,
    /// Carrier tracking URL
    #[serde(rename = "trackingURL")]
    pub tracking_url: String,
}

impl TrackingInfo {
    /// Ship time as a timestamp.
    pub fn shipped_at(&self) -> Option<DateTime<Utc>> {
        from_millis(self.ship_date_time)
    }
}

/// Quantity in a given status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQuantity {
    /// Unit (e.g. "EACH")
    pub unit_of_measurement: String,
    /// Quantity
    pub amount: i64,
}

/// Status of (part of) an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineStatus {
    /// Status (e.g. "Created", "Acknowledged", "Shipped")
    pub status: String,
    /// Quantity in this status
    pub status_quantity: StatusQuantity,
    /// Tracking details, once shipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_info: Option<TrackingInfo>,
    /// Sub-seller identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_seller_id: Option<String>,
    /// Reason the line was cancelled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    /// Address for returns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_center_address: Option<String>,
}

/// Status list of an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineStatuses {
    /// Statuses
    pub order_line_status: Vec<OrderLineStatus>,
}

/// Fulfillment details of an order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    /// Fulfillment option (e.g. "S2H")
    pub fulfillment_option: String,
    /// Ship method (e.g. "STANDARD")
    pub ship_method: String,
    /// Pickup time (epoch millis)
    pub pick_up_date_time: i64,
    /// Store, for pickup orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

/// A line of a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Line number within the order
    pub line_number: String,
    /// Ordered item
    pub item: OrderItem,
    /// Charges for this line
    pub charges: Charges,
    /// Ordered quantity
    pub order_line_quantity: OrderLineQuantity,
    /// Last status change (epoch millis)
    pub status_date: i64,
    /// Current statuses
    pub order_line_statuses: OrderLineStatuses,
    /// Fulfillment details
    pub fulfillment: Fulfillment,
    /// Customer intent to cancel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_to_cancel: Option<String>,
}

impl OrderLine {
    /// Sum of all charge amounts on this line, excluding tax.
    pub fn charge_total(&self) -> Decimal {
        self.charges
            .charge
            .iter()
            .map(|c| c.charge_amount.amount)
            .sum()
    }
}

/// Lines of a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLines {
    /// Order lines
    pub order_line: Vec<OrderLine>,
}

/// A purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Purchase order ID
    pub purchase_order_id: String,
    /// Customer-facing order ID
    pub customer_order_id: String,
    /// Customer email (relay address)
    pub customer_email_id: String,
    /// Order creation time (epoch millis)
    pub order_date: i64,
    /// Shipping details
    pub shipping_info: ShippingInfo,
    /// Order lines
    pub order_lines: OrderLines,
    /// Fulfilling ship node
    pub ship_node: ShipNode,
}

impl Order {
    /// Order creation time as a timestamp.
    pub fn ordered_at(&self) -> Option<DateTime<Utc>> {
        from_millis(self.order_date)
    }

    /// Sum of all line charges, excluding tax.
    pub fn total(&self) -> Decimal {
        self.order_lines
            .order_line
            .iter()
            .map(OrderLine::charge_total)
            .sum()
    }
}

/// Envelope around a single order, as returned by order endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderEnvelope {
    /// The order
    pub order: Order,
}

/// Pagination metadata of the released orders listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleasedOrdersMeta {
    /// Total number of released orders
    pub total_count: i64,
    /// Page size
    pub limit: i64,
    /// Query string for the next page, if any
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Orders on a released orders page.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleasedOrdersElements {
    /// Orders
    pub order: Vec<Order>,
}

/// Body of the released orders listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleasedOrdersList {
    /// Pagination metadata
    pub meta: ReleasedOrdersMeta,
    /// Orders
    pub elements: ReleasedOrdersElements,
}

/// Response of the released orders listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleasedOrdersPage {
    /// Listing
    pub list: ReleasedOrdersList,
}

impl ReleasedOrdersPage {
    /// Consume the page and return its orders.
    pub fn into_orders(self) -> Vec<Order> {
        self.list.elements.order
    }
}
