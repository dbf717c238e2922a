//! Shipment confirmation payload.

use serde::{Deserialize, Serialize};

use super::order::{CarrierName, OrderLineStatus, StatusQuantity, TrackingInfo};

/// Shipping update for one or more lines of a purchase order.
///
/// Serializes to the `{"orderShipment": {"orderLines": {...}}}` document
/// the shipping endpoint expects.
///
/// # Example
///
/// ```
/// use walmart_rs::models::OrderShipment;
///
/// let shipment = OrderShipment::new()
///     .ship_line("1", 1, 1_700_000_000_000, "UPS", "Standard", "1Z999", "https://ups.com/1Z999");
/// assert_eq!(shipment.order_shipment.order_lines.order_line.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderShipment {
    /// Shipment body
    pub order_shipment: ShipmentBody,
}

/// Lines included in a shipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentBody {
    /// Lines
    pub order_lines: ShipmentLines,
}

/// Shipment line list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentLines {
    /// Lines
    pub order_line: Vec<ShipmentLine>,
}

/// A shipped order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentLine {
    /// Line number within the order
    pub line_number: String,
    /// New statuses for the line
    pub order_line_statuses: ShipmentLineStatuses,
}

/// Status list of a shipped line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentLineStatuses {
    /// Statuses
    pub order_line_status: Vec<OrderLineStatus>,
}

impl OrderShipment {
    /// Create an empty shipment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line marked as shipped with the given tracking details.
    #[allow(clippy::too_many_arguments)]
    pub fn ship_line(
        mut self,
        line_number: impl Into<String>,
        quantity: i64,
        ship_date_time: i64,
        carrier: impl Into<String>,
        method_code: impl Into<String>,
        tracking_number: impl Into<String>,
        tracking_url: impl Into<String>,
    ) -> Self {
        let status = OrderLineStatus {
            status: "Shipped".to_string(),
            status_quantity: StatusQuantity {
                unit_of_measurement: "EACH".to_string(),
                amount: quantity,
            },
            tracking_info: Some(TrackingInfo {
                ship_date_time,
                carrier_name: CarrierName {
                    carrier: carrier.into(),
                },
                method_code: method_code.into(),
                tracking_number: tracking_number.into(),
                tracking_url: tracking_url.into(),
            }),
            sub_seller_id: None,
            cancellation_reason: None,
            return_center_address: None,
        };

        self.order_shipment.order_lines.order_line.push(ShipmentLine {
            line_number: line_number.into(),
            order_line_statuses: ShipmentLineStatuses {
                order_line_status: vec![status],
            },
        });
        self
    }

    /// Returns `true` if no line has been added.
    pub fn is_empty(&self) -> bool {
        self.order_shipment.order_lines.order_line.is_empty()
    }
}
