//! Orders service for the purchase order lifecycle.

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;

use crate::client::{ApiCall, ClientInner};
use crate::models::{Order, OrderEnvelope, OrderShipment, PurchaseOrderId, ReleasedOrdersPage};
use crate::{Error, Result};

/// Service for purchase order operations.
///
/// # Example
///
/// ```no_run
/// use walmart_rs::models::OrderShipment;
///
/// # async fn example(client: walmart_rs::WalmartClient) -> walmart_rs::Result<()> {
/// for order in client.orders().released().await? {
///     let id = walmart_rs::PurchaseOrderId::new(&order.purchase_order_id);
///
///     // Accept the order
///     client.orders().acknowledge(&id).await?;
///
///     // Confirm shipment of line 1
///     let shipment = OrderShipment::new().ship_line(
///         "1", 1, 1_700_000_000_000, "UPS", "Standard", "1Z999", "https://ups.com/1Z999",
///     );
///     let shipped = client.orders().ship(&id, &shipment).await?;
///     println!("Order {} shipped", shipped.purchase_order_id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct OrdersService {
    inner: Arc<ClientInner>,
}

impl OrdersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the first page of released orders, with its pagination metadata.
    pub async fn released_page(&self) -> Result<ReleasedOrdersPage> {
        self.inner
            .fetch(ApiCall::new(
                Method::GET,
                "/v3/orders/released",
                "Error while fetching orders",
            ))
            .await
    }

    /// Get released orders that are ready to be acknowledged.
    pub async fn released(&self) -> Result<Vec<Order>> {
        Ok(self.released_page().await?.into_orders())
    }

    /// Get a specific order by purchase order ID.
    pub async fn get(&self, purchase_order_id: &PurchaseOrderId) -> Result<Order> {
        let envelope: OrderEnvelope = self
            .inner
            .fetch(ApiCall::new(
                Method::GET,
                order_path(purchase_order_id, ""),
                "Error while fetching order",
            ))
            .await?;
        Ok(envelope.order)
    }

    /// Acknowledge an order, accepting it for fulfilment.
    pub async fn acknowledge(&self, purchase_order_id: &PurchaseOrderId) -> Result<Order> {
        let envelope: OrderEnvelope = self
            .inner
            .fetch(ApiCall::new(
                Method::POST,
                order_path(purchase_order_id, "/acknowledge"),
                "Error while acknowledging order",
            ))
            .await?;
        Ok(envelope.order)
    }

    /// Confirm shipment of one or more order lines.
    ///
    /// Returns the updated order.
    pub async fn ship(
        &self,
        purchase_order_id: &PurchaseOrderId,
        shipment: &OrderShipment,
    ) -> Result<Order> {
        if shipment.is_empty() {
            return Err(Error::InvalidInput(
                "a shipment must contain at least one order line".to_string(),
            ));
        }

        let body = serde_json::to_vec(shipment)?;
        let envelope: OrderEnvelope = self
            .inner
            .fetch(
                ApiCall::new(
                    Method::POST,
                    order_path(purchase_order_id, "/shipping"),
                    "Error while shipping order",
                )
                .json_body(body),
            )
            .await?;
        Ok(envelope.order)
    }

    /// Request a return or refund for an order.
    ///
    /// Refunds are not idempotent, so the request is sent once and never
    /// retried. Returns the raw confirmation body.
    pub async fn return_refund(
        &self,
        purchase_order_id: &PurchaseOrderId,
        return_data: &Value,
    ) -> Result<String> {
        let body = serde_json::to_vec(return_data)?;
        self.inner
            .execute(
                ApiCall::new(
                    Method::POST,
                    order_path(purchase_order_id, "/return-refund"),
                    "Error while processing return/refund",
                )
                .json_body(body)
                .without_retry(),
            )
            .await
    }
}

fn order_path(purchase_order_id: &PurchaseOrderId, suffix: &str) -> String {
    format!(
        "/v3/orders/{}{}",
        urlencoding::encode(purchase_order_id.as_str()),
        suffix
    )
}
