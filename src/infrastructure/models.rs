//! Square Checkout API wire types for `CreatePaymentLink`.

use serde::{Deserialize, Serialize};

use crate::domain::order::{DiscountScope, DiscountSpec, LineItem, OrderRequest};
use crate::domain::ports::PaymentLinkRequest;

#[derive(Debug, Serialize)]
pub struct CreatePaymentLinkBody {
    pub idempotency_key: String,
    pub order: OrderBody,
    pub checkout_options: CheckoutOptionsBody,
}

#[derive(Debug, Serialize)]
pub struct OrderBody {
    pub location_id: String,
    pub line_items: Vec<LineItemBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<DiscountBody>,
}

#[derive(Debug, Serialize)]
pub struct LineItemBody {
    pub catalog_object_id: String,
    /// Square expects quantities as decimal strings.
    pub quantity: String,
    pub item_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DiscountBody {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub percentage: String,
    pub scope: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CheckoutOptionsBody {
    pub redirect_url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePaymentLinkResponse {
    pub payment_link: Option<PaymentLinkRow>,
    #[serde(default)]
    pub errors: Vec<ApiErrorRow>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentLinkRow {
    pub id: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorRow {
    pub category: Option<String>,
    pub code: Option<String>,
    pub detail: Option<String>,
}

impl CreatePaymentLinkResponse {
    /// One line per reported error, e.g. `INVALID_REQUEST_ERROR/NOT_FOUND: Item not found`.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| {
                format!(
                    "{}/{}: {}",
                    e.category.as_deref().unwrap_or("UNKNOWN"),
                    e.code.as_deref().unwrap_or("UNKNOWN"),
                    e.detail.as_deref().unwrap_or("")
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl From<&PaymentLinkRequest> for CreatePaymentLinkBody {
    fn from(request: &PaymentLinkRequest) -> Self {
        Self {
            idempotency_key: request.idempotency_key.to_string(),
            order: OrderBody::from(&request.order),
            checkout_options: CheckoutOptionsBody {
                redirect_url: request.redirect_url.clone(),
            },
        }
    }
}

impl From<&OrderRequest> for OrderBody {
    fn from(order: &OrderRequest) -> Self {
        Self {
            location_id: order.location_id().to_string(),
            line_items: order.items().iter().map(LineItemBody::from).collect(),
            discounts: order.discount().map(DiscountBody::from).into_iter().collect(),
        }
    }
}

impl From<&LineItem> for LineItemBody {
    fn from(item: &LineItem) -> Self {
        Self {
            catalog_object_id: item.catalog_id.clone(),
            quantity: item.quantity.to_string(),
            item_type: "ITEM",
        }
    }
}

impl From<&DiscountSpec> for DiscountBody {
    fn from(discount: &DiscountSpec) -> Self {
        Self {
            name: discount.label.clone(),
            kind: "FIXED_PERCENTAGE",
            percentage: discount.percentage.clone(),
            scope: match discount.scope {
                DiscountScope::Order => "ORDER",
            },
        }
    }
}
