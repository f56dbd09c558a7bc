use std::collections::HashMap;

use actix_web::http::header;
use actix_web::{web, HttpResponse};

use crate::application::checkout_service::CheckoutService;
use crate::errors::AppError;

/// GET /checkout/redirect
///
/// Creates a Square payment link for the requested products and redirects
/// the shopper to it. Recognised coupon codes add an order-wide discount;
/// `utm_*` parameters are carried over to the post-payment landing page.
#[utoipa::path(
    get,
    path = "/checkout/redirect",
    params(
        ("products" = String, Query, description = "Comma-separated catalog ids with optional quantity, e.g. `VAR1:2,VAR2`"),
        ("coupon" = Option<String>, Query, description = "Coupon code, case-insensitive"),
        ("utm_source" = Option<String>, Query, description = "Forwarded to the landing page"),
        ("utm_medium" = Option<String>, Query, description = "Forwarded to the landing page"),
        ("utm_campaign" = Option<String>, Query, description = "Forwarded to the landing page"),
        ("utm_content" = Option<String>, Query, description = "Forwarded to the landing page"),
        ("utm_term" = Option<String>, Query, description = "Forwarded to the landing page"),
    ),
    responses(
        (status = 302, description = "Redirect to the hosted checkout page"),
        (status = 400, description = "No products in the request"),
        (status = 500, description = "Square credentials are not configured"),
        (status = 502, description = "Square failed or returned no checkout URL"),
    ),
    tag = "checkout"
)]
pub async fn redirect(
    service: web::Data<CheckoutService>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let pairs = query.into_inner();
    // Repeated `products` values are joined as one comma-separated list.
    let products = pairs
        .iter()
        .filter(|(name, _)| name == "products")
        .map(|(_, value)| value.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let mut params: HashMap<String, String> = HashMap::new();
    for (name, value) in pairs {
        params.entry(name).or_insert(value);
    }
    let coupon = params.get("coupon").map(String::as_str);

    let url = service.start_checkout(&products, coupon, &params).await?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .finish())
}
