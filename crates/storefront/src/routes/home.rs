//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use shopnow_core::Product;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::StoreApi;
use crate::flash;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub flash: Option<String>,
}

/// Display the product listing.
///
/// A failed fetch renders an empty list. Never reads the cart and never
/// redirects.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let products = match state.backend().list_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("Failed to fetch products: {e}");
            Vec::new()
        }
    };

    HomeTemplate {
        products: products.iter().map(ProductView::from).collect(),
        flash: flash::take(&session).await,
    }
}
