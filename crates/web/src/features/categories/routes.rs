use axum::{Router, routing::get};

use super::handlers::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
