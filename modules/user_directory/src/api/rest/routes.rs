use axum::{
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the user directory endpoints and attach the service extension.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(Extension(service))
}
