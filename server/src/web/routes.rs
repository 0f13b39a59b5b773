// server/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{
  admin_handlers, cart_handlers, checkout_handlers, contact_handlers, product_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("/categories", web::get().to(product_handlers::list_categories_handler))
      // Shop
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route(
            "/{product_id}/related",
            web::get().to(product_handlers::related_products_handler),
          ),
      )
      // Cart, keyed by the X-Session-ID header
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::get_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/items", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/items/{product_id}", web::put().to(cart_handlers::update_cart_item_handler))
          .route("/items/{product_id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      )
      .route("/checkout", web::post().to(checkout_handlers::checkout_handler))
      .route("/orders", web::get().to(checkout_handlers::list_orders_handler))
      .route("/contact", web::post().to(contact_handlers::submit_contact_handler))
      // Admin dashboard
      .service(
        web::scope("/admin")
          .route("/products", web::get().to(admin_handlers::list_products_handler))
          .route("/products", web::post().to(admin_handlers::create_product_handler))
          .route("/products/{product_id}", web::put().to(admin_handlers::update_product_handler))
          .route("/products/{product_id}", web::delete().to(admin_handlers::delete_product_handler))
          .route(
            "/products/{product_id}/stock",
            web::put().to(admin_handlers::update_stock_handler),
          )
          .route("/stats", web::get().to(admin_handlers::stats_handler))
          .route("/categories", web::get().to(admin_handlers::categories_handler))
          .route("/images", web::post().to(admin_handlers::upload_image_handler))
          .route("/images/{public_id}", web::delete().to(admin_handlers::delete_image_handler))
          .route("/images/{public_id}/url", web::get().to(admin_handlers::image_url_handler)),
      ),
  );
}
