// src/lib.rs

//! Storefront: the state and persistence core of an auto-parts shop.
//!
//! The crate provides:
//!  - A [`Cart`] state container with quantity aggregation and derived totals.
//!  - Catalog filtering and stable sorting over in-memory product lists.
//!  - A [`ProductService`] façade over any [`DocumentStore`], with soft deletion.
//!  - An [`ImageUploader`] for the hosted image service and its delivery URLs.
//!  - [`LocalStorage`]-backed order and contact-message recording for the simulated checkout.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod images;
pub mod local_storage;
pub mod models;
pub mod products;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::cart::{Cart, OrderSummary, PricingPolicy};
pub use crate::catalog::{
  admin_filter, related_products, CatalogQuery, CategoryFilter, InventoryStats, SortKey,
};
pub use crate::checkout::{order_history, place_order, submit_contact, validate_customer};
pub use crate::error::{StorefrontError, StorefrontResult};
pub use crate::images::{validate_image, ImageFile, ImageHostConfig, ImageUploader, TransformOptions, UploadedImage};
pub use crate::local_storage::{LocalStorage, CONTACT_SUBMISSIONS_KEY, ORDERS_KEY};
pub use crate::models::{
  find_category, CartItem, Category, ContactForm, ContactSubmission, CustomerInfo, Order, OrderStatus, Product,
  ProductDraft, ProductPatch, CATEGORIES,
};
pub use crate::products::{ProductService, PRODUCTS_COLLECTION};
pub use crate::store::{Direction, Document, DocumentBody, DocumentQuery, DocumentStore, InMemoryDocumentStore};
