// core/src/models/mod.rs

//! Data structures shared by the cart, the catalog and the persistence layer.

pub mod cart_item;
pub mod category;
pub mod contact;
pub mod order;
pub mod product;

pub use cart_item::CartItem;
pub use category::{find_category, Category, CATEGORIES};
pub use contact::{ContactForm, ContactSubmission};
pub use order::{CustomerInfo, Order, OrderStatus};
pub use product::{Product, ProductDraft, ProductPatch};
