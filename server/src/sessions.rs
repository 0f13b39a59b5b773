// server/src/sessions.rs

use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use storefront::Cart;

/// One cart per shopper session, shared across workers.
///
/// The lock is blocking: closures passed to [`SessionCarts::with_cart`] must not
/// await, and no guard escapes this type.
#[derive(Clone, Default)]
pub struct SessionCarts {
  carts: Arc<RwLock<HashMap<String, Cart>>>,
  checkouts: Arc<Mutex<HashSet<String>>>,
}

impl SessionCarts {
  pub fn new() -> Self {
    Self::default()
  }

  /// Runs `f` against the session's cart, creating an empty cart on first use.
  pub fn with_cart<R>(&self, session_id: &str, f: impl FnOnce(&mut Cart) -> R) -> R {
    let mut guard = self.carts.write();
    f(guard.entry(session_id.to_string()).or_default())
  }

  /// A copy of the session's cart (empty if the session has none yet).
  pub fn snapshot(&self, session_id: &str) -> Cart {
    self.carts.read().get(session_id).cloned().unwrap_or_default()
  }

  /// Marks a checkout as running for the session. `None` while another one is.
  pub fn begin_checkout(&self, session_id: &str) -> Option<CheckoutGuard> {
    if !self.checkouts.lock().insert(session_id.to_string()) {
      return None;
    }
    Some(CheckoutGuard {
      checkouts: Arc::clone(&self.checkouts),
      session_id: session_id.to_string(),
    })
  }
}

/// Releases the session's checkout slot when dropped.
pub struct CheckoutGuard {
  checkouts: Arc<Mutex<HashSet<String>>>,
  session_id: String,
}

impl Drop for CheckoutGuard {
  fn drop(&mut self) {
    self.checkouts.lock().remove(&self.session_id);
  }
}
