// server/src/seed.rs

//! Sample catalog for local development, inserted only into an empty store.

use std::collections::BTreeMap;
use storefront::{ProductDraft, ProductService};
use tracing::{info, instrument};

use crate::errors::Result;

#[allow(clippy::too_many_arguments)]
fn draft(
  name: &str,
  brand: &str,
  price: f64,
  original_price: Option<f64>,
  category: &str,
  stock_count: u32,
  description: &str,
  specifications: &[(&str, &str)],
  features: &[&str],
) -> ProductDraft {
  ProductDraft {
    name: name.to_string(),
    brand: brand.to_string(),
    price,
    original_price,
    description: description.to_string(),
    image: String::new(),
    image_public_id: None,
    category: category.to_string(),
    stock_count,
    specifications: specifications
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<BTreeMap<_, _>>(),
    features: features.iter().map(|f| f.to_string()).collect(),
  }
}

pub fn sample_products() -> Vec<ProductDraft> {
  vec![
    draft(
      "Ceramic Brake Pad Set",
      "StopTech",
      54.99,
      Some(69.99),
      "brake-system",
      42,
      "Low-dust ceramic front brake pads for quiet, fade-resistant stopping.",
      &[("Position", "Front"), ("Material", "Ceramic")],
      &["Low dust", "Noise-dampening shims"],
    ),
    draft(
      "Drilled Brake Rotor",
      "PowerStop",
      89.5,
      None,
      "brake-system",
      12,
      "Cross-drilled and slotted rotor with zinc plating.",
      &[("Diameter", "320 mm")],
      &["Corrosion resistant"],
    ),
    draft(
      "Iridium Spark Plug (4-pack)",
      "NGK",
      32.0,
      None,
      "engine-parts",
      80,
      "Fine-wire iridium plugs for improved ignition and service life.",
      &[("Gap", "0.8 mm")],
      &["Pre-gapped"],
    ),
    draft(
      "High-Flow Oil Filter",
      "Bosch",
      11.49,
      None,
      "engine-parts",
      0,
      "Synthetic media oil filter with anti-drainback valve.",
      &[],
      &[],
    ),
    draft(
      "Gas Shock Absorber",
      "Monroe",
      74.25,
      Some(82.0),
      "suspension",
      20,
      "Twin-tube gas-charged shock for a controlled ride.",
      &[("Position", "Rear")],
      &["Lifetime warranty"],
    ),
    draft(
      "AGM Car Battery 70Ah",
      "Varta",
      189.0,
      None,
      "electrical",
      7,
      "Maintenance-free AGM battery suited to start-stop systems.",
      &[("Capacity", "70 Ah"), ("Cold cranking", "760 A")],
      &["Start-stop ready"],
    ),
    draft(
      "Stainless Cat-Back Exhaust",
      "Borla",
      429.0,
      None,
      "exhaust-system",
      3,
      "Mandrel-bent stainless steel cat-back exhaust system.",
      &[("Material", "T-304 stainless")],
      &["Deep tone", "Bolt-on install"],
    ),
    draft(
      "Aluminium Radiator",
      "Mishimoto",
      249.99,
      Some(279.99),
      "cooling-system",
      9,
      "Dual-core aluminium radiator for improved cooling capacity.",
      &[],
      &["TIG welded"],
    ),
    draft(
      "3-Ton Floor Jack",
      "Arcan",
      139.0,
      None,
      "tools-equipment",
      15,
      "Low-profile hydraulic floor jack with quick-lift pedal.",
      &[("Capacity", "3 t")],
      &[],
    ),
  ]
}

/// Inserts [`sample_products`] when the store holds no active products.
/// Returns how many products were created.
#[instrument(name = "seed::products", skip(products))]
pub async fn seed_products(products: &ProductService) -> Result<usize> {
  if !products.list_active().await?.is_empty() {
    info!("Product collection already populated; skipping seed.");
    return Ok(0);
  }
  let drafts = sample_products();
  let count = drafts.len();
  for draft in drafts {
    products.create(draft).await?;
  }
  info!(count, "Seeded sample products.");
  Ok(count)
}
