// core/src/models/category.rs

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
  pub id: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub icon: &'static str,
}

/// The fixed category set. Products reference these by `id`.
pub const CATEGORIES: [Category; 10] = [
  Category {
    id: "engine-parts",
    name: "Engine Parts",
    description: "Filters, belts, gaskets and internal engine components",
    icon: "cog",
  },
  Category {
    id: "brake-system",
    name: "Brake System",
    description: "Pads, rotors, calipers and brake fluid",
    icon: "disc",
  },
  Category {
    id: "suspension",
    name: "Suspension",
    description: "Shocks, struts, springs and control arms",
    icon: "car",
  },
  Category {
    id: "electrical",
    name: "Electrical",
    description: "Batteries, alternators, starters and lighting",
    icon: "zap",
  },
  Category {
    id: "exhaust-system",
    name: "Exhaust System",
    description: "Mufflers, catalytic converters and exhaust pipes",
    icon: "wind",
  },
  Category {
    id: "transmission",
    name: "Transmission",
    description: "Clutches, transmission fluid and drivetrain parts",
    icon: "settings",
  },
  Category {
    id: "cooling-system",
    name: "Cooling System",
    description: "Radiators, water pumps, thermostats and hoses",
    icon: "thermometer",
  },
  Category {
    id: "interior",
    name: "Interior",
    description: "Seat covers, floor mats and cabin accessories",
    icon: "armchair",
  },
  Category {
    id: "exterior",
    name: "Exterior",
    description: "Mirrors, wipers, body panels and trim",
    icon: "sparkles",
  },
  Category {
    id: "tools-equipment",
    name: "Tools & Equipment",
    description: "Jacks, wrenches, diagnostics and shop tools",
    icon: "wrench",
  },
];

pub fn find_category(id: &str) -> Option<&'static Category> {
  CATEGORIES.iter().find(|c| c.id == id)
}
