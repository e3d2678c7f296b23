/// Data layer: record model, file interchange and the per-stage transforms.
///
/// Architecture:
/// ```text
///   REST API
///      │
///      ▼
///   ┌──────────┐
///   │  fetch    │  GET → Vec<Value>
///   └──────────┘
///      │
///      ▼
///   ┌──────────┐
///   │  loader   │  JSON array ⇄ Vec<Country>
///   └──────────┘
///      │
///      ▼
///   ┌──────────┐   ┌──────────┐
///   │  clean    │ → │  enrich   │  rename / drop / derive density
///   └──────────┘   └──────────┘
///      │
///      ▼
///   ┌──────────┐
///   │  filter   │  region predicates → visible indices (viewer)
///   └──────────┘
/// ```

pub mod clean;
pub mod enrich;
pub mod fetch;
pub mod filter;
pub mod loader;
pub mod model;
