//! Canonical Naming for C4-style Architecture Models
//!
//! This crate generates deterministic, hierarchical, human-readable canonical
//! names for architecture model elements (people, software systems,
//! containers, components, deployment nodes, infrastructure nodes, and
//! deployed instances). A canonical name encodes an element's kind and its
//! position in the model hierarchy, making it a stable identifier for
//! lookups, diffing, and cross-references. It includes:
//!
//! - **Model**: element types, typed handles, and the read-only arena they
//!   live in ([`model`] module)
//! - **Canonical names**: generation, sanitization, and parsing
//!   ([`canonical`] module)
//! - **Errors**: malformed-hierarchy and parse failures ([`error`] module)
//!
//! Name generation is a stateless pure transform over an already-built
//! model: it reads hierarchy links, never mutates, and is safe to call from
//! multiple threads.
//!
//! # Examples
//!
//! ```
//! use canon_core::{canonical_name, model::{ElementRef, Model}};
//!
//! let mut model = Model::new();
//! let system = model.add_software_system("Shop");
//! let api = model.add_container("API", system);
//! let live = model.add_deployment_node("Server1", "Live", None);
//! let instance = model.add_container_instance(api, live, 1);
//!
//! let name = canonical_name(&model, ElementRef::ContainerInstance(instance)).unwrap();
//! assert_eq!(name.as_str(), "ContainerInstance://Live/Server1/Shop.API[1]");
//! ```

pub mod canonical;
pub mod error;
pub mod model;

pub use canonical::{CanonicalName, canonical_name};
pub use error::{NamingError, ParseNameError};
pub use model::{ElementKind, ElementRef, Model};
