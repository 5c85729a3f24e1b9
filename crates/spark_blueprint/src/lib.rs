//! Blueprint files: declarative entity templates.
//!
//! A blueprint file holds any number of `<object>` blocks. Each names a
//! blueprint, lists the components to attach with their raw string
//! arguments, and lists the events the entity should listen for.
//!
//! ```
//! use spark_blueprint::BlueprintRegistry;
//!
//! let mut registry = BlueprintRegistry::new();
//! registry
//!     .load_source(
//!         r#"
//! <object Name="Sword">
//!     <component ComponentName="DamageComponent" rolls="1" sides="6">
//!     <listen Name="EVENT_DEAL_DAMAGE">
//! </object>
//! "#,
//!     )
//!     .unwrap();
//!
//! let sword = registry.get("Sword").unwrap();
//! assert_eq!(sword.components[0].argument("sides"), Some("6"));
//! assert_eq!(sword.listen_for_events, vec!["EVENT_DEAL_DAMAGE"]);
//! ```

pub mod blueprint;
pub mod error;
pub mod parser;
pub mod registry;
pub mod scanner;

pub use blueprint::{Blueprint, BlueprintComponent};
pub use error::{BlueprintError, ParseError, ParseErrorKind};
pub use parser::Parser;
pub use registry::BlueprintRegistry;
