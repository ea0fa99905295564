//! # tlcp-expand
//!
//! Turns a parsed `.meta.cfg` document into the concrete TLC configurations it
//! describes, and writes them to disk.
//!
//! Expansion
//!
//!     [engine::expand] walks the document tree and produces an ordered list of
//!     [ConfigVariant]s. Variants form a monoid under concatenation; sibling statements
//!     in a block combine by cross product and the options of a choice combine by sum.
//!     Each declared family expands the whole document independently and the family
//!     results are concatenated in declaration order.
//!
//! Materialization
//!
//!     [materialize::Materializer] lays the variants out under
//!     `<output root>/<base name>/<path...>/<name>.cfg`, after removing whatever a
//!     previous run left there. It can also write a companion TLA+ module per
//!     configuration and copy auxiliary modules next to them.

pub mod engine;
pub mod error;
pub mod families;
pub mod materialize;
pub mod variant;

pub use engine::expand;
pub use error::ExpandError;
pub use families::Families;
pub use materialize::{MaterializeError, MaterializeOptions, MaterializeReport, Materializer};
pub use variant::{ConfigVariant, Text};
