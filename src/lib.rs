//! # namedargs - Records to Named Query Parameters
//!
//! Flattens nested records into an ordered list of named parameters for
//! parameterized queries. Names come from field identifiers (snake cased by
//! default) or per-field tags, and nested records are prefixed with their
//! parent's name.
//!
//! ## Quick Start
//!
//! ```rust
//! use namedargs::{named, Flattener, Record};
//!
//! #[derive(Record)]
//! struct Person {
//!     given_name: String,
//!     #[tag(db = "last_name")]
//!     surname: String,
//! }
//!
//! #[derive(Record)]
//! struct Parent {
//!     #[embed]
//!     person: Person,
//!     child: Person,
//! }
//!
//! # fn main() -> Result<(), namedargs::FlattenError> {
//! let parent = Parent {
//!     person: Person { given_name: "John".into(), surname: "Doe".into() },
//!     child: Person { given_name: "Jane".into(), surname: "Doe".into() },
//! };
//!
//! let args = Flattener::default().from_struct(&parent)?;
//! assert_eq!(
//!     args,
//!     vec![
//!         named("given_name", "John"),
//!         named("last_name", "Doe"),
//!         named("child_given_name", "Jane"),
//!         named("child_last_name", "Doe"),
//!     ]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Tags
//!
//! | Tag                 | Effect                                        |
//! |---------------------|-----------------------------------------------|
//! | `db = "name"`       | Use `name` instead of the naming function     |
//! | `db = "-"`          | Skip the field                                |
//! | `db = ".,asis"`     | Default name, pass a record through unflattened |
//! | `#[embed]`          | Promote the member's fields without a prefix  |

// Lets `#[derive(Record)]` expand to `::namedargs::...` inside this crate.
extern crate self as namedargs;

pub mod error;
pub mod flatten;
pub mod naming;
pub mod reflect;
pub mod value;

// Re-export commonly used types for convenience
pub use error::{FlattenError, FlattenResult};
pub use flatten::{named, ArgLayout, ArgWriter, FlattenConfig, Flattener, NamedArg};
pub use naming::NamingFn;
pub use reflect::{Field, Reflect, Shape};
pub use value::Value;

#[cfg(feature = "derive")]
pub use namedargs_derive::Record;

/// Flatten a record with the default configuration.
pub fn from_struct(src: &dyn Reflect) -> FlattenResult<Vec<NamedArg>> {
    Flattener::default().from_struct(src)
}

#[cfg(all(test, feature = "derive"))]
mod tests {
    use super::*;

    #[test]
    fn test_basic_flattening() {
        #[derive(Record)]
        struct Order {
            id: u64,
            #[tag(db = "-")]
            internal_note: String,
            total: f64,
        }

        let order = Order {
            id: 7,
            internal_note: "fragile".to_string(),
            total: 12.5,
        };

        let args = from_struct(&order).unwrap();
        assert_eq!(args, vec![named("id", 7_u64), named("total", 12.5)]);
    }
}
