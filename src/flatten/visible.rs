//! Visible field resolution.
//!
//! Embedded members are expanded in place: the member's own slot is listed,
//! followed immediately by its promoted fields. When two fields share an
//! identifier the shallower one wins, and two at the same level hide each
//! other.

use crate::error::{FlattenError, FlattenResult};
use crate::reflect::{Field, Shape};
use std::collections::HashMap;

struct Slot<'a> {
    field: Field<'a>,
    level: usize,
    hidden: bool,
}

/// Collects the visible fields of one record.
pub(crate) struct FieldWalker<'a> {
    slots: Vec<Slot<'a>>,
    by_ident: HashMap<&'a str, usize>,
    depth: usize,
    max_depth: usize,
}

impl<'a> FieldWalker<'a> {
    /// `depth` is the nesting depth of the record being walked.
    pub(crate) fn new(depth: usize, max_depth: usize) -> Self {
        FieldWalker {
            slots: Vec::new(),
            by_ident: HashMap::new(),
            depth,
            max_depth,
        }
    }

    /// Resolve the visible fields of a record, in declaration order.
    pub(crate) fn visible_fields(mut self, fields: Vec<Field<'a>>) -> FlattenResult<Vec<Field<'a>>> {
        self.walk(fields, 0)?;
        Ok(self
            .slots
            .into_iter()
            .filter(|slot| !slot.hidden)
            .map(|slot| slot.field)
            .collect())
    }

    fn walk(&mut self, fields: Vec<Field<'a>>, level: usize) -> FlattenResult<()> {
        for field in fields {
            let mut add = true;
            if let Some(&index) = self.by_ident.get(field.ident) {
                let old = &mut self.slots[index];
                if level == old.level {
                    old.hidden = true;
                    add = false;
                } else if level < old.level {
                    old.hidden = true;
                } else {
                    add = false;
                }
            }

            if add {
                self.by_ident.insert(field.ident, self.slots.len());
                self.slots.push(Slot {
                    field,
                    level,
                    hidden: false,
                });
            }

            if field.embedded {
                match field.value.shape() {
                    Shape::Record(promoted) => {
                        if self.depth + level + 1 > self.max_depth {
                            return Err(FlattenError::DepthExceeded {
                                max_depth: self.max_depth,
                            });
                        }
                        log::trace!("promoting {} fields of embedded '{}'", promoted.len(), field.ident);
                        self.walk(promoted, level + 1)?;
                    }
                    Shape::NullRecord => {
                        return Err(FlattenError::null_record(field.value.type_name()));
                    }
                    // Embedded scalars have nothing to promote
                    Shape::Scalar => {}
                }
            }
        }

        Ok(())
    }
}
