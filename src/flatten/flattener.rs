use crate::error::{FlattenError, FlattenResult};
use crate::flatten::tag::FieldTag;
use crate::flatten::types::{FlattenConfig, NamedArg};
use crate::flatten::visible::FieldWalker;
use crate::reflect::{Field, Reflect, Shape};
use std::collections::HashSet;

/// The core flattener that turns records into named query parameters
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    pub fn new(config: FlattenConfig) -> Self {
        Flattener { config }
    }

    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Flatten a record (or a reference to one) into named parameters.
    ///
    /// Parameters follow the declaration order of visible fields, with
    /// nested records spliced in place under their parent's name.
    pub fn from_struct(&self, src: &dyn Reflect) -> FlattenResult<Vec<NamedArg>> {
        let args = match src.shape() {
            Shape::Record(fields) => self.flatten_fields(fields, 0)?,
            Shape::NullRecord => return Err(FlattenError::null_record(src.type_name())),
            Shape::Scalar => return Err(FlattenError::invalid_input(src.type_name())),
        };

        if self.config.reject_duplicates {
            Self::check_unique(&args)?;
        }

        log::debug!("flattened {} into {} parameters", src.type_name(), args.len());
        Ok(args)
    }

    /// Recursively flatten the fields of one record
    fn flatten_fields(&self, fields: Vec<Field<'_>>, depth: usize) -> FlattenResult<Vec<NamedArg>> {
        if depth > self.config.max_depth {
            return Err(FlattenError::DepthExceeded {
                max_depth: self.config.max_depth,
            });
        }

        let visible = FieldWalker::new(depth, self.config.max_depth).visible_fields(fields)?;
        let mut args = Vec::with_capacity(visible.len());

        for field in visible {
            // Promoted fields were already listed by the walker
            if field.embedded {
                continue;
            }

            let (name, as_is) = match FieldTag::parse(field.tag(&self.config.tag_key)) {
                FieldTag::Skip => {
                    log::trace!("skipping field '{}'", field.ident);
                    continue;
                }
                FieldTag::Emit { name, as_is } => {
                    let name = match name {
                        Some(explicit) => explicit.to_string(),
                        None => (self.config.naming)(field.ident),
                    };
                    (name, as_is)
                }
            };

            match field.value.shape() {
                Shape::Record(nested) if !as_is => {
                    log::trace!("descending into '{}'", field.ident);
                    let nested_args = self.flatten_fields(nested, depth + 1)?;
                    args.extend(
                        nested_args
                            .into_iter()
                            .map(|arg| arg.prefixed(&name, &self.config.separator)),
                    );
                }
                Shape::NullRecord if !as_is => {
                    return Err(FlattenError::null_record(field.value.type_name()));
                }
                _ => args.push(NamedArg::new(name, field.value.to_value())),
            }
        }

        Ok(args)
    }

    fn check_unique(args: &[NamedArg]) -> FlattenResult<()> {
        let mut seen = HashSet::with_capacity(args.len());
        for arg in args {
            if !seen.insert(arg.name.as_str()) {
                return Err(FlattenError::DuplicateName {
                    name: arg.name.clone(),
                });
            }
        }
        Ok(())
    }
}
