//! Per-field tag parsing.
//!
//! A tag value is a name head optionally followed by comma separated
//! options: `first_name`, `.,asis`, `-`.

/// How a field should be emitted, as decided by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag<'t> {
    /// `-`: the field is not emitted and not descended into.
    Skip,
    /// `name` is `None` when the naming function should be applied.
    Emit { name: Option<&'t str>, as_is: bool },
}

impl<'t> FieldTag<'t> {
    /// Parse a tag value. A missing or empty tag keeps the defaults.
    ///
    /// An empty head (`",asis"`) is read like `"."` and applies the naming
    /// function; it never produces an empty parameter name.
    pub fn parse(tag: Option<&'t str>) -> Self {
        let tag = match tag {
            Some(tag) if !tag.is_empty() => tag,
            _ => {
                return FieldTag::Emit {
                    name: None,
                    as_is: false,
                }
            }
        };

        let mut parts = tag.split(',');
        let head = parts.next().unwrap_or_default();
        if head == "-" {
            return FieldTag::Skip;
        }

        let name = match head {
            "" | "." => None,
            explicit => Some(explicit),
        };
        let as_is = parts.any(|option| option == "asis");

        FieldTag::Emit { name, as_is }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_tags() {
        let default = FieldTag::Emit {
            name: None,
            as_is: false,
        };
        assert_eq!(FieldTag::parse(None), default);
        assert_eq!(FieldTag::parse(Some("")), default);
    }

    #[test]
    fn test_skip_short_circuits_options() {
        assert_eq!(FieldTag::parse(Some("-")), FieldTag::Skip);
        assert_eq!(FieldTag::parse(Some("-,asis")), FieldTag::Skip);
    }

    #[test]
    fn test_explicit_name() {
        assert_eq!(
            FieldTag::parse(Some("first_name")),
            FieldTag::Emit {
                name: Some("first_name"),
                as_is: false
            }
        );
        assert_eq!(
            FieldTag::parse(Some("created,asis")),
            FieldTag::Emit {
                name: Some("created"),
                as_is: true
            }
        );
    }

    #[test]
    fn test_dot_keeps_default_name() {
        assert_eq!(
            FieldTag::parse(Some(".,asis")),
            FieldTag::Emit {
                name: None,
                as_is: true
            }
        );
        assert_eq!(
            FieldTag::parse(Some(",asis")),
            FieldTag::Emit {
                name: None,
                as_is: true
            }
        );
        assert_eq!(
            FieldTag::parse(Some(".,omitempty")),
            FieldTag::Emit {
                name: None,
                as_is: false
            }
        );
    }
}
