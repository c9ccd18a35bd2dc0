use crate::flatten::types::NamedArg;
use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::io::Write;

/// Layout of one written record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgLayout {
    /// A JSON object mapping names to values, in parameter order.
    /// Records with a repeated name cannot be written in this layout.
    #[default]
    Object,
    /// A JSON array of `{"name": ..., "value": ...}` pairs
    Pairs,
}

/// Writes flattened records as JSON Lines, one record per line
pub struct ArgWriter<W: Write> {
    writer: W,
    layout: ArgLayout,
}

impl<W: Write> ArgWriter<W> {
    pub fn new(writer: W, layout: ArgLayout) -> Self {
        ArgWriter { writer, layout }
    }

    pub fn write_args(&mut self, args: &[NamedArg]) -> Result<()> {
        let line = match self.layout {
            ArgLayout::Object => {
                let mut object = Map::with_capacity(args.len());
                for arg in args {
                    if object.contains_key(&arg.name) {
                        bail!(
                            "Parameter '{}' appears more than once; use the pairs layout to keep every value",
                            arg.name
                        );
                    }
                    let value = serde_json::to_value(&arg.value)
                        .context("Failed to serialize parameter value")?;
                    object.insert(arg.name.clone(), value);
                }
                serde_json::to_string(&Value::Object(object))
            }
            ArgLayout::Pairs => serde_json::to_string(args),
        }
        .context("Failed to serialize parameters")?;

        writeln!(self.writer, "{}", line).context("Failed to write parameters")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush writer")
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::types::named;

    fn args() -> Vec<NamedArg> {
        vec![named("surname", "Doe"), named("child_age", 7_i64)]
    }

    #[test]
    fn test_object_layout() {
        let mut writer = ArgWriter::new(Vec::new(), ArgLayout::Object);
        writer.write_args(&args()).unwrap();
        writer.write_args(&[]).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "{\"surname\":\"Doe\",\"child_age\":7}\n{}\n");
    }

    #[test]
    fn test_object_layout_rejects_repeated_names() {
        let repeated = vec![named("given_name", "John"), named("given_name", "Jane")];
        let mut writer = ArgWriter::new(Vec::new(), ArgLayout::Object);

        let err = writer.write_args(&repeated).unwrap_err();
        assert!(err.to_string().contains("'given_name'"));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_pairs_layout_keeps_repeated_names() {
        let repeated = vec![named("given_name", "John"), named("given_name", "Jane")];
        let mut writer = ArgWriter::new(Vec::new(), ArgLayout::Pairs);
        writer.write_args(&repeated).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            output,
            "[{\"name\":\"given_name\",\"value\":\"John\"},{\"name\":\"given_name\",\"value\":\"Jane\"}]\n"
        );
    }

    #[test]
    fn test_pairs_layout() {
        let mut writer = ArgWriter::new(Vec::new(), ArgLayout::Pairs);
        writer.write_args(&args()).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            output,
            "[{\"name\":\"surname\",\"value\":\"Doe\"},{\"name\":\"child_age\",\"value\":7}]\n"
        );
    }
}
