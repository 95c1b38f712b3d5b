use std::io::{self, Write};

use serde::Serialize;

use crate::error::CliError;

/// Writes one JSON document to stdout.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

/// Newline-delimited JSON writer, flushed after every record.
pub struct NdjsonWriter<W: Write> {
    inner: W,
}

impl NdjsonWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { inner: io::stdout() }
    }
}

impl<W: Write> NdjsonWriter<W> {
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), CliError> {
        serde_json::to_writer(&mut self.inner, record)?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndjson_writes_one_line_per_record() {
        let mut writer = NdjsonWriter { inner: Vec::new() };
        writer.write(&serde_json::json!({"n": 1})).expect("write");
        writer.write(&serde_json::json!({"n": 2})).expect("write");

        let text = String::from_utf8(writer.inner).expect("utf8");
        assert_eq!(text, "{\"n\":1}\n{\"n\":2}\n");
    }
}
