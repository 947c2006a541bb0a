// src/output.rs

//! Result output in text, CSV or JSON.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::Person;

/// Output target meaning standard output.
pub const STDOUT: &str = "stdout";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

impl OutputFormat {
    /// Resolve the format: explicit choice first, then the target's
    /// extension, then text.
    pub fn resolve(explicit: Option<&str>, target: &str) -> Result<Self> {
        if let Some(name) = explicit {
            return name.parse();
        }

        let extension = Path::new(target)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        Ok(match extension.as_deref() {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            _ => Self::Text,
        })
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!("Unsupported format \"{other}\""))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Csv => "csv",
            Self::Json => "json",
        })
    }
}

/// Streams people to a writer; JSON is buffered until [`OutputSink::finish`].
pub struct OutputSink {
    writer: Box<dyn Write + Send>,
    format: OutputFormat,
    buffered: Vec<Person>,
    written: usize,
}

impl OutputSink {
    pub fn new(writer: Box<dyn Write + Send>, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            buffered: Vec::new(),
            written: 0,
        }
    }

    /// Open `target`: `"stdout"` or a file path (created or truncated).
    pub fn open(target: &str, format: OutputFormat) -> Result<Self> {
        let writer: Box<dyn Write + Send> = if target == STDOUT {
            Box::new(io::stdout())
        } else {
            Box::new(BufWriter::new(File::create(target)?))
        };
        Ok(Self::new(writer, format))
    }

    /// People emitted so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write(&mut self, person: &Person) -> Result<()> {
        match self.format {
            OutputFormat::Text => write!(
                self.writer,
                "{} ({})\n{}\n{} {}\n\n",
                person.fullname, person.login, person.email, person.block, person.room
            )?,
            OutputFormat::Csv => writeln!(
                self.writer,
                "{},{},{},{},{}",
                person.fullname, person.login, person.email, person.block, person.room
            )?,
            OutputFormat::Json => self.buffered.push(person.clone()),
        }
        self.written += 1;
        Ok(())
    }

    /// Write buffered JSON and flush.
    pub fn finish(mut self) -> Result<()> {
        if self.format == OutputFormat::Json {
            serde_json::to_writer(&mut self.writer, &self.buffered)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Writer handle whose contents the test can read back.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn person() -> Person {
        Person {
            number: 1,
            fullname: "Jan Novák".to_string(),
            block: "B02".to_string(),
            room: "218".to_string(),
            login: "xnovak00".to_string(),
            email: "xnovak00@vut.cz".to_string(),
        }
    }

    fn render(format: OutputFormat) -> String {
        let capture = Capture::default();
        let mut sink = OutputSink::new(Box::new(capture.clone()), format);
        sink.write(&person()).unwrap();
        assert_eq!(sink.written(), 1);
        sink.finish().unwrap();
        capture.text()
    }

    #[test]
    fn test_text_format() {
        assert_eq!(
            render(OutputFormat::Text),
            "Jan Novák (xnovak00)\nxnovak00@vut.cz\nB02 218\n\n"
        );
    }

    #[test]
    fn test_csv_format() {
        assert_eq!(
            render(OutputFormat::Csv),
            "Jan Novák,xnovak00,xnovak00@vut.cz,B02,218\n"
        );
    }

    #[test]
    fn test_json_written_on_finish() {
        let parsed: Vec<Person> = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(parsed, vec![person()]);
    }

    #[test]
    fn test_empty_json_is_array() {
        let capture = Capture::default();
        OutputSink::new(Box::new(capture.clone()), OutputFormat::Json)
            .finish()
            .unwrap();
        assert_eq!(capture.text(), "[]");
    }

    #[test]
    fn test_resolve_format() {
        assert_eq!(OutputFormat::resolve(None, STDOUT).unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::resolve(None, "out.CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::resolve(None, "db.json").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::resolve(Some("JSON"), "out.csv").unwrap(),
            OutputFormat::Json
        );
        assert!(OutputFormat::resolve(Some("xml"), STDOUT).is_err());
    }

    #[test]
    fn test_open_file_target() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("people.csv");
        let target = path.to_str().unwrap();

        let mut sink = OutputSink::open(target, OutputFormat::Csv).unwrap();
        sink.write(&person()).unwrap();
        sink.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Jan Novák,xnovak00"));
    }
}
