//! `pandoc` subprocess converter.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::trace;

use crate::error::ConvertError;
use crate::format::Format;
use crate::node::{Block, Document, Inline};

use super::TextConverter;

/// Runs the `pandoc` executable once per fragment.
#[derive(Debug, Clone)]
pub struct Pandoc {
    program: String,
    extra_args: Vec<String>,
}

impl Default for Pandoc {
    fn default() -> Self {
        Self {
            program: "pandoc".to_owned(),
            extra_args: vec!["--biblatex".to_owned()],
        }
    }
}

impl Pandoc {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Replace the arguments passed after `-f`/`-t`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Feed `input` to `pandoc -f <from> -t <to>` and return its trimmed output.
    fn run(&self, from: &str, to: &Format, input: &[u8]) -> Result<String, ConvertError> {
        trace!(program = %self.program, from, to = %to, bytes = input.len(), "convert");

        let mut child = Command::new(&self.program)
            .args(["-f", from, "-t", to.as_str()])
            .args(&self.extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ConvertError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Write on a separate thread so a full stdout pipe cannot block us.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || -> std::io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(input)?;
                }
                Ok(())
            });
            let output = child.wait_with_output();
            let written = writer.join().unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (output, written)
        });
        let output = output?;

        // A failing converter may close stdin early; its stderr says why.
        if !output.status.success() {
            return Err(ConvertError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        written?;

        let mut text = String::from_utf8(output.stdout)?;
        text.truncate(text.trim_end().len());
        trace!(output = %text, "converted");
        Ok(text)
    }
}

impl TextConverter for Pandoc {
    fn markdown(&self, src: &str, format: &Format) -> Result<String, ConvertError> {
        if src.trim().is_empty() {
            return Ok(String::new());
        }
        self.run("markdown", format, src.as_bytes())
    }

    fn inlines(&self, inlines: &[Inline], format: &Format) -> Result<String, ConvertError> {
        if inlines.is_empty() {
            return Ok(String::new());
        }
        let doc = Document::new(vec![Block::Plain(inlines.to_vec())]);
        let json = serde_json::to_vec(&doc)?;
        self.run("json", format, &json)
    }
}
