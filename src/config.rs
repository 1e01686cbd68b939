//! Run configuration.
//!
//! A [`RunConfig`] tells the pipeline which file to read, which citation
//! style to render and which export format to write. It is supplied by a
//! [`ConfigProvider`]: the CLI builds one from its arguments, and
//! [`InteractivePrompt`] asks for each value through numbered menus.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::output::ExportFormat;
use crate::processor::RecordMode;
use crate::style::CitationStyle;

/// Errors that can occur while gathering the run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no input file given")]
    MissingInput,

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("prompt I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Everything a single run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub style: CitationStyle,
    pub format: ExportFormat,
    pub mode: RecordMode,
}

/// A source of run configuration.
pub trait ConfigProvider {
    fn provide(&mut self) -> Result<RunConfig, ConfigError>;
}

impl ConfigProvider for RunConfig {
    fn provide(&mut self) -> Result<RunConfig, ConfigError> {
        Ok(self.clone())
    }
}

/// Menu entries: (answer, label, style name).
const STYLE_MENU: &[(&str, &str, &str)] = &[
    ("1", "BibTeX", "bibtex"),
    ("2", "ABNT", "abnt"),
    ("3", "APA", "apa"),
    ("4", "Custom", "custom"),
];

/// Menu entries: (answer, label, format name).
const FORMAT_MENU: &[(&str, &str, &str)] = &[
    ("1", "TXT", "txt"),
    ("2", "JSON", "json"),
    ("3", "YAML", "yaml"),
    ("4", "BIB", "bib"),
];

/// Asks for the input file, style and format on a line-oriented terminal.
///
/// Unrecognized menu answers fall back to `bibtex` and `txt`.
pub struct InteractivePrompt<R, W> {
    input: R,
    output: W,
    mode: RecordMode,
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            mode: RecordMode::Legacy,
        }
    }

    /// Sets the record mode used for structured exports.
    pub fn with_mode(mut self, mode: RecordMode) -> Self {
        self.mode = mode;
        self
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    fn choose(
        &mut self,
        title: &str,
        question: &str,
        menu: &[(&str, &str, &'static str)],
    ) -> io::Result<&'static str> {
        writeln!(self.output, "\n{}", title)?;
        for (key, label, _) in menu {
            writeln!(self.output, "{}. {}", key, label)?;
        }
        let answer = self.ask(question)?;
        let default = menu[0].2;
        Ok(menu
            .iter()
            .find(|(key, _, _)| *key == answer)
            .map_or(default, |(_, _, name)| *name))
    }
}

impl<R: BufRead, W: Write> ConfigProvider for InteractivePrompt<R, W> {
    fn provide(&mut self) -> Result<RunConfig, ConfigError> {
        writeln!(self.output, "\n=== Gerador de Referências Acadêmicas ===\n")?;

        let path = self.ask("Nome do arquivo de entrada (.txt): ")?;
        if path.is_empty() {
            return Err(ConfigError::MissingInput);
        }
        let input = PathBuf::from(path);
        if !input.exists() {
            return Err(ConfigError::InputNotFound(input));
        }

        let style = self.choose("Escolha o estilo:", "Digite o número do estilo: ", STYLE_MENU)?;
        let format = self.choose(
            "Formato de exportação:",
            "Digite o número do formato: ",
            FORMAT_MENU,
        )?;

        Ok(RunConfig {
            input,
            style: CitationStyle::from_name(style),
            format: ExportFormat::from_name(format),
            mode: self.mode,
        })
    }
}
