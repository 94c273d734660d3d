//! pascd - command-line driver for the Pascal front-end.
//!
//! This is the thin, out-of-scope-per-spec collaborator around
//! `pasc-lex`/`pasc-par`: load a file, run the scanner and parser over it,
//! and either dump the resulting AST or report the first parse error.
//! Semantic analysis, code generation, and diagnostic recovery are not
//! this crate's job - the parser aborts on the first error and this
//! driver just renders that one error and exits non-zero.

use std::path::PathBuf;

use pasc_lex::Lexer;
use pasc_par::Parser;
use pasc_util::diagnostic::{DiagnosticCode, Handler};
use pasc_util::span::{SourceMap, Span};

/// What the driver should print for a source file that parses
/// successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitKind {
    /// The parsed AST, in [`pasc_par::Node::dump`] format.
    Ast,
    /// The raw token stream, one token per line.
    Tokens,
}

impl Default for EmitKind {
    fn default() -> Self {
        EmitKind::Ast
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_file: PathBuf,
    pub emit: EmitKind,
}

impl Config {
    /// Parses `program_name file [--emit-tokens|--emit-ast]`-shaped
    /// arguments, i.e. `std::env::args()` verbatim.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, DriverError> {
        let mut input_file = None;
        let mut emit = EmitKind::Ast;

        for arg in args.into_iter().skip(1) {
            match arg.as_str() {
                "--emit-tokens" => emit = EmitKind::Tokens,
                "--emit-ast" => emit = EmitKind::Ast,
                other if input_file.is_none() => input_file = Some(PathBuf::from(other)),
                other => {
                    return Err(DriverError::InvalidArguments(format!(
                        "unexpected argument '{other}'"
                    )))
                }
            }
        }

        let input_file = input_file.ok_or_else(|| {
            DriverError::InvalidArguments("usage: pascd <file.pas> [--emit-tokens]".into())
        })?;

        Ok(Self { input_file, emit })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("could not read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("parse failed")]
    ParseFailed,
}

/// One driver invocation: its configuration, the file it loaded, and the
/// diagnostic handler the parse error (if any) was reported through.
pub struct Session {
    pub config: Config,
    pub sources: SourceMap,
    pub diagnostics: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sources: SourceMap::new(),
            diagnostics: Handler::new(),
        }
    }

    /// Loads the configured file, scans and parses it, and writes the
    /// result (AST dump, token list, or a formatted error) to `out`.
    /// Returns `Err` only for the error case, so `main` can map it to a
    /// nonzero exit code without re-deriving the message.
    pub fn run(&mut self, out: &mut impl std::io::Write) -> Result<(), DriverError> {
        let content = std::fs::read_to_string(&self.config.input_file)
            .map_err(|e| DriverError::Io(self.config.input_file.clone(), e))?;
        let file_name = self.config.input_file.display().to_string();
        self.sources.add_file(file_name, content.clone());

        match self.config.emit {
            EmitKind::Tokens => self.dump_tokens(&content, out),
            EmitKind::Ast => self.dump_ast(&content, out),
        }
    }

    fn dump_tokens(&self, content: &str, out: &mut impl std::io::Write) -> Result<(), DriverError> {
        let mut lexer = Lexer::new(content.as_bytes());
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == pasc_lex::TokenKind::Eof;
            let _ = writeln!(out, "{} Line: {}, Col: {}", token.describe(), token.line, token.column);
            if is_eof {
                break;
            }
        }
        Ok(())
    }

    fn dump_ast(&self, content: &str, out: &mut impl std::io::Write) -> Result<(), DriverError> {
        let mut parser = Parser::from_source(content.as_bytes());
        match parser.parse_program() {
            Ok(node) => {
                let _ = write!(out, "{}", node.dump());
                Ok(())
            }
            Err(err) => {
                self.diagnostics
                    .build_error(
                        Span::new(0, 0, err.token.line, err.token.column),
                        err.message.clone(),
                    )
                    .code(DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN)
                    .emit(&self.diagnostics);
                let _ = writeln!(
                    out,
                    "Error: {}. {}\n Line: {}, Col: {}",
                    err.message,
                    err.token.describe(),
                    err.token.line,
                    err.token.column
                );
                Err(DriverError::ParseFailed)
            }
        }
    }
}

/// Parses CLI args, runs a [`Session`] against stdout, and maps the
/// result to a process exit code - `main.rs`'s whole job.
pub fn main() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args())?;
    let mut session = Session::new(config);
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match session.run(&mut handle) {
        Ok(()) => Ok(()),
        Err(DriverError::ParseFailed) => std::process::exit(1),
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_input_file_and_optional_flag() {
        let config = Config::from_args(
            ["pascd", "prog.pas", "--emit-tokens"]
                .iter()
                .map(|s| s.to_string()),
        )
        .unwrap();
        assert_eq!(config.input_file, PathBuf::from("prog.pas"));
        assert_eq!(config.emit, EmitKind::Tokens);
    }

    #[test]
    fn missing_file_argument_is_an_error() {
        let err = Config::from_args(["pascd"].iter().map(|s| s.to_string())).unwrap_err();
        assert!(matches!(err, DriverError::InvalidArguments(_)));
    }

    #[test]
    fn dumps_ast_for_a_well_formed_program() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pas");
        std::fs::write(&path, "program Empty;\nbegin\nend.\n").unwrap();

        let config = Config {
            input_file: path,
            emit: EmitKind::Ast,
        };
        let mut session = Session::new(config);
        let mut out = Vec::new();
        session.run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Binary Program"));
    }

    #[test]
    fn reports_parse_error_with_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.pas");
        std::fs::write(&path, "program Bad;\nbegin\n  x := ;\nend.\n").unwrap();

        let config = Config {
            input_file: path,
            emit: EmitKind::Ast,
        };
        let mut session = Session::new(config);
        let mut out = Vec::new();
        let result = session.run(&mut out);
        assert!(result.is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Error:"));
        assert!(text.contains("Line: 3"));
    }
}
