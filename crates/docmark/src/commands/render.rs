//! `docmark render` command implementation.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use docmark_renderer::{RenderContext, Token, TokenRenderer};

use crate::error::CliError;
use crate::output::Output;
use crate::tokenizer::JsonTokenizer;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Tokenized document to render (JSON token array).
    input: PathBuf,

    /// Document path for resolving relative references (default: the input path).
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Write the HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let text = std::fs::read_to_string(&self.input)?;
        let tokens: Vec<Token> = serde_json::from_str(&text)?;

        let context_file = self.source.unwrap_or_else(|| self.input.clone());
        output.info(&format!("Rendering {}", context_file.display()));

        let renderer = TokenRenderer::new(Arc::new(JsonTokenizer));
        let html = renderer.render_all(&tokens, &RenderContext::new(context_file));

        match self.output {
            Some(path) => {
                std::fs::write(&path, &html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                io::stdout().lock().write_all(html.as_bytes())?;
            }
        }
        Ok(())
    }
}
