//! Interactive selection.

use std::io::{self, BufRead, Write};

use color_print::cformat;

use crate::git::ResolveError;

/// Ask the user to pick one option.
///
/// Implementations return the chosen option verbatim, or
/// [`ResolveError::PromptCancelled`] when the user backs out.
pub trait Chooser {
    fn select_one(&self, message: &str, options: &[String]) -> anyhow::Result<String>;
}

/// Numbered list on stderr, answer read from stdin.
///
/// ```text
/// ? Which should be the base repository (used for e.g. querying issues) for this directory?
///   1) gitlab-org/cli
///   2) me/cli
/// Select [1-2]:
/// ```
///
/// An empty answer or end of input cancels; anything that isn't a listed
/// number asks again.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn select_one(&self, message: &str, options: &[String]) -> anyhow::Result<String> {
        let stdin = io::stdin();
        let mut stderr = anstream::stderr();
        select_from(&mut stdin.lock(), &mut stderr, message, options)
    }
}

fn select_from(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
    options: &[String],
) -> anyhow::Result<String> {
    writeln!(output, "{}", cformat!("<cyan>?</> <bold>{}</>", message))?;
    for (i, option) in options.iter().enumerate() {
        writeln!(output, "  {}) {option}", i + 1)?;
    }

    loop {
        write!(output, "{}", cformat!("Select <bold>[1-{}]</>: ", options.len()))?;
        output.flush()?;

        let mut response = String::new();
        if input.read_line(&mut response)? == 0 {
            return Err(ResolveError::PromptCancelled.into());
        }
        let response = response.trim();
        if response.is_empty() {
            return Err(ResolveError::PromptCancelled.into());
        }

        match response.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1].clone()),
            _ => writeln!(
                output,
                "{}",
                cformat!("<yellow>Enter a number between 1 and {}</>", options.len())
            )?,
        }
    }
}
