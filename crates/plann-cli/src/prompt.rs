//! Yes/no questions on the terminal.

use anyhow::{Context, Result};
use dialoguer::Confirm;
use plann_core::Answer;

/// Asks `question` interactively, defaulting to no.
///
/// Escape or `q` answers no. Fails when stdin or stderr is not a terminal.
pub fn ask(question: &str) -> Result<Answer> {
    let answer = Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact_opt()
        .context("Failed to read confirmation; pass --yes to answer without a terminal")?;
    Ok(answer.map_or(Answer::No, Answer::from))
}

/// Answers yes without asking when `assume_yes` is set.
pub fn confirm(question: &str, assume_yes: bool) -> Result<Answer> {
    if assume_yes {
        Ok(Answer::Yes)
    } else {
        ask(question)
    }
}
