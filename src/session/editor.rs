//! Terminal-backed line editor.
//!
//! Wires the [`LineEditor`] seam to `dialoguer` for prompt and tab handling
//! and to `console` for cursor manipulation. Word boundaries for completion
//! are whitespace only, which keeps a leading '@' attached to the word
//! being completed.

use std::cell::RefCell;
use std::fmt;

use anyhow::{Context, Result};
use console::Term;
use dialoguer::theme::Theme;
use dialoguer::Completion;
use dialoguer::Input;

use super::LineEditor;
use crate::complete::MentionCompleter;

/// Renders prompts verbatim, without the separators dialoguer themes add.
struct PlainPrompt;

impl Theme for PlainPrompt {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{prompt}")
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(f, "{prompt}{sel}")
    }
}

/// Line editor bound to the process terminal.
pub struct ConsoleEditor {
    term: Term,
    completer: Option<MentionCompleter>,
    prefill: String,
}

impl ConsoleEditor {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            completer: None,
            prefill: String::new(),
        }
    }
}

impl Default for ConsoleEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEditor for ConsoleEditor {
    fn set_completer(&mut self, completer: Option<MentionCompleter>) {
        self.completer = completer;
    }

    fn set_prefill(&mut self, text: &str) {
        self.prefill = text.to_string();
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let theme = PlainPrompt;
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .with_initial_text(self.prefill.clone())
            .allow_empty(true);

        let line = match self.completer.as_mut() {
            Some(completer) => {
                let completion = MentionCompletion::new(completer);
                input
                    .completion_with(&completion)
                    .interact_text_on(&self.term)
                    .context("failed to read input")?
            }
            None => input
                .interact_text_on(&self.term)
                .context("failed to read input")?,
        };
        Ok(line)
    }

    fn erase_last_line(&mut self) -> Result<()> {
        self.term
            .clear_last_lines(1)
            .context("failed to erase last line")?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.term
            .write_line(text)
            .context("failed to write to terminal")?;
        Ok(())
    }
}

/// Adapts the attempt-indexed completer contract to dialoguer's
/// whole-buffer completion callback.
///
/// dialoguer hands over the entire input buffer on Tab and replaces it with
/// whatever is returned. The adapter splits off the trailing word as the
/// fragment, derives the attempt index by comparing the buffer against the
/// last completion it produced (repeated Tab on an unchanged buffer
/// advances the index, anything else restarts at 0), and splices the
/// replacement back in. Exhausting the candidate list wraps around, so Tab
/// cycles through ambiguous candidates.
struct MentionCompletion<'a> {
    completer: RefCell<&'a mut MentionCompleter>,
    cycle: RefCell<Option<CycleState>>,
}

/// The last completion this adapter produced.
struct CycleState {
    rendered: String,
    attempt: usize,
}

impl<'a> MentionCompletion<'a> {
    fn new(completer: &'a mut MentionCompleter) -> Self {
        Self {
            completer: RefCell::new(completer),
            cycle: RefCell::new(None),
        }
    }
}

impl Completion for MentionCompletion<'_> {
    fn get(&self, input: &str) -> Option<String> {
        let (before, fragment) = split_last_word(input);

        let mut cycle = self.cycle.borrow_mut();
        let mut attempt = match cycle.as_ref() {
            Some(state) if state.rendered == input => state.attempt + 1,
            _ => 0,
        };

        let mut completer = self.completer.borrow_mut();
        let mut replacement = completer.complete(fragment, attempt, before);
        if replacement.is_none() && attempt > 0 {
            attempt = 0;
            replacement = completer.complete(fragment, attempt, before);
        }
        let replacement = replacement?;

        let rendered = format!("{before}{replacement}");
        *cycle = Some(CycleState {
            rendered: rendered.clone(),
            attempt,
        });
        Some(rendered)
    }
}

/// Splits `input` at the start of its trailing whitespace-delimited word.
/// The fragment is empty when the input ends with whitespace.
fn split_last_word(input: &str) -> (&str, &str) {
    let boundary = input
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    input.split_at(boundary)
}
