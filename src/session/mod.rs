//! Interactive standup collection session.
//!
//! Drives the four standup sections (yesterday, today, blockers, shoutouts)
//! through a [`LineEditor`], keeping the mention completer installed for
//! exactly the lifetime of the session. The collection logic here never
//! touches a concrete line-editing library; [`editor::ConsoleEditor`] wires
//! the seam to the real terminal.

pub mod editor;

use anyhow::Result;

use crate::complete::{MentionCompleter, MENTION_SIGIL};

/// Narrow seam over the interactive line editor.
///
/// Keeps the collection logic independent of the line-editing library:
/// completer installation, prefill text, and the erase-last-line cursor
/// operation are all expressed here and nowhere else.
pub trait LineEditor {
    /// Installs or clears the completer used for tab completion.
    fn set_completer(&mut self, completer: Option<MentionCompleter>);

    /// Sets text inserted into the buffer before the user starts typing.
    fn set_prefill(&mut self, text: &str);

    /// Reads one line of input behind `prompt`.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Moves the cursor up one row and clears that row.
    fn erase_last_line(&mut self) -> Result<()>;

    /// Writes one line of output.
    fn write_line(&mut self, text: &str) -> Result<()>;
}

/// The four collected standup sections, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandupReport {
    pub yesterday: Vec<String>,
    pub today: Vec<String>,
    pub blockers: Vec<String>,
    pub shoutouts: Vec<String>,
}

/// Keeps a completer installed on the editor and detaches it when dropped,
/// so completion never leaks into prompts outside the session.
struct CompleterGuard<'a, E: LineEditor + ?Sized> {
    editor: &'a mut E,
}

impl<'a, E: LineEditor + ?Sized> CompleterGuard<'a, E> {
    fn install(editor: &'a mut E, completer: MentionCompleter) -> Self {
        editor.set_completer(Some(completer));
        Self { editor }
    }
}

impl<E: LineEditor + ?Sized> Drop for CompleterGuard<'_, E> {
    fn drop(&mut self) {
        self.editor.set_completer(None);
    }
}

/// Reads entry lines for one section until a line starts with the mention
/// sigil.
///
/// The terminating line is not part of the result; its prompt row is erased
/// from the transcript and a blank separator is emitted in its place. Empty
/// lines are kept as entries and collection continues.
pub fn collect_items<E: LineEditor + ?Sized>(editor: &mut E) -> Result<Vec<String>> {
    let mut items = Vec::new();
    loop {
        let line = editor.read_line(" - ")?;
        if line.starts_with(MENTION_SIGIL) {
            editor.erase_last_line()?;
            editor.write_line("")?;
            return Ok(items);
        }
        items.push(line);
    }
}

/// Substitutes a single "N/A" entry for an empty section.
///
/// Overwrites the blank separator left by [`collect_items`] so the
/// transcript shows exactly what will be submitted. Non-empty sections pass
/// through untouched.
pub fn default_to_na<E: LineEditor + ?Sized>(
    editor: &mut E,
    items: Vec<String>,
) -> Result<Vec<String>> {
    if !items.is_empty() {
        return Ok(items);
    }
    editor.erase_last_line()?;
    editor.write_line(" - N/A")?;
    editor.write_line("")?;
    Ok(vec!["N/A".to_string()])
}

/// Runs the four standup sections in order and returns the collected
/// report.
///
/// The completer stays installed for the whole flow and is detached on
/// every exit path, including early errors. The shoutouts section primes
/// each prompt line with a leading sigil as a starting hint.
pub fn collect_report<E: LineEditor + ?Sized>(
    editor: &mut E,
    completer: MentionCompleter,
) -> Result<StandupReport> {
    let session = CompleterGuard::install(editor, completer);

    session.editor.write_line("Yesterday:")?;
    let yesterday = collect_items(&mut *session.editor)?;

    session.editor.write_line("Today:")?;
    let today = collect_items(&mut *session.editor)?;

    session.editor.write_line("Blockers:")?;
    let items = collect_items(&mut *session.editor)?;
    let blockers = default_to_na(&mut *session.editor, items)?;

    session.editor.write_line("Shoutouts:")?;
    session.editor.set_prefill("@");
    let items = collect_items(&mut *session.editor)?;
    let shoutouts = default_to_na(&mut *session.editor, items)?;
    session.editor.set_prefill("");

    Ok(StandupReport {
        yesterday,
        today,
        blockers,
        shoutouts,
    })
}
