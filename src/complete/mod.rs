//! Username autocompletion for @mentions.
//!
//! Resolves partial "@name" fragments against the team member roster and
//! "@@name" fragments against the organization-wide roster. Matching is
//! case-insensitive but completions always substitute the username in its
//! original casing.
//!
//! The completer owns its in-progress match list. Attempt 0 of a completion
//! cycle rebuilds the list from scratch, so nothing carries over between
//! keystrokes beyond the single cycle the list serves.

/// The character marking the start of a username reference.
pub const MENTION_SIGIL: char = '@';

/// An ordered, immutable collection of usernames with lowercase keys for
/// case-insensitive prefix matching.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    /// (lowercased, original) pairs in insertion order.
    entries: Vec<(String, String)>,
}

impl CandidateSet {
    /// Builds a set from usernames, preserving their order.
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = members
            .into_iter()
            .map(|member| {
                let original = member.into();
                (original.to_lowercase(), original)
            })
            .collect();
        Self { entries }
    }

    /// Stored usernames whose lowercased form starts with `prefix_lower`,
    /// in insertion order.
    fn matching<'a>(&'a self, prefix_lower: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.starts_with(prefix_lower))
            .map(|(_, original)| original.as_str())
    }
}

/// Stateful completer resolving "@name" and "@@name" fragments.
///
/// One instance is bound to a single collection session. The line editor
/// drives it with an incrementing attempt index: attempt 0 recomputes the
/// match list for the fragment, later attempts walk the list until it runs
/// out.
#[derive(Debug)]
pub struct MentionCompleter {
    team: CandidateSet,
    org: CandidateSet,
    matches: Vec<String>,
}

impl MentionCompleter {
    /// Creates a completer over the team and organization rosters.
    pub fn new(team: CandidateSet, org: CandidateSet) -> Self {
        Self {
            team,
            org,
            matches: Vec::new(),
        }
    }

    /// Resolves one completion attempt.
    ///
    /// `fragment` is the word under the cursor. Word boundaries are
    /// whitespace only, so a leading '@' stays part of the word.
    /// `line_before_fragment` is everything typed before the fragment on
    /// the current line; it decides the `"for "` affordance when the
    /// fragment is empty.
    ///
    /// Returns `None` when there is no candidate at `attempt`. Candidate
    /// sets are never mutated.
    pub fn complete(
        &mut self,
        fragment: &str,
        attempt: usize,
        line_before_fragment: &str,
    ) -> Option<String> {
        if attempt == 0 {
            if let Some(fixed) = self.recompute(fragment, line_before_fragment) {
                return Some(fixed);
            }
        }
        self.matches.get(attempt).cloned()
    }

    /// Rebuilds the match list for `fragment`. Returns a fixed completion
    /// when the empty-fragment "for " affordance applies instead of a
    /// candidate lookup.
    fn recompute(&mut self, fragment: &str, line_before_fragment: &str) -> Option<String> {
        self.matches.clear();

        if fragment.is_empty() {
            // Right after a bare "@name" token: offer the "for <names>"
            // phrasing instead of another username.
            let last_word = line_before_fragment.split_whitespace().next_back()?;
            if last_word.starts_with(MENTION_SIGIL) {
                return Some("for ".to_string());
            }
            return None;
        }

        // Only fragments that begin with the sigil are mentions.
        let rest = fragment.strip_prefix(MENTION_SIGIL)?;

        // A second sigil escapes out of the team roster into the
        // organization-wide one.
        let (needle, candidates) = match rest.strip_prefix(MENTION_SIGIL) {
            Some(escaped) => (escaped, &self.org),
            None => (rest, &self.team),
        };

        let needle = needle.to_lowercase();
        self.matches = candidates.matching(&needle).map(String::from).collect();

        // An unambiguous match completes the whole mention: sigil restored,
        // trailing space so the cursor lands ready for the next word.
        if let [only] = self.matches.as_mut_slice() {
            *only = format!("{MENTION_SIGIL}{only} ");
        }

        None
    }
}
