//! Standup - post your daily standup to a GitHub team discussion
//!
//! Standup collects a daily update (yesterday / today / blockers /
//! shoutouts) through interactive prompts with @mention autocompletion,
//! finds today's standup discussion in a GitHub team, and posts the
//! formatted update as a comment.

pub mod complete;
pub mod github;
pub mod report;
pub mod session;
