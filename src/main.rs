use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use standup_cli::complete::{CandidateSet, MentionCompleter};
use standup_cli::github::{self, GithubClient, GithubError};
use standup_cli::report;
use standup_cli::session::editor::ConsoleEditor;
use standup_cli::session::{collect_report, LineEditor};

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "standup")]
#[command(version)]
#[command(about = "Simple standups!")]
#[command(long_about = "Collects your daily standup update through interactive prompts\n\
    with @mention autocompletion and posts it as a comment on today's\n\
    standup discussion in your GitHub team.\n\n\
    Type entries one per line; finish a section by starting a line\n\
    with '@'. Use tab to complete teammate usernames ('@@' reaches the\n\
    whole organization).")]
#[command(after_help = "EXAMPLES:\n    \
    standup my-team              Post to my-team's standup discussion\n    \
    standup my-team -o my-org    Use a different organization\n\n\
    The GitHub API token is read from the STANDUP_GITHUB_API_KEY\n\
    environment variable.")]
struct Cli {
    /// GitHub organization's team name
    team: String,

    /// GitHub organization name
    #[arg(short, long, default_value = "MLH-Fellowship")]
    organization: String,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "standup_cli=debug"
    } else {
        "standup_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    println!("Loading...");

    let token = std::env::var(github::TOKEN_ENV_VAR)
        .with_context(|| format!("{} is not set", github::TOKEN_ENV_VAR))?;
    let client = GithubClient::new(&token);

    let organization = match client.organization(&cli.organization) {
        Ok(organization) => organization,
        Err(GithubError::OrganizationNotFound(_)) => {
            println!("Error: organization does not exist.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let team = match client.team_by_slug(&organization.login, &github::slugify(&cli.team)) {
        Ok(team) => team,
        Err(GithubError::TeamNotFound(_)) => {
            println!("Error: team does not exist.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let discussions = client.team_discussions(&organization.login, &team.slug)?;
    let title = report::standup_title(chrono::Local::now().date_naive());
    let Some(discussion) = report::find_standup_discussion(&title, &discussions) else {
        bail!("no discussion found with title matching: {title}");
    };

    let team_members = client.team_members(&organization.login, &team.slug)?;
    let org_members = client.organization_members(&organization.login)?;
    tracing::debug!(
        team = team_members.len(),
        organization = org_members.len(),
        "loaded member rosters"
    );

    let completer = MentionCompleter::new(
        CandidateSet::new(team_members.into_iter().map(|member| member.login)),
        CandidateSet::new(org_members.into_iter().map(|member| member.login)),
    );

    let mut editor = ConsoleEditor::new();
    editor.erase_last_line()?;

    let standup = collect_report(&mut editor, completer)?;
    let comment = report::render_comment(&standup);

    let posted =
        client.create_discussion_comment(&organization.login, &team.slug, discussion.number, &comment)?;

    println!("{}", posted.html_url.cyan());
    println!("{}", "Submitted!".green().bold());

    Ok(())
}
