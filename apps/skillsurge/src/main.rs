//! skillsurge - career-readiness client
//!
//! Uploads a resume, picks a target role, generates a learning roadmap and
//! tracks daily practice against a SkillSurge backend.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skillsurge::models::InterviewType;
use skillsurge::{ApiClient, Config, SessionStore};

mod commands;

use commands::Ctx;

/// skillsurge - resume to roadmap to interview
#[derive(Parser, Debug)]
#[command(name = "skillsurge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend base URL (overrides SKILLSURGE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file holding tokens and the user id
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Fail instead of showing demo data when the backend is unreachable
    #[arg(long, global = true)]
    no_fallback: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Account ===
    /// Sign in, sign up and session management
    #[command(subcommand)]
    Auth(AuthCommands),

    // === Onboarding ===
    /// Run the five-step onboarding: upload, rate, pick a role, set a timeline, generate
    Onboard(commands::onboard::OnboardArgs),

    // === Profile & roles ===
    /// Resume analysis results
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Role matching and selection
    #[command(subcommand)]
    Roles(RoleCommands),

    // === Learning plan ===
    /// Learning roadmap
    #[command(subcommand)]
    Roadmap(RoadmapCommands),

    /// Skill graph layout and summary
    Graph {
        /// Use the built-in demo profile
        #[arg(long)]
        demo: bool,
    },

    // === Practice ===
    /// Dashboard and daily practice problem
    #[command(subcommand)]
    Dashboard(DashboardCommands),

    /// Mock interviews
    #[command(subcommand)]
    Interview(InterviewCommands),
}

#[derive(Subcommand, Debug)]
enum AuthCommands {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "SKILLSURGE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        email: String,

        #[arg(long, env = "SKILLSURGE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Full name shown on the dashboard
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Exchange the refresh token for a new pair
    Refresh,

    /// Request a password reset email
    ResetPassword {
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommands {
    /// Upload a PDF resume (or extract it locally and send the text)
    Upload {
        /// Path to the PDF
        file: PathBuf,

        /// Extract text locally and call the analyze endpoint
        #[arg(long)]
        local_extract: bool,
    },

    /// Show the stored profile
    Show,

    /// Show skills with level and category
    Skills,
}

#[derive(Subcommand, Debug)]
enum RoleCommands {
    /// Roles ranked against the stored profile
    Match,

    /// Roles recommended for a list of skills
    Recommend {
        /// Skill name (repeatable); defaults to the profile's skills
        #[arg(long = "skill")]
        skills: Vec<String>,
    },

    /// Roles stored for the user, with the current selection
    List,

    /// Set the target role
    Select {
        /// Role id
        role_id: String,
    },
}

#[derive(Subcommand, Debug)]
enum RoadmapCommands {
    /// Generate a new plan for a target role
    Generate {
        /// Target role title; defaults to the selected role
        #[arg(long)]
        role: Option<String>,

        /// Subject-based plan sized by weeks and hours per day
        #[arg(long)]
        comprehensive: bool,

        #[arg(long, default_value_t = skillsurge::onboarding::DEFAULT_WEEKS)]
        weeks: u32,

        #[arg(long, default_value_t = skillsurge::onboarding::DEFAULT_HOURS_PER_DAY)]
        hours: f32,
    },

    /// Show the stored roadmap week by week
    Show {
        /// Use the built-in demo roadmap
        #[arg(long)]
        demo: bool,
    },

    /// Mark a task done, or undone if it already is
    Toggle {
        /// Task id
        task_id: String,

        /// Week id; searched for when omitted
        #[arg(long)]
        week: Option<String>,
    },

    /// Completion per week as computed by the server
    Progress,

    /// Subject breakdown from the demo curriculum
    Subjects {
        /// Show one subject's weeks and tasks
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DashboardCommands {
    /// Stats, readiness and weekly chart
    Summary {
        /// Show the demo snapshot without calling the backend
        #[arg(long)]
        demo: bool,
    },

    /// Today's practice problem
    Daily,

    /// Mark today's problem solved
    Complete,

    /// Weekly progress series and readiness trajectory
    Progress,

    /// Job readiness score and top gaps
    Readiness,
}

#[derive(Subcommand, Debug)]
enum InterviewCommands {
    /// Start a session, wait for Enter, then end it and print feedback
    Practice {
        #[arg(long, default_value = "behavioral")]
        r#type: InterviewType,

        /// Target role; defaults to the selected role
        #[arg(long)]
        role: Option<String>,
    },

    /// Start a session and print its id and conversation link
    Start {
        #[arg(long, default_value = "behavioral")]
        r#type: InterviewType,

        #[arg(long)]
        role: Option<String>,
    },

    /// Show a session's status
    Show { interview_id: String },

    /// End a session and print its feedback
    End { interview_id: String },

    /// Print feedback for a finished session
    Feedback { interview_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &cli);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        }))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    debug!("skillsurge v{}", env!("CARGO_PKG_VERSION"));
    info!(api_url = %config.api_url, "using backend");

    let session = SessionStore::load(&config.session_file).with_context(|| {
        format!("failed to open session file {}", config.session_file.display())
    })?;
    let api = ApiClient::from_config(&config, Arc::new(session)).context("invalid backend URL")?;
    let ctx = Ctx::new(config, api, cli.json);

    match cli.command {
        Commands::Auth(cmd) => match cmd {
            AuthCommands::Login { email, password } => {
                commands::auth::login(&ctx, &email, &password).await
            }
            AuthCommands::Register {
                email,
                password,
                name,
            } => commands::auth::register(&ctx, &email, &password, name.as_deref()).await,
            AuthCommands::Logout => commands::auth::logout(&ctx).await,
            AuthCommands::Whoami => commands::auth::whoami(&ctx).await,
            AuthCommands::Refresh => commands::auth::refresh(&ctx).await,
            AuthCommands::ResetPassword { email } => {
                commands::auth::reset_password(&ctx, &email).await
            }
        },
        Commands::Onboard(args) => commands::onboard::run(&ctx, &args).await,
        Commands::Profile(cmd) => match cmd {
            ProfileCommands::Upload {
                file,
                local_extract,
            } => commands::profile::upload(&ctx, &file, local_extract).await,
            ProfileCommands::Show => commands::profile::show(&ctx).await,
            ProfileCommands::Skills => commands::profile::skills(&ctx).await,
        },
        Commands::Roles(cmd) => match cmd {
            RoleCommands::Match => commands::roles::matched(&ctx).await,
            RoleCommands::Recommend { skills } => commands::roles::recommend(&ctx, skills).await,
            RoleCommands::List => commands::roles::list(&ctx).await,
            RoleCommands::Select { role_id } => commands::roles::select(&ctx, &role_id).await,
        },
        Commands::Roadmap(cmd) => match cmd {
            RoadmapCommands::Generate {
                role,
                comprehensive,
                weeks,
                hours,
            } => {
                commands::roadmap::generate(&ctx, role.as_deref(), comprehensive, weeks, hours)
                    .await
            }
            RoadmapCommands::Show { demo } => commands::roadmap::show(&ctx, demo).await,
            RoadmapCommands::Toggle { task_id, week } => {
                commands::roadmap::toggle(&ctx, &task_id, week.as_deref()).await
            }
            RoadmapCommands::Progress => commands::roadmap::progress(&ctx).await,
            RoadmapCommands::Subjects { id } => commands::roadmap::subjects(&ctx, id.as_deref()),
        },
        Commands::Graph { demo } => commands::graph::run(&ctx, demo).await,
        Commands::Dashboard(cmd) => match cmd {
            DashboardCommands::Summary { demo } => commands::dashboard::summary(&ctx, demo).await,
            DashboardCommands::Daily => commands::dashboard::daily(&ctx).await,
            DashboardCommands::Complete => commands::dashboard::complete(&ctx).await,
            DashboardCommands::Progress => commands::dashboard::progress(&ctx).await,
            DashboardCommands::Readiness => commands::dashboard::readiness(&ctx).await,
        },
        Commands::Interview(cmd) => match cmd {
            InterviewCommands::Practice { r#type, role } => {
                commands::interview::practice(&ctx, r#type, role.as_deref()).await
            }
            InterviewCommands::Start { r#type, role } => {
                commands::interview::start(&ctx, r#type, role.as_deref()).await
            }
            InterviewCommands::Show { interview_id } => {
                commands::interview::show(&ctx, &interview_id).await
            }
            InterviewCommands::End { interview_id } => {
                commands::interview::end(&ctx, &interview_id).await
            }
            InterviewCommands::Feedback { interview_id } => {
                commands::interview::feedback(&ctx, &interview_id).await
            }
        },
    }
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    if let Some(path) = &cli.session_file {
        config.session_file = path.clone();
    }
    if let Some(level) = &cli.log_level {
        config.rust_log = level.clone();
    }
    if cli.no_fallback {
        config.demo_fallback = false;
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_subcommands() {
        let cli = Cli::parse_from([
            "skillsurge",
            "--json",
            "roadmap",
            "toggle",
            "w1-t2",
            "--week",
            "w1",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Roadmap(RoadmapCommands::Toggle { task_id, week }) => {
                assert_eq!(task_id, "w1-t2");
                assert_eq!(week.as_deref(), Some("w1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_interview_type_parses_kebab_case() {
        let cli = Cli::parse_from(["skillsurge", "interview", "start", "--type", "system-design"]);
        match cli.command {
            Commands::Interview(InterviewCommands::Start { r#type, role }) => {
                assert_eq!(r#type, InterviewType::SystemDesign);
                assert!(role.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
