//! `skillsurge onboard`: the five wizard steps driven from flags.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use tracing::{info, warn};

use skillsurge::demo;
use skillsurge::models::Role;
use skillsurge::onboarding::{time_constraint, OnboardingWizard, Step, WEEK_OPTIONS};
use skillsurge::state::AppState;

use super::{profile, roadmap, roles, Ctx};

#[derive(Args, Debug)]
pub struct OnboardArgs {
    /// PDF resume to analyse
    #[arg(long)]
    pub resume: PathBuf,

    /// Extract text locally and call the analyze endpoint instead of uploading
    #[arg(long)]
    pub local_extract: bool,

    /// Skill rating as `<skill-id>=<stars>` with 1 to 5 stars (repeatable)
    #[arg(long = "rate", value_parser = parse_rating)]
    pub ratings: Vec<(String, u8)>,

    /// Target role by title (case-insensitive); defaults to the best match
    #[arg(long, conflicts_with = "role_index")]
    pub role: Option<String>,

    /// Target role by its 1-based position in the ranked list
    #[arg(long)]
    pub role_index: Option<usize>,

    /// Preset pace: intensive, moderate, balanced or relaxed
    #[arg(long, conflicts_with_all = ["weeks", "hours"])]
    pub pace: Option<String>,

    /// Plan length in weeks (4, 8, 12 or 16)
    #[arg(long)]
    pub weeks: Option<u32>,

    /// Study hours per day, 1 to 8
    #[arg(long)]
    pub hours: Option<f32>,
}

fn parse_rating(raw: &str) -> Result<(String, u8), String> {
    let (id, stars) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <skill-id>=<stars>, got '{raw}'"))?;
    let stars = stars
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("stars must be a number from 1 to 5, got '{stars}'"))?;
    Ok((id.trim().to_string(), stars))
}

fn pick_role(ranked: Vec<Role>, title: Option<&str>, index: Option<usize>) -> Result<Role> {
    if let Some(title) = title {
        return ranked
            .into_iter()
            .find(|r| r.title.eq_ignore_ascii_case(title))
            .ok_or_else(|| anyhow!("no matched role titled '{title}'"));
    }
    let position = index.unwrap_or(1);
    if position == 0 {
        bail!("--role-index starts at 1");
    }
    let count = ranked.len();
    ranked
        .into_iter()
        .nth(position - 1)
        .ok_or_else(|| anyhow!("--role-index {position} is out of range; {count} roles were matched"))
}

/// Level-aware recommendations from the current star ratings.
async fn recommended(
    ctx: &Ctx,
    wizard: &OnboardingWizard,
) -> Result<Vec<Role>, skillsurge::ClientError> {
    ctx.api
        .recommendations_with_levels(wizard.rated_skills())
        .await
        .map(|resp| resp.roles)
}

pub async fn run(ctx: &Ctx, args: &OnboardArgs) -> Result<()> {
    // 1. Upload
    println!("Step {}: {}", Step::Upload.number(), Step::Upload.title());
    let analysed = match profile::analyze(ctx, &args.resume, args.local_extract).await {
        Ok(p) => p,
        Err(e) if ctx.fallback() => {
            warn!("resume analysis failed, continuing with the demo profile: {e:#}");
            demo::profile()
        }
        Err(e) => return Err(e),
    };
    // Created after the upload, which may have stored a server-assigned id.
    let mut wizard = OnboardingWizard::new(AppState::new(ctx.api.session().user_id()));
    let profile_id = analysed.id.clone();
    wizard.ingest_profile(analysed);

    // 2. Rate skills
    println!("Step {}: {}", Step::RateSkills.number(), Step::RateSkills.title());
    for (skill_id, stars) in &args.ratings {
        wizard
            .rate(skill_id, *stars)
            .with_context(|| format!("cannot rate '{skill_id}'"))?;
    }
    for skill in wizard.skills() {
        let stars = wizard.stars(&skill.id).unwrap_or_default();
        println!(
            "  {:<6} {:<28} {}{}",
            skill.id,
            skill.name,
            "*".repeat(usize::from(stars)),
            ".".repeat(5 - usize::from(stars))
        );
    }
    wizard.advance()?;

    // 3. Select role
    println!("Step {}: {}", Step::SelectRole.number(), Step::SelectRole.title());
    let matched = match ctx.api.match_roles(&profile_id).await {
        Ok(resp) if !resp.roles.is_empty() => Ok(resp.roles),
        Ok(_) => recommended(ctx, &wizard).await,
        Err(e) => {
            warn!("role matching failed, asking for recommendations: {e}");
            recommended(ctx, &wizard).await
        }
    };
    let ranked = match matched {
        Ok(roles) if !roles.is_empty() => roles,
        _ if ctx.fallback() => {
            warn!("no roles from the backend, using demo roles");
            demo::roles()
        }
        Ok(_) => bail!("no roles matched this profile"),
        Err(e) => return Err(e).context("role matching failed"),
    };
    roles::print_roles(&ranked, None);
    let role = pick_role(ranked, args.role.as_deref(), args.role_index)?;
    if let Err(e) = ctx.api.select_role(wizard.app().user_id(), &role.id).await {
        warn!(role = %role.title, "could not store the selected role: {e}");
    }
    println!("Target role: {}", role.title);
    wizard.select_role(role);
    wizard.advance()?;

    // 4. Timeline
    println!("Step {}: {}", Step::SetTimeline.number(), Step::SetTimeline.title());
    if let Some(pace) = &args.pace {
        let constraint = time_constraint(pace).ok_or_else(|| {
            anyhow!("unknown pace '{pace}' (intensive, moderate, balanced, relaxed)")
        })?;
        wizard.apply_time_constraint(constraint);
    }
    if let Some(weeks) = args.weeks {
        wizard
            .set_weeks(weeks)
            .with_context(|| format!("weeks must be one of {WEEK_OPTIONS:?}"))?;
    }
    if let Some(hours) = args.hours {
        let applied = wizard.set_hours_per_day(hours);
        if (applied - hours).abs() > f32::EPSILON {
            warn!(requested = hours, applied, "hours per day clamped");
        }
    }
    let timeline = wizard.timeline();
    println!(
        "  {} weeks at {} h/day, about {:.0} hours",
        timeline.weeks,
        timeline.hours_per_day,
        timeline.total_hours()
    );
    wizard.advance()?;

    // 5. Generate
    println!("Step {}: {}", Step::Generate.number(), Step::Generate.title());
    let plan = wizard.generate(&ctx.api).await?;
    let app = wizard.into_app();
    info!(user_id = %app.user_id(), "onboarding complete");

    match plan {
        Some(plan) => ctx.emit(&plan, roadmap::print_roadmap),
        None => {
            println!("Roadmap generation failed; run `skillsurge roadmap generate` to retry.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(id: &str, title: &str) -> Role {
        Role {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("s3=4"), Ok(("s3".to_string(), 4)));
        assert_eq!(parse_rating(" s1 = 5"), Ok(("s1".to_string(), 5)));
        assert!(parse_rating("s3").is_err());
        assert!(parse_rating("s3=many").is_err());
    }

    #[test]
    fn test_pick_role_by_title_index_or_default() {
        let ranked = || vec![role("r1", "ML Engineer"), role("r2", "Data Scientist")];
        assert_eq!(pick_role(ranked(), None, None).unwrap().id, "r1");
        assert_eq!(pick_role(ranked(), Some("data scientist"), None).unwrap().id, "r2");
        assert_eq!(pick_role(ranked(), None, Some(2)).unwrap().id, "r2");
        assert!(pick_role(ranked(), None, Some(0)).is_err());
        assert!(pick_role(ranked(), None, Some(3)).is_err());
        assert!(pick_role(ranked(), Some("Chef"), None).is_err());
    }
}
