//! `skillsurge profile ...`

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use skillsurge::demo;
use skillsurge::graph::Proficiency;
use skillsurge::models::Profile;
use skillsurge::resume::ResumeFile;

use super::{bar, Ctx};

/// Reads the PDF and has the backend analyse it, either as an upload or as
/// locally extracted text. The server's user id is adopted when the session
/// has none yet.
pub async fn analyze(ctx: &Ctx, path: &Path, local_extract: bool) -> Result<Profile> {
    let resume = ResumeFile::read(path)
        .with_context(|| format!("cannot use {} as a resume", path.display()))?;

    let response = if local_extract {
        let text = resume.extract_text()?;
        info!(chars = text.len(), "resume text extracted locally");
        let user_id = ctx.api.session().user_id();
        ctx.api.analyze_resume(&text, user_id.as_deref()).await
    } else {
        ctx.api.upload_resume(&resume).await
    };

    let profile = response
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("resume analysis failed")?
        .profile;
    adopt_user_id(ctx, &profile)?;
    Ok(profile)
}

fn adopt_user_id(ctx: &Ctx, profile: &Profile) -> Result<()> {
    let session = ctx.api.session();
    if session.user_id().is_none() && !profile.user_id.is_empty() {
        session.set_user_id(profile.user_id.clone())?;
        info!(user_id = %profile.user_id, "user id stored in session");
    }
    Ok(())
}

/// The stored profile, or the demo profile when the backend cannot be
/// reached and fallback is enabled.
pub async fn load(ctx: &Ctx) -> Result<Profile> {
    let user_id = ctx.user_id()?;
    match ctx.api.profile(&user_id).await {
        Ok(profile) => Ok(profile),
        Err(e) if ctx.fallback() && !e.requires_login() => {
            warn!("profile fetch failed, using demo profile: {e}");
            Ok(demo::profile())
        }
        Err(e) => Err(e).context("failed to load profile"),
    }
}

pub async fn upload(ctx: &Ctx, path: &Path, local_extract: bool) -> Result<()> {
    let profile = analyze(ctx, path, local_extract).await?;
    ctx.emit(&profile, print_profile)
}

pub async fn show(ctx: &Ctx) -> Result<()> {
    let profile = load(ctx).await?;
    ctx.emit(&profile, print_profile)
}

pub async fn skills(ctx: &Ctx) -> Result<()> {
    let skills = load(ctx).await?.graph_skills();
    ctx.emit(&skills, |skills| {
        if skills.is_empty() {
            println!("No rated skills on this profile.");
        }
        for s in skills {
            println!(
                "{:<28} {:>3} {} {:<12} {}",
                s.name,
                s.level,
                bar(s.level, 10),
                Proficiency::from_level(s.level).label(),
                s.category
            );
        }
    })
}

fn print_profile(profile: &Profile) {
    if let Some(name) = &profile.name {
        println!("{name}");
    }
    if !profile.summary.is_empty() {
        println!("{}\n", profile.summary);
    }
    println!("Skills ({}): {}", profile.skills.len(), profile.skill_names().join(", "));
    if !profile.strongest_skills.is_empty() {
        println!("Strongest: {}", profile.strongest_skills.join(", "));
    }
    if !profile.skill_gaps.is_empty() {
        println!("Gaps: {}", profile.skill_gaps.join(", "));
    }
    if let Some(years) = profile.total_years_experience {
        println!("Experience: {years:.1} years");
    }
    for exp in &profile.experience {
        println!("  - {} at {} ({})", exp.role, exp.company, exp.duration);
    }
    for edu in &profile.education {
        println!("  - {}, {} {}", edu.degree, edu.institution, edu.year);
    }
    if !profile.projects.is_empty() {
        println!("Projects: {}", profile.projects.len());
    }
}
