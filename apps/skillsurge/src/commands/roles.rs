//! `skillsurge roles ...`

use anyhow::{bail, Context, Result};
use tracing::warn;

use skillsurge::demo;
use skillsurge::models::Role;

use super::{bar, profile, Ctx};

pub async fn matched(ctx: &Ctx) -> Result<()> {
    let profile = profile::load(ctx).await?;
    let roles = match ctx.api.match_roles(&profile.id).await {
        Ok(resp) => resp.roles,
        Err(e) if ctx.fallback() && !e.requires_login() => {
            warn!("role matching failed, using demo roles: {e}");
            demo::roles()
        }
        Err(e) => return Err(e).context("role matching failed"),
    };
    ctx.emit(&roles, |roles| print_roles(roles, None))
}

pub async fn recommend(ctx: &Ctx, skills: Vec<String>) -> Result<()> {
    let skills = if skills.is_empty() {
        profile::load(ctx).await?.skill_names()
    } else {
        skills
    };
    if skills.is_empty() {
        bail!("no skills to recommend from; pass --skill or upload a resume first");
    }
    let roles = ctx
        .api
        .recommendations(skills)
        .await
        .context("recommendation request failed")?
        .roles;
    ctx.emit(&roles, |roles| print_roles(roles, None))
}

pub async fn list(ctx: &Ctx) -> Result<()> {
    let user_id = ctx.user_id()?;
    let resp = ctx.api.user_roles(&user_id).await.context("failed to load roles")?;
    let selected = resp.selected_role.clone();
    ctx.emit(&resp.roles, |roles| print_roles(roles, selected.as_deref()))
}

pub async fn select(ctx: &Ctx, role_id: &str) -> Result<()> {
    let user_id = ctx.user_id()?;
    let resp = ctx
        .api
        .select_role(&user_id, role_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("failed to select role")?;
    println!("Target role set to {}.", resp.selected_role);
    Ok(())
}

/// Ranked list, best match first. `selected` marks the current target.
pub fn print_roles(roles: &[Role], selected: Option<&str>) {
    if roles.is_empty() {
        println!("No roles found.");
        return;
    }
    for (i, role) in roles.iter().enumerate() {
        let marker = if selected == Some(role.id.as_str()) { "*" } else { " " };
        println!(
            "{marker}{:>2}. {:<32} {:>3}% {}  [{}]",
            i + 1,
            role.title,
            role.match_percentage,
            bar(role.match_percentage, 10),
            role.id
        );
        if let Some(salary) = &role.salary {
            println!("      salary: {salary}");
        }
        if !role.missing_skills.is_empty() {
            println!("      missing: {}", role.missing_skills.join(", "));
        }
    }
}
