//! `skillsurge roadmap ...`

use anyhow::{anyhow, bail, Context, Result};
use tracing::warn;

use skillsurge::demo;
use skillsurge::models::{Roadmap, Subject};
use skillsurge::onboarding::Timeline;
use skillsurge::roadmap::{subject_progress, subjects_overview, RoadmapTracker, SubjectTracker};

use super::{bar, Ctx};

/// The role title to plan for: the explicit one, else the user's selection.
async fn resolve_role(ctx: &Ctx, user_id: &str, role: Option<&str>) -> Result<String> {
    if let Some(role) = role {
        return Ok(role.to_string());
    }
    let resp = ctx
        .api
        .user_roles(user_id)
        .await
        .context("failed to look up the selected role")?;
    let selected = resp
        .selected_role
        .ok_or_else(|| anyhow!("no target role selected; pass --role or run `skillsurge roles select`"))?;
    Ok(resp
        .roles
        .into_iter()
        .find(|r| r.id == selected)
        .map(|r| r.title)
        .unwrap_or(selected))
}

pub async fn generate(
    ctx: &Ctx,
    role: Option<&str>,
    comprehensive: bool,
    weeks: u32,
    hours: f32,
) -> Result<()> {
    let user_id = ctx.user_id()?;
    let role = resolve_role(ctx, &user_id, role).await?;

    if comprehensive {
        let timeline = Timeline {
            weeks,
            hours_per_day: hours,
        };
        if !timeline.is_valid() {
            bail!("invalid timeline: {weeks} weeks at {hours} h/day");
        }
        let plan = ctx
            .api
            .generate_comprehensive_roadmap(&user_id, &role, weeks, hours)
            .await
            .context("roadmap generation failed")?;
        return ctx.emit(&plan, |plan| {
            println!(
                "Plan for {role}: about {:.0} hours total",
                timeline.total_hours()
            );
            if plan.subjects.is_empty() {
                print_roadmap(&plan.clone().into_roadmap());
            } else {
                print_subjects(&plan.subjects);
            }
        });
    }

    let roadmap = ctx
        .api
        .generate_roadmap(&user_id, &role)
        .await
        .context("roadmap generation failed")?;
    ctx.emit(&roadmap, print_roadmap)
}

async fn load(ctx: &Ctx, demo_only: bool) -> Result<(String, Roadmap)> {
    if demo_only {
        let user_id = ctx.api.session().user_id().unwrap_or_default();
        return Ok((user_id, demo::roadmap()));
    }
    let user_id = ctx.user_id()?;
    match ctx.api.roadmap(&user_id).await {
        Ok(roadmap) => Ok((user_id, roadmap)),
        Err(e) if ctx.fallback() && !e.requires_login() => {
            warn!("roadmap fetch failed, showing demo roadmap: {e}");
            Ok((user_id, demo::roadmap()))
        }
        Err(e) => Err(e).context("failed to load roadmap"),
    }
}

pub async fn show(ctx: &Ctx, demo_only: bool) -> Result<()> {
    let (user_id, roadmap) = load(ctx, demo_only).await?;
    let tracker = RoadmapTracker::new(user_id, roadmap);
    if !ctx.json {
        if let Some(week) = tracker.current_week() {
            println!("Current week: {} {}\n", week.number, week.title);
        }
    }
    ctx.emit(tracker.roadmap(), print_roadmap)
}

pub async fn toggle(ctx: &Ctx, task_id: &str, week: Option<&str>) -> Result<()> {
    let user_id = ctx.user_id()?;
    let roadmap = ctx
        .api
        .roadmap(&user_id)
        .await
        .context("failed to load roadmap")?;
    let mut tracker = RoadmapTracker::new(user_id, roadmap);

    let result = match week {
        Some(week_id) => tracker.toggle_task(&ctx.api, week_id, task_id).await,
        None => tracker.toggle(&ctx.api, task_id).await,
    }
    .map_err(|e| anyhow!(e.user_message()))
    .context("task update failed")?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&result.progress)?);
        return Ok(());
    }
    let state = if result.completed { "done" } else { "not done" };
    println!("{task_id} marked {state}.");
    println!(
        "Overall: {}/{} {} {}%",
        result.progress.completed,
        result.progress.total,
        bar(result.progress.percentage, 20),
        result.progress.percentage
    );
    if result.bonus_added > 0 {
        if let Some(message) = &result.bonus_message {
            println!("{message}");
        }
        println!("{} bonus task(s) added.", result.bonus_added);
    }
    Ok(())
}

pub async fn progress(ctx: &Ctx) -> Result<()> {
    let user_id = ctx.user_id()?;
    let progress = ctx
        .api
        .roadmap_progress(&user_id)
        .await
        .context("failed to load progress")?;
    ctx.emit(&progress, |p| {
        println!("Overall: {}/{} {} {}%", p.completed, p.total, bar(p.percentage, 20), p.percentage);
        for week in &p.weeks {
            println!(
                "  Week {:>2} {:<32} {:>2}/{:<2} {}",
                week.week_number.unwrap_or_default(),
                week.title.as_deref().unwrap_or(""),
                week.completed,
                week.total,
                bar(week.percentage, 10)
            );
        }
    })
}

pub fn subjects(ctx: &Ctx, id: Option<&str>) -> Result<()> {
    let subjects = demo::subjects();
    let Some(id) = id else {
        return ctx.emit(&subjects, |s| print_subjects(s));
    };

    let subject = subjects
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| anyhow!("no subject with id '{id}'"))?;
    let tracker = SubjectTracker::with_demo_start(subject);
    ctx.emit(tracker.subject(), |subject| {
        let p = tracker.progress();
        println!("{} - {}", subject.name, subject.description);
        println!("{}/{} tasks {} {}%", p.completed, p.total, bar(p.percentage, 20), p.percentage);
        for week in &subject.weeks {
            let wp = tracker.week_progress(week);
            println!("\nWeek {}: {} ({}/{})", week.number, week.title, wp.completed, wp.total);
            for task in &week.tasks {
                let mark = if tracker.is_completed(&task.id) { "x" } else { " " };
                println!("  [{mark}] {:<10} {}", task.id, task.title);
            }
        }
    })
}

fn print_subjects(subjects: &[Subject]) {
    let overview = subjects_overview(subjects);
    println!(
        "{} subjects, {} weeks, {} tasks, {}% complete",
        overview.subjects, overview.total_weeks, overview.total_tasks, overview.percentage
    );
    for subject in subjects {
        let p = subject_progress(subject);
        println!(
            "  {:<14} {:<36} {:?} {} {}%",
            subject.id,
            subject.name,
            subject.priority,
            bar(p.percentage, 10),
            p.percentage
        );
    }
}

pub fn print_roadmap(roadmap: &Roadmap) {
    let overall = roadmap.progress();
    if let Some(role) = &roadmap.target_role {
        println!("Roadmap for {role}");
    }
    println!(
        "{}/{} tasks {} {}%",
        overall.completed,
        overall.total,
        bar(overall.percentage, 20),
        overall.percentage
    );
    for week in &roadmap.weeks {
        let p = week.progress();
        println!("\nWeek {}: {} ({}/{})", week.number, week.title, p.completed, p.total);
        if !week.focus.is_empty() {
            println!("  focus: {}", week.focus);
        }
        for task in &week.tasks {
            let mark = if task.completed { "x" } else { " " };
            let bonus = if task.is_bonus { " (bonus)" } else { "" };
            println!("  [{mark}] {:<12} {}{bonus}", task.id, task.title);
        }
    }
}
