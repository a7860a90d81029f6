//! `skillsurge dashboard ...`

use anyhow::{Context, Result};

use skillsurge::dashboard::{self, DashboardView, Source};
use skillsurge::models::DailyProblem;

use super::{bar, Ctx};

async fn load(ctx: &Ctx, demo_only: bool) -> Result<DashboardView> {
    let user_id = if demo_only {
        ctx.api.session().user_id().unwrap_or_default()
    } else {
        ctx.user_id()?
    };
    dashboard::load(&ctx.api, &user_id, demo_only, ctx.fallback())
        .await
        .context("failed to load dashboard")
}

pub async fn summary(ctx: &Ctx, demo_only: bool) -> Result<()> {
    let view = load(ctx, demo_only).await?;
    ctx.emit(&view, print_summary)
}

pub async fn daily(ctx: &Ctx) -> Result<()> {
    let view = load(ctx, false).await?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&view.daily_problem)?);
        return Ok(());
    }
    print_problem(&view.daily_problem);
    if view.completed_today {
        println!("\nSolved today. Streak: {} day(s).", view.streak);
    }
    Ok(())
}

pub async fn complete(ctx: &Ctx) -> Result<()> {
    let user_id = ctx.user_id()?;
    let mut view = load(ctx, false).await?;
    if view.source != Source::Live {
        anyhow::bail!("the backend is unavailable; nothing was recorded");
    }
    let result = dashboard::complete_daily(&ctx.api, &user_id, &mut view)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("failed to record the solved problem")?;
    if let Some(message) = &result.message {
        println!("{message}");
    }
    println!(
        "{} solved. Streak: {} day(s), {} problem(s) in total.",
        view.daily_problem.title, view.streak, result.total_completed
    );
    Ok(())
}

pub async fn progress(ctx: &Ctx) -> Result<()> {
    let user_id = ctx.user_id()?;
    let series = ctx
        .api
        .progress_series(&user_id)
        .await
        .context("failed to load progress")?;
    ctx.emit(&series, |s| {
        println!("Streak: {} day(s), {} problem(s) solved", s.streak, s.problems_solved);
        for week in &s.weekly_progress {
            println!(
                "  Week {:>2} {:>2}/{:<2} {}",
                week.week.unwrap_or_default(),
                week.completed,
                week.total,
                bar(week.percentage, 10)
            );
        }
        if let Some(weeks) = s.weeks_until_ready {
            println!("Ready in about {weeks} week(s)");
        }
        if let Some(date) = &s.predicted_ready_date {
            println!("Predicted ready date: {date}");
        }
    })
}

pub async fn readiness(ctx: &Ctx) -> Result<()> {
    let user_id = ctx.user_id()?;
    let resp = ctx
        .api
        .job_readiness(&user_id)
        .await
        .context("failed to load job readiness")?;
    let role = resp.target_role.clone();
    ctx.emit(&resp.readiness, |r| {
        if let Some(role) = &role {
            println!("Target role: {role}");
        }
        println!("Readiness: {}% {}", r.readiness_score, bar(r.readiness_score, 20));
        if let Some(weeks) = r.weeks_until_ready {
            println!("Ready in about {weeks} week(s)");
        }
        if !r.top_gaps.is_empty() {
            println!("Top gaps: {}", r.top_gaps.join(", "));
        }
        if let Some(rec) = &r.recommendation {
            println!("{rec}");
        }
    })
}

fn print_summary(view: &DashboardView) {
    match view.source {
        Source::Live => {},
        Source::Demo => println!("(demo data)"),
        Source::Fallback => println!("(backend unavailable, showing defaults)"),
    }
    if let Some(role) = &view.target_role {
        println!("Target role: {role}");
    }
    let stats = &view.stats;
    println!("Streak:          {} day(s)", view.streak);
    println!("Problems solved: {}", stats.problems_solved);
    println!("Skill match:     {}% {}", stats.skill_match, bar(stats.skill_match, 20));
    println!("Days until ready: {}", stats.days_until_ready);
    if let Some(readiness) = &view.job_readiness {
        println!("Job readiness:   {}%", readiness.readiness_score);
    }
    println!("\nToday: {} ({})", view.daily_problem.title, view.daily_problem.difficulty);
    println!("\nWeekly progress:");
    for point in &view.progress {
        println!("  {:<4} skills {:>3}  problems {:>3}", point.week, point.skills, point.problems);
    }
}

fn print_problem(problem: &DailyProblem) {
    println!("{} [{}]", problem.title, problem.difficulty);
    if !problem.link.is_empty() {
        println!("{}", problem.link);
    }
    if !problem.reason.is_empty() {
        println!("Why: {}", problem.reason);
    }
    if !problem.description.is_empty() {
        println!("\n{}", problem.description);
    }
    for (i, example) in problem.examples.iter().enumerate() {
        println!("\nExample {}:\n  input:  {}\n  output: {}", i + 1, example.input, example.output);
    }
    if !problem.hints.is_empty() {
        println!("\nHints:");
        for hint in &problem.hints {
            println!("  - {hint}");
        }
    }
}
