//! `skillsurge interview ...`

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use skillsurge::interview::{sample_feedback, InterviewStatus, MockInterview};
use skillsurge::models::{InterviewFeedback, InterviewType};

use super::{bar, Ctx};

fn session_user(ctx: &Ctx) -> String {
    ctx.api
        .session()
        .user_id()
        .unwrap_or_else(skillsurge::state::generate_user_id)
}

pub async fn practice(ctx: &Ctx, interview_type: InterviewType, role: Option<&str>) -> Result<()> {
    let mut interview = MockInterview::new(session_user(ctx), role, interview_type);
    println!("Starting a {interview_type} interview for {}...", interview.target_role());

    match interview.start(&ctx.api).await? {
        InterviewStatus::Active {
            conversation_url, ..
        } => {
            println!("Join the conversation: {conversation_url}");
            println!("Press Enter when you have finished.");
            let mut line = String::new();
            BufReader::new(tokio::io::stdin())
                .read_line(&mut line)
                .await
                .context("failed to read from stdin")?;
        }
        InterviewStatus::Demo { message, .. } => println!("{message}"),
        _ => {},
    }

    let feedback = interview.end(&ctx.api).await?;
    ctx.emit(&feedback, print_feedback)
}

pub async fn start(ctx: &Ctx, interview_type: InterviewType, role: Option<&str>) -> Result<()> {
    let mut interview = MockInterview::new(session_user(ctx), role, interview_type);
    let status = interview.start(&ctx.api).await?;
    match status {
        InterviewStatus::Active {
            interview_id,
            conversation_url,
        } => {
            println!("Interview {interview_id} started.");
            println!("Join: {conversation_url}");
            println!("When done: skillsurge interview end {interview_id}");
        }
        InterviewStatus::Demo {
            interview_id,
            message,
        } => {
            println!("{message}");
            println!("Demo session id: {interview_id}");
        }
        other => println!("Interview is {}.", other.name()),
    }
    Ok(())
}

pub async fn show(ctx: &Ctx, interview_id: &str) -> Result<()> {
    let details = ctx
        .api
        .interview(interview_id)
        .await
        .context("failed to load interview")?;
    ctx.emit(&details, |d| {
        println!("{} ({})", d.id, d.status);
        if let Some(role) = &d.target_role {
            println!("Role: {role}");
        }
        if let Some(kind) = &d.interview_type {
            println!("Type: {kind}");
        }
        if let Some(url) = &d.conversation_url {
            println!("Link: {url}");
        }
        println!("Duration: {}s", d.duration);
    })
}

pub async fn end(ctx: &Ctx, interview_id: &str) -> Result<()> {
    if let Err(e) = ctx.api.end_interview(interview_id).await {
        warn!(%interview_id, "failed to end interview: {e}");
    }
    let feedback = ctx
        .api
        .interview_feedback(interview_id)
        .await
        .unwrap_or_else(|e| {
            warn!(%interview_id, "feedback unavailable, showing sample: {e}");
            sample_feedback(interview_id)
        });
    ctx.emit(&feedback, print_feedback)
}

pub async fn feedback(ctx: &Ctx, interview_id: &str) -> Result<()> {
    let feedback = ctx
        .api
        .interview_feedback(interview_id)
        .await
        .context("failed to load feedback")?;
    ctx.emit(&feedback, print_feedback)
}

fn print_feedback(feedback: &InterviewFeedback) {
    println!(
        "Overall score: {} {}",
        feedback.overall_score,
        bar(feedback.overall_score, 20)
    );
    for category in &feedback.categories {
        println!("  {:<20} {:>3}  {}", category.name, category.score, category.feedback);
    }
    if !feedback.strengths.is_empty() {
        println!("\nStrengths:");
        for s in &feedback.strengths {
            println!("  + {s}");
        }
    }
    if !feedback.improvements.is_empty() {
        println!("\nTo improve:");
        for s in &feedback.improvements {
            println!("  - {s}");
        }
    }
    if !feedback.recommended_practice.is_empty() {
        println!("\nRecommended practice:");
        for p in &feedback.recommended_practice {
            println!("  * {} ({})", p.title, p.kind);
        }
    }
}
