//! `skillsurge graph`

use anyhow::Result;
use tracing::warn;

use skillsurge::demo;
use skillsurge::graph::SkillGraph;
use skillsurge::models::Skill;

use super::{bar, Ctx};

async fn load_skills(ctx: &Ctx, demo_only: bool) -> Result<Vec<Skill>> {
    if demo_only {
        return Ok(demo::profile().graph_skills());
    }
    let user_id = ctx.user_id()?;
    match ctx.api.skill_graph(&user_id).await {
        Ok(resp) if !resp.skills.is_empty() => Ok(resp.skills),
        Ok(_) => Ok(super::profile::load(ctx).await?.graph_skills()),
        Err(e) if ctx.fallback() && !e.requires_login() => {
            warn!("skill graph fetch failed, using demo profile: {e}");
            Ok(demo::profile().graph_skills())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn run(ctx: &Ctx, demo_only: bool) -> Result<()> {
    let skills = load_skills(ctx, demo_only).await?;
    let graph = SkillGraph::build(&skills);

    ctx.emit(&graph, |graph| {
        let s = &graph.summary;
        println!(
            "{} skills, average level {}, {} strong, {} to improve",
            s.total, s.average_level, s.strong, s.weak
        );
        for (category, count) in &s.by_category {
            println!("  {category}: {count}");
        }
        println!();
        for node in &graph.nodes {
            println!(
                "{:<28} {:>3} {} {:<12} ({:>6.1}, {:>6.1})",
                node.name,
                node.level,
                bar(node.level, 10),
                node.proficiency.label(),
                node.x,
                node.y
            );
        }
        if !graph.edges.is_empty() {
            println!("\nConnections:");
            for edge in &graph.edges {
                let from = graph.node(&edge.from).map_or(edge.from.as_str(), |n| n.name.as_str());
                let to = graph.node(&edge.to).map_or(edge.to.as_str(), |n| n.name.as_str());
                let kind = if edge.same_category { "" } else { " (cross-category)" };
                println!("  {from} - {to}{kind}");
            }
        }
    })
}
