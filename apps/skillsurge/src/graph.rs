//! Skill graph layout: radial node placement grouped by category, edge list
//! and summary stats.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::models::Skill;

pub const CENTER_X: f64 = 400.0;
pub const CENTER_Y: f64 = 300.0;
const INNER_RADIUS: f64 = 180.0;
const RING_STEP: f64 = 60.0;
const MAX_SPREAD_DEG: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn from_level(level: u8) -> Self {
        match level {
            80..=u8::MAX => Proficiency::Expert,
            60..=79 => Proficiency::Advanced,
            40..=59 => Proficiency::Intermediate,
            _ => Proficiency::Beginner,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: String,
    pub name: String,
    pub category: String,
    pub level: u8,
    /// Degrees, measured from the positive x axis.
    pub angle: f64,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub same_category: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphSummary {
    pub total: usize,
    pub average_level: u32,
    pub strong: usize,
    pub weak: usize,
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillGraph {
    pub nodes: Vec<NodePosition>,
    pub edges: Vec<Edge>,
    pub summary: GraphSummary,
}

impl SkillGraph {
    pub fn build(skills: &[Skill]) -> Self {
        Self {
            nodes: layout(skills),
            edges: edges(skills),
            summary: summarize(skills),
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodePosition> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Categories in order of first appearance.
pub fn categories(skills: &[Skill]) -> Vec<&str> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| s.category.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

/// Each category owns an equal arc. Skills in a category fan out around the
/// arc's start, alternating between two rings; the spread is capped so the
/// fan never leaves the arc.
pub fn layout(skills: &[Skill]) -> Vec<NodePosition> {
    let categories = categories(skills);
    if categories.is_empty() {
        return Vec::new();
    }
    let arc = 360.0 / categories.len() as f64;

    let mut members: HashMap<&str, Vec<&Skill>> = HashMap::new();
    for skill in skills {
        members.entry(skill.category.as_str()).or_default().push(skill);
    }

    let mut nodes = Vec::with_capacity(skills.len());
    for (i, category) in categories.iter().enumerate() {
        let group = members.get(category).map(Vec::as_slice).unwrap_or_default();
        let n = group.len() as f64;
        let base = i as f64 * arc;
        let spread = MAX_SPREAD_DEG.min(arc / n);

        for (k, skill) in group.iter().enumerate() {
            let offset = (k as f64 - (n - 1.0) / 2.0) * spread;
            let angle = base + offset;
            let radius = INNER_RADIUS + (k % 2) as f64 * RING_STEP;
            let rad = angle.to_radians();
            nodes.push(NodePosition {
                id: skill.id.clone(),
                name: skill.name.clone(),
                category: skill.category.clone(),
                level: skill.level,
                angle,
                radius,
                x: CENTER_X + rad.cos() * radius,
                y: CENTER_Y + rad.sin() * radius,
                size: node_size(skill.level),
                proficiency: Proficiency::from_level(skill.level),
            });
        }
    }
    nodes
}

pub fn node_size(level: u8) -> f64 {
    50.0 + f64::from(level) / 100.0 * 30.0
}

/// Undirected edges from each skill's `connections`, one per pair. Links to
/// ids outside the list are dropped.
pub fn edges(skills: &[Skill]) -> Vec<Edge> {
    let by_id: HashMap<&str, &Skill> = skills.iter().map(|s| (s.id.as_str(), s)).collect();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut out = Vec::new();

    for skill in skills {
        for target_id in &skill.connections {
            let Some(target) = by_id.get(target_id.as_str()) else {
                continue;
            };
            if target.id == skill.id {
                continue;
            }
            let key = if skill.id <= target.id {
                (skill.id.as_str(), target.id.as_str())
            } else {
                (target.id.as_str(), skill.id.as_str())
            };
            if !seen.insert(key) {
                continue;
            }
            out.push(Edge {
                from: skill.id.clone(),
                to: target.id.clone(),
                same_category: skill.category == target.category,
            });
        }
    }
    out
}

pub fn summarize(skills: &[Skill]) -> GraphSummary {
    let total = skills.len();
    let sum: u32 = skills.iter().map(|s| u32::from(s.level)).sum();
    let mut by_category = BTreeMap::new();
    for skill in skills {
        *by_category.entry(skill.category.clone()).or_insert(0) += 1;
    }

    GraphSummary {
        total,
        average_level: if total == 0 {
            0
        } else {
            (f64::from(sum) / total as f64).round() as u32
        },
        strong: skills.iter().filter(|s| s.level >= 70).count(),
        weak: skills.iter().filter(|s| s.level < 50).count(),
        by_category,
    }
}
