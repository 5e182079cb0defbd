//! Skill gate and registry.
//!
//! A skill is a named, gated, composite behavior built from primitive
//! commands. The registry maps names to behaviors with optional unlock
//! requirements; the gate decides eligibility from a progress snapshot and
//! never throws — rejection is a reason string, not an error.

mod builtin;

pub use builtin::{MarchSkill, SurveySkill};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::navigator::Navigator;
use crate::progress::PlayerProgress;

/// Tri-state result of a skill dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillOutcome {
    /// The behavior ran and queued its work.
    Done,
    /// The behavior ran but could not act; carries the reason.
    Blocked(String),
    /// The gate refused the skill; carries the reason.
    Locked(String),
}

impl SkillOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillOutcome::Done => "done",
            SkillOutcome::Blocked(_) => "blocked",
            SkillOutcome::Locked(_) => "locked",
        }
    }
}

/// Everything a behavior may reach during invocation.
pub struct SkillContext<'a> {
    pub navigator: &'a Navigator,
}

/// A scripted behavior dispatched through the gate.
#[async_trait]
pub trait SkillBehavior: Send + Sync {
    async fn invoke(&self, ctx: SkillContext<'_>, args: &[String]) -> SkillOutcome;
}

/// Unlock requirement attached to a skill.
///
/// Eligibility needs `level >= min_level` and, when a flag is named, that
/// flag set. Membership in the actor's explicit unlock set bypasses both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRequirement {
    pub min_level: u32,
    pub flag: Option<String>,
}

impl SkillRequirement {
    pub fn level(min_level: u32) -> Self {
        Self {
            min_level,
            flag: None,
        }
    }

    pub fn level_and_flag(min_level: u32, flag: impl Into<String>) -> Self {
        Self {
            min_level,
            flag: Some(flag.into()),
        }
    }
}

/// Registry entry: name, behavior, requirement, and display metadata.
#[derive(Clone)]
pub struct SkillDescriptor {
    pub name: String,
    pub description: String,
    pub requirement: Option<SkillRequirement>,
    pub behavior: Arc<dyn SkillBehavior>,
}

impl SkillDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        requirement: Option<SkillRequirement>,
        behavior: Arc<dyn SkillBehavior>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            requirement,
            behavior,
        }
    }
}

/// Gate decision for one skill and one progress snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillCheck {
    Ok,
    Denied { reason: String },
}

/// Name-keyed skill registry.
#[derive(Default)]
pub struct SkillRegistry {
    entries: HashMap<String, SkillDescriptor>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a skill by name.
    pub fn register(&mut self, descriptor: SkillDescriptor) {
        self.entries.insert(descriptor.name.clone(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&SkillDescriptor> {
        self.entries.get(name)
    }

    /// Registered skill names, sorted for stable display.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Decide eligibility from a progress snapshot.
    ///
    /// Order: unregistered names are `"unknown"`; a skill without a
    /// requirement always passes; an explicit unlock overrides level and
    /// flag checks unconditionally; otherwise the level is checked before
    /// the flag so the reason names the first unmet requirement.
    pub fn check(&self, name: &str, progress: &PlayerProgress) -> SkillCheck {
        let Some(entry) = self.entries.get(name) else {
            return SkillCheck::Denied {
                reason: "unknown".into(),
            };
        };

        let Some(requirement) = &entry.requirement else {
            return SkillCheck::Ok;
        };

        if progress.unlocked_skills.contains(name) {
            return SkillCheck::Ok;
        }

        if progress.level < requirement.min_level {
            return SkillCheck::Denied {
                reason: format!("requires level {}", requirement.min_level),
            };
        }

        if let Some(flag) = &requirement.flag
            && !progress.flag(flag)
        {
            return SkillCheck::Denied {
                reason: format!("requires {flag}"),
            };
        }

        SkillCheck::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopSkill;

    #[async_trait]
    impl SkillBehavior for NoopSkill {
        async fn invoke(&self, _ctx: SkillContext<'_>, _args: &[String]) -> SkillOutcome {
            SkillOutcome::Done
        }
    }

    fn registry_with(requirement: Option<SkillRequirement>) -> SkillRegistry {
        let mut registry = SkillRegistry::new();
        registry.register(SkillDescriptor::new(
            "march",
            "advance along a scanned direction",
            requirement,
            Arc::new(NoopSkill),
        ));
        registry
    }

    #[test]
    fn unregistered_skill_is_unknown() {
        let registry = SkillRegistry::new();
        assert_eq!(
            registry.check("march", &PlayerProgress::new()),
            SkillCheck::Denied {
                reason: "unknown".into()
            }
        );
    }

    #[test]
    fn no_requirement_always_passes() {
        let registry = registry_with(None);
        assert_eq!(
            registry.check("march", &PlayerProgress::new()),
            SkillCheck::Ok
        );
    }

    #[test]
    fn low_level_names_the_level() {
        let registry = registry_with(Some(SkillRequirement::level(5)));
        assert_eq!(
            registry.check("march", &PlayerProgress::new()),
            SkillCheck::Denied {
                reason: "requires level 5".into()
            }
        );
    }

    #[test]
    fn missing_flag_names_the_flag() {
        let registry = registry_with(Some(SkillRequirement::level_and_flag(1, "scout")));
        assert_eq!(
            registry.check("march", &PlayerProgress::new()),
            SkillCheck::Denied {
                reason: "requires scout".into()
            }
        );
    }

    #[test]
    fn level_and_flag_together_pass() {
        let registry = registry_with(Some(SkillRequirement::level_and_flag(2, "scout")));
        let mut progress = PlayerProgress::new();
        progress.level = 2;
        progress.set_flag("scout", true);
        assert_eq!(registry.check("march", &progress), SkillCheck::Ok);
    }

    #[test]
    fn explicit_unlock_overrides_everything() {
        let registry = registry_with(Some(SkillRequirement::level_and_flag(99, "veteran")));
        let mut progress = PlayerProgress::new();
        progress.unlock("march");

        // Level 1, no flag: the unlock set alone decides.
        assert_eq!(registry.check("march", &progress), SkillCheck::Ok);
    }
}
