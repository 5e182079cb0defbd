//! Built-in navigation skills.

use async_trait::async_trait;

use nav_core::Direction;

use super::{SkillBehavior, SkillContext, SkillOutcome};
use crate::navigator::MarchOutcome;

/// `march <direction>` — plan and queue one compound march command.
pub struct MarchSkill;

#[async_trait]
impl SkillBehavior for MarchSkill {
    async fn invoke(&self, ctx: SkillContext<'_>, args: &[String]) -> SkillOutcome {
        let Some(raw) = args.first() else {
            return SkillOutcome::Blocked("march requires a direction".into());
        };
        let direction = match Direction::parse(raw) {
            Ok(direction) => direction,
            Err(err) => return SkillOutcome::Blocked(err.to_string()),
        };

        match ctx.navigator.plan(direction).await {
            Ok(MarchOutcome::Done { .. }) => SkillOutcome::Done,
            Ok(MarchOutcome::Blocked { reason, .. }) => SkillOutcome::Blocked(reason),
            Err(err) => SkillOutcome::Blocked(err.to_string()),
        }
    }
}

/// `survey <direction>` — force a fresh scan and cache its digest.
pub struct SurveySkill;

#[async_trait]
impl SkillBehavior for SurveySkill {
    async fn invoke(&self, ctx: SkillContext<'_>, args: &[String]) -> SkillOutcome {
        let Some(raw) = args.first() else {
            return SkillOutcome::Blocked("survey requires a direction".into());
        };
        let direction = match Direction::parse(raw) {
            Ok(direction) => direction,
            Err(err) => return SkillOutcome::Blocked(err.to_string()),
        };

        match ctx.navigator.refresh_scan(direction).await {
            Some(_) => SkillOutcome::Done,
            None => SkillOutcome::Blocked(format!("no scan output for {direction}")),
        }
    }
}
