//! Assembles the navigator used by front-ends.
use std::sync::Arc;

use anyhow::Result;

use client_chain_core::WorldTransport;
use runtime::{
    FileProgressRepository, MarchSkill, Navigator, ScanSource, SkillDescriptor, SkillRequirement,
    SurveySkill,
};

use crate::config::ClientConfig;
use crate::session::resolve_save_dir;

/// Built-in skill set every client starts with.
///
/// `march` is available from level 1; `survey` demonstrates the gated path
/// (level 2 plus the `scout` flag, or an explicit unlock).
pub fn default_skills() -> Vec<SkillDescriptor> {
    vec![
        SkillDescriptor::new(
            "march",
            "advance up to five safe columns in a direction",
            Some(SkillRequirement::level(1)),
            Arc::new(MarchSkill),
        ),
        SkillDescriptor::new(
            "survey",
            "force a fresh scan of a direction",
            Some(SkillRequirement::level_and_flag(2, "scout")),
            Arc::new(SurveySkill),
        ),
    ]
}

/// Build a navigator with file-backed progress and the default skills.
pub async fn build_navigator(
    config: &ClientConfig,
    transport: impl WorldTransport + 'static,
    scan_source: impl ScanSource + 'static,
) -> Result<Navigator> {
    let save_dir = resolve_save_dir(config);
    tracing::debug!("Progress directory: {}", save_dir.display());
    let repository = FileProgressRepository::new(&save_dir)?;

    let mut builder = Navigator::builder()
        .actor(&config.actor)
        .config(config.nav_config())
        .transport(transport)
        .scan_source(scan_source)
        .progress_repository(repository);

    for descriptor in default_skills() {
        builder = builder.register_skill(descriptor);
    }

    let navigator = builder.build().await?;
    tracing::info!("Navigator ready for actor '{}'", navigator.actor());
    Ok(navigator)
}
