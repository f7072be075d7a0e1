use planboard_core::wire::{RefRecord, SearchRecords};
use planboard_core::{
    default_background, EntityRef, PhaseLink, ProjectSummary, SearchResultSet, TaskLink,
};
use planboard_gateway::Gateway;

use crate::error::ServiceError;

/// Keyword search across projects, phases and tasks.
pub struct SearchService<'a, G: Gateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: Gateway + ?Sized> SearchService<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Search with the keyword exactly as given.
    ///
    /// A null payload means "nothing found" and yields an empty set; gateway
    /// errors still propagate.
    pub async fn general_search(&self, keyword: &str) -> Result<SearchResultSet, ServiceError> {
        let Some(records) = self.gateway.search(keyword).await?.into_data() else {
            tracing::debug!(keyword, "search returned no data");
            return Ok(SearchResultSet::default());
        };
        let results = normalize(records);
        tracing::debug!(keyword, hits = results.len(), "search complete");
        Ok(results)
    }
}

/// Reshape grouped hits. Each category is mapped on its own, in backend order.
pub fn normalize(records: SearchRecords) -> SearchResultSet {
    SearchResultSet {
        projects: records
            .projects
            .into_iter()
            .map(|p| ProjectSummary {
                id: p.id,
                title: p.title,
                background_asset: default_background().to_string(),
            })
            .collect(),
        phases: records
            .phases
            .into_iter()
            .map(|p| PhaseLink {
                id: p.id,
                title: p.title,
                project: entity_ref(p.project),
            })
            .collect(),
        tasks: records
            .tasks
            .into_iter()
            .map(|t| TaskLink {
                id: t.id,
                title: t.title,
                project: entity_ref(t.project),
                phase: entity_ref(t.phase),
            })
            .collect(),
    }
}

fn entity_ref(r: RefRecord) -> EntityRef {
    EntityRef {
        id: r.id,
        title: r.title,
    }
}
