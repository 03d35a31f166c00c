use serde::Serialize;

use crate::constants::METHOD_GET;

use super::{
    category::{Category, CONTRACTS},
    entity::Entity,
};

/// REST contract of a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestEndpoint {
    pub category: Category,
    pub entity_name: String,
    pub object_id: String,
    pub path: String,
    pub methods: &'static [&'static str],
    pub actions: &'static [&'static str],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl RestEndpoint {
    /// Builds the endpoint for an entity, `None` if its category has no contract.
    pub fn for_entity(entity: &Entity) -> Option<Self> {
        let category = entity.category();
        let contract = category.contract()?;
        let options = match category {
            Category::Select => entity.options.clone(),
            _ => Vec::new(),
        };

        Some(Self {
            category,
            entity_name: entity.name.clone(),
            object_id: entity.object_id.clone(),
            path: format!("/{}/{}", contract.slug, entity.object_id),
            methods: contract.methods,
            actions: contract.actions,
            options,
        })
    }

    pub fn supports_get(&self) -> bool {
        self.methods.contains(&METHOD_GET)
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// The REST surface of a device together with the entities left out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestSurface {
    /// Grouped by category in display order, sorted by object id within a group
    pub endpoints: Vec<RestEndpoint>,
    /// In input order
    pub skipped: Vec<Entity>,
}

impl RestSurface {
    pub fn get_capable(&self) -> usize {
        self.endpoints.iter().filter(|ep| ep.supports_get()).count()
    }

    pub fn post_only(&self) -> usize {
        self.endpoints.len() - self.get_capable()
    }

    /// Non-empty endpoint groups in display order
    pub fn groups(&self) -> Vec<(Category, Vec<&RestEndpoint>)> {
        group_by_category(&self.endpoints)
    }
}

/// Non-empty groups in display order. Endpoints keep their relative order
/// within a group, so unsorted input is grouped correctly too.
pub fn group_by_category(endpoints: &[RestEndpoint]) -> Vec<(Category, Vec<&RestEndpoint>)> {
    CONTRACTS
        .iter()
        .map(|(category, _)| {
            let group = endpoints
                .iter()
                .filter(|ep| ep.category == *category)
                .collect::<Vec<_>>();
            (*category, group)
        })
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

/// Maps every entity to its REST endpoint, routing entities without a
/// contract to `skipped`.
pub fn synthesize(entities: &[Entity]) -> RestSurface {
    let mut surface = RestSurface::default();

    for entity in entities {
        match RestEndpoint::for_entity(entity) {
            Some(endpoint) => surface.endpoints.push(endpoint),
            None => {
                log::debug!(
                    "No REST endpoint for '{}' ({}) of kind '{}'",
                    entity.name,
                    entity.object_id,
                    entity.kind
                );
                surface.skipped.push(entity.clone());
            }
        }
    }

    surface.endpoints.sort_by(|a, b| {
        a.category
            .display_rank()
            .cmp(&b.category.display_rank())
            .then_with(|| a.object_id.cmp(&b.object_id))
            .then_with(|| a.entity_name.cmp(&b.entity_name))
    });
    surface
}
