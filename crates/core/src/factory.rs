//! ComponentFactory: orchestrates extraction, compilation and registry
//! recording.
//!
//! Compilation is pure and synchronous; the only await point is the registry
//! write after a successful compile.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use widgetry_storage::{ComponentRecord, ComponentRegistry};

use crate::compile::{chart, compile_requirements, custom, dashboard, form};
use crate::error::FactoryError;
use crate::extract::extract;
use crate::model::{ChartSpec, ComponentKind, CustomConfig, DashboardConfig, FormConfig};
use crate::resource::{now_rfc3339, ComponentId, UiResource};

/// Namespaces used when minting resource uris.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Namespace for components generated from free text.
    pub described_namespace: String,
    /// Namespace for components compiled from explicit configs.
    pub explicit_namespace: String,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        FactoryConfig {
            described_namespace: "ai".to_string(),
            explicit_namespace: "dynamic".to_string(),
        }
    }
}

pub struct ComponentFactory {
    registry: Arc<dyn ComponentRegistry>,
    config: FactoryConfig,
}

impl ComponentFactory {
    pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self::with_config(registry, FactoryConfig::default())
    }

    pub fn with_config(registry: Arc<dyn ComponentRegistry>, config: FactoryConfig) -> Self {
        ComponentFactory { registry, config }
    }

    /// Describe-in-text generation: extract, compile, record.
    pub async fn generate_from_description(
        &self,
        user_id: &str,
        description: &str,
    ) -> Result<UiResource, FactoryError> {
        check_user(user_id)?;
        if description.trim().is_empty() {
            return Err(FactoryError::InvalidRequest(
                "description is required".to_string(),
            ));
        }
        let requirements = extract(description);
        let id = ComponentId::now(&self.config.described_namespace, requirements.kind, user_id);
        let resource = compile_requirements(&requirements, &id)?;
        self.record(&id, serde_json::to_value(&requirements)?).await?;
        tracing::info!(component_id = %id, kind = %requirements.kind, "generated component from description");
        Ok(resource)
    }

    pub async fn generate_form(
        &self,
        user_id: &str,
        config: &FormConfig,
    ) -> Result<UiResource, FactoryError> {
        let id = self.explicit_id(ComponentKind::Form, user_id)?;
        let resource = form::compile(config, &id)?;
        self.finish(id, serde_json::to_value(config)?, resource).await
    }

    pub async fn generate_dashboard(
        &self,
        user_id: &str,
        config: &DashboardConfig,
    ) -> Result<UiResource, FactoryError> {
        let id = self.explicit_id(ComponentKind::Dashboard, user_id)?;
        let resource = dashboard::compile(config, &id)?;
        self.finish(id, serde_json::to_value(config)?, resource).await
    }

    pub async fn generate_chart(
        &self,
        user_id: &str,
        spec: &ChartSpec,
    ) -> Result<UiResource, FactoryError> {
        let id = self.explicit_id(ComponentKind::Chart, user_id)?;
        let resource = chart::compile(spec, &id)?;
        self.finish(id, serde_json::to_value(spec)?, resource).await
    }

    pub async fn generate_custom(
        &self,
        user_id: &str,
        config: &CustomConfig,
    ) -> Result<UiResource, FactoryError> {
        let id = self.explicit_id(ComponentKind::Custom, user_id)?;
        let resource = custom::compile(config, &id)?;
        self.finish(id, serde_json::to_value(config)?, resource).await
    }

    /// The `{type, config}` recorded for a previously generated component.
    pub async fn component_info(&self, component_id: &str) -> Result<ComponentRecord, FactoryError> {
        Ok(self.registry.get_component(component_id).await?)
    }

    fn explicit_id(&self, kind: ComponentKind, user_id: &str) -> Result<ComponentId, FactoryError> {
        check_user(user_id)?;
        Ok(ComponentId::now(&self.config.explicit_namespace, kind, user_id))
    }

    async fn finish(
        &self,
        id: ComponentId,
        config: serde_json::Value,
        resource: UiResource,
    ) -> Result<UiResource, FactoryError> {
        self.record(&id, config).await?;
        tracing::info!(component_id = %id, kind = %id.kind(), "generated component");
        Ok(resource)
    }

    async fn record(&self, id: &ComponentId, config: serde_json::Value) -> Result<(), FactoryError> {
        self.registry
            .put_component(ComponentRecord {
                component_id: id.as_str().to_string(),
                kind: id.kind().to_string(),
                config,
                created_at: now_rfc3339(),
            })
            .await?;
        Ok(())
    }
}

/// The user id becomes part of the component id and so the last uri segment.
fn check_user(user_id: &str) -> Result<(), FactoryError> {
    if user_id.trim().is_empty() {
        return Err(FactoryError::InvalidRequest("user id is required".to_string()));
    }
    if user_id.contains('/') {
        return Err(FactoryError::InvalidRequest(format!(
            "user id must not contain '/': {:?}",
            user_id
        )));
    }
    Ok(())
}
