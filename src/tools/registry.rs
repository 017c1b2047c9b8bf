//! Tool registry.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::ValyuClient;
use crate::error::RegistryError;
use crate::tools::builtin::{
    BioSearchTool, EconomicsSearchTool, FinanceSearchTool, PaperSearchTool, PatentSearchTool,
    SecSearchTool, WebSearchTool,
};
use crate::tools::tool::{Tool, ToolCategory};

/// Holds the tools available to one agent session.
///
/// Registration order is preserved: `all()` and `group()` return tools
/// in the order they were registered. Construct one registry per
/// session rather than sharing a process-wide singleton.
pub struct ToolRegistry {
    tools: RwLock<Vec<Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: RwLock::new(Vec::new()),
        }
    }

    /// Register a tool.
    ///
    /// Fails with `DuplicateName` if a tool with the same name is
    /// already present, leaving the registry unchanged.
    pub async fn register(&self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let mut tools = self.tools.write().await;
        if tools.iter().any(|t| t.name() == tool.name()) {
            return Err(RegistryError::DuplicateName(tool.name().to_string()));
        }
        tracing::debug!(tool = tool.name(), category = %tool.category(), "registered tool");
        tools.push(tool);
        Ok(())
    }

    /// Register all seven search tools with their default configurations.
    pub async fn register_search_tools(
        &self,
        client: Arc<ValyuClient>,
    ) -> Result<(), RegistryError> {
        self.register(Arc::new(WebSearchTool::new(client.clone())))
            .await?;
        self.register(Arc::new(FinanceSearchTool::new(client.clone())))
            .await?;
        self.register(Arc::new(PaperSearchTool::new(client.clone())))
            .await?;
        self.register(Arc::new(BioSearchTool::new(client.clone())))
            .await?;
        self.register(Arc::new(PatentSearchTool::new(client.clone())))
            .await?;
        self.register(Arc::new(SecSearchTool::new(client.clone())))
            .await?;
        self.register(Arc::new(EconomicsSearchTool::new(client)))
            .await?;
        Ok(())
    }

    /// Every registered tool, in registration order.
    pub async fn all(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.read().await.clone()
    }

    /// Tools in the given category, preserving registration order.
    /// Returns an empty vector (not an error) when nothing matches.
    pub async fn group(&self, category: ToolCategory) -> Vec<Arc<dyn Tool>> {
        self.tools
            .read()
            .await
            .iter()
            .filter(|t| t.category() == category)
            .cloned()
            .collect()
    }

    /// Look up a tool by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools
            .read()
            .await
            .iter()
            .find(|t| t.name() == name)
            .cloned()
    }

    /// Names of all registered tools, in registration order.
    pub async fn list(&self) -> Vec<String> {
        self.tools
            .read()
            .await
            .iter()
            .map(|t| t.name().to_string())
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::SearchError;
    use crate::tools::tool::ToolOutput;

    struct StubTool {
        name: &'static str,
        category: ToolCategory,
    }

    impl StubTool {
        fn new(name: &'static str, category: ToolCategory) -> Arc<dyn Tool> {
            Arc::new(Self { name, category })
        }
    }

    #[async_trait]
    impl Tool for StubTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "stub"
        }

        fn category(&self) -> ToolCategory {
            self.category
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Query" }
                },
                "required": ["query"]
            })
        }

        async fn execute(&self, _params: serde_json::Value) -> Result<ToolOutput, SearchError> {
            Err(SearchError::Validation("stub".to_string()))
        }
    }

    #[tokio::test]
    async fn all_preserves_registration_order() {
        let registry = ToolRegistry::new();
        registry
            .register(StubTool::new("b", ToolCategory::Search))
            .await
            .unwrap();
        registry
            .register(StubTool::new("a", ToolCategory::Research))
            .await
            .unwrap();
        registry
            .register(StubTool::new("c", ToolCategory::Search))
            .await
            .unwrap();

        assert_eq!(registry.list().await, vec!["b", "a", "c"]);
    }

    #[tokio::test]
    async fn duplicate_name_rejected_and_registry_unchanged() {
        let registry = ToolRegistry::new();
        registry
            .register(StubTool::new("web_search", ToolCategory::Search))
            .await
            .unwrap();

        let err = registry
            .register(StubTool::new("web_search", ToolCategory::Research))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(_)));

        // The pre-existing tool is still there, untouched.
        let survivor = registry.get("web_search").await.unwrap();
        assert_eq!(survivor.category(), ToolCategory::Search);
        assert_eq!(registry.all().await.len(), 1);
    }

    #[tokio::test]
    async fn group_filters_by_category_preserving_order() {
        let registry = ToolRegistry::new();
        registry
            .register(StubTool::new("one", ToolCategory::Financial))
            .await
            .unwrap();
        registry
            .register(StubTool::new("two", ToolCategory::Research))
            .await
            .unwrap();
        registry
            .register(StubTool::new("three", ToolCategory::Financial))
            .await
            .unwrap();

        let financial = registry.group(ToolCategory::Financial).await;
        let names: Vec<_> = financial.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["one", "three"]);
    }

    #[tokio::test]
    async fn group_with_no_match_is_empty_not_error() {
        let registry = ToolRegistry::new();
        registry
            .register(StubTool::new("only", ToolCategory::Search))
            .await
            .unwrap();
        assert!(registry.group(ToolCategory::Research).await.is_empty());
    }

    #[tokio::test]
    async fn get_unknown_tool_is_none() {
        let registry = ToolRegistry::new();
        assert!(registry.get("nope").await.is_none());
    }
}
