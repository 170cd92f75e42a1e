use crate::models::settings::Settings;

use super::gemini::GeminiProvider;
use super::traits::AdvisoryProvider;

/// Ordered list of advisory providers. The first one that answers wins;
/// the rest are fallbacks.
pub struct AdvisorRegistry {
    providers: Vec<Box<dyn AdvisoryProvider>>,
}

impl AdvisorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Registry with every provider the settings have credentials for.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        // Gemini: requires an API key
        if let Some(key) = settings.api_key("gemini") {
            registry.register(Box::new(GeminiProvider::new(
                key.to_string(),
                settings.advisor_model.clone(),
            )));
        }

        registry
    }

    pub fn register(&mut self, provider: Box<dyn AdvisoryProvider>) {
        self.providers.push(provider);
    }

    /// Providers in registration (priority) order.
    pub fn providers(&self) -> impl Iterator<Item = &dyn AdvisoryProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for AdvisorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
