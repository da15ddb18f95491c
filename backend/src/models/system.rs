use serde::Serialize;
use utoipa::ToSchema;

use super::ChatResponse;

pub const APP_NAME: &str = "Juriste Virtuel";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    /// A non-empty credential is configured; validity is not checked
    pub provider_configured: bool,
    /// Same as `provider_configured`, kept for existing clients
    pub openai_configured: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointMap {
    pub chat: String,
    pub health: String,
    pub info: String,
}

/// JSON answer of `GET /` for API clients
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceDescriptor {
    pub message: String,
    pub version: String,
    pub status: String,
    pub endpoints: EndpointMap,
}

impl ServiceDescriptor {
    pub fn current() -> Self {
        Self {
            message: format!("API {}", APP_NAME),
            version: APP_VERSION.to_string(),
            status: "active".to_string(),
            endpoints: EndpointMap {
                chat: "/api/chat".to_string(),
                health: "/api/health".to_string(),
                info: "/api/info".to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InfoResponse {
    pub app_name: String,
    pub version: String,
    pub description: String,
    pub features: Vec<String>,
    pub disclaimer: String,
}

impl InfoResponse {
    pub fn current() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            version: APP_VERSION.to_string(),
            description: "Assistant juridique intelligent utilisant l'IA".to_string(),
            features: [
                "Consultation juridique en temps réel",
                "Réponses basées sur le droit français",
                "Interface mobile optimisée",
                "Confidentialité garantie",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            disclaimer: "Cette application fournit des informations juridiques générales à titre \
                         informatif uniquement. Elle ne constitue pas un avis juridique professionnel."
                .to_string(),
        }
    }
}

/// Conversation history. Nothing is stored, so it is always empty.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub history: Vec<ChatResponse>,
    pub message: String,
}
