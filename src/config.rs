//! Environment-driven configuration. Every value has a default aimed at a
//! local stack; only values come from the environment, never wiring.

use crate::handlers::InvokerMode;
use crate::llm::GenerationParams;
use crate::storage::StorageBackend;
use crate::vector::VectorBackend;
use std::env;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub vector: VectorConfig,
    pub storage: StorageConfig,
    pub invoker: InvokerConfig,
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// OpenAI-compatible base URL for the classification chat model.
    pub chat_base_url: String,
    pub chat_model: String,
    /// Llama-style invocation endpoint for answer generation.
    pub completion_url: String,
    pub generation: GenerationParams,
}

#[derive(Debug, Clone)]
pub struct VectorConfig {
    pub backend: VectorBackend,
    /// OpenSearch-compatible cluster URL (http backend only).
    pub url: String,
    pub embedding_base_url: String,
    pub embedding_model: String,
    /// Retrieval depth per query.
    pub top_k: usize,
    /// Timeout applied to the bulk indexing call.
    pub bulk_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory for the filesystem object store.
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct InvokerConfig {
    pub mode: InvokerMode,
    /// Base URL of the host serving `/invoke/{function}` (http mode only).
    pub base_url: String,
}

/// Function names for the static label -> handler table, plus the CORS
/// origin the classifier stamps on its responses.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub classifier_function: String,
    pub feature_function: String,
    pub insight_function: String,
    pub competitive_function: String,
    pub ingest_function: String,
    pub allowed_origin: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
            },
            model: ModelConfig {
                chat_base_url: env::var("CHAT_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
                chat_model: env::var("CHAT_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
                completion_url: env::var("COMPLETION_URL")
                    .unwrap_or_else(|_| "http://localhost:8000/generate".to_string()),
                generation: GenerationParams {
                    max_gen_len: env::var("MAX_GEN_LEN")
                        .unwrap_or_else(|_| "512".to_string())
                        .parse()?,
                    temperature: env::var("TEMPERATURE")
                        .unwrap_or_else(|_| "0.5".to_string())
                        .parse()?,
                    top_p: env::var("TOP_P")
                        .unwrap_or_else(|_| "0.9".to_string())
                        .parse()?,
                },
            },
            vector: VectorConfig {
                backend: VectorBackend::from_env(),
                url: env::var("VECTOR_URL")
                    .unwrap_or_else(|_| "http://localhost:9200".to_string()),
                embedding_base_url: env::var("EMBEDDING_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "nomic-embed-text".to_string()),
                top_k: env::var("TOP_K")
                    .unwrap_or_else(|_| "4".to_string())
                    .parse()?,
                bulk_timeout_secs: env::var("BULK_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()?,
            },
            storage: StorageConfig {
                backend: StorageBackend::from_env(),
                data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            },
            invoker: InvokerConfig {
                mode: InvokerMode::from_env(),
                base_url: env::var("INVOKER_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            },
            routing: RoutingConfig {
                classifier_function: env::var("CLASSIFIER_FUNCTION")
                    .unwrap_or_else(|_| "classifier".to_string()),
                feature_function: env::var("FEATURE_FUNCTION")
                    .unwrap_or_else(|_| "feature-inference".to_string()),
                insight_function: env::var("INSIGHT_FUNCTION")
                    .unwrap_or_else(|_| "insight-inference".to_string()),
                competitive_function: env::var("COMPETITIVE_FUNCTION")
                    .unwrap_or_else(|_| "competitive-inference".to_string()),
                ingest_function: env::var("INGEST_FUNCTION")
                    .unwrap_or_else(|_| "ingest".to_string()),
                allowed_origin: env::var("ALLOWED_ORIGIN")
                    .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            },
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            chat_base_url: "http://localhost:11434/v1".to_string(),
            chat_model: "llama3.2".to_string(),
            completion_url: "http://localhost:8000/generate".to_string(),
            generation: GenerationParams::default(),
        }
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            backend: VectorBackend::default(),
            url: "http://localhost:9200".to_string(),
            embedding_base_url: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            top_k: 4,
            bulk_timeout_secs: 60,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            mode: InvokerMode::default(),
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            classifier_function: "classifier".to_string(),
            feature_function: "feature-inference".to_string(),
            insight_function: "insight-inference".to_string(),
            competitive_function: "competitive-inference".to_string(),
            ingest_function: "ingest".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
        }
    }
}
