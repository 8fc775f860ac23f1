use config::{Config, Environment};
use dotenv::dotenv;
use once_cell::sync::Lazy;
use serde::Deserialize;

pub static CONFIG: Lazy<QuizineConfig> = Lazy::new(|| {
    dotenv().ok();

    Config::builder()
        .set_default("database_url", "sqlite::memory:")
        .and_then(|builder| {
            builder
                .add_source(Environment::with_prefix("QUIZINE").prefix_separator("__"))
                .build()
        })
        .and_then(|config| config.try_deserialize())
        .unwrap_or_else(|e| panic!("Failed to load configuration: {}", e))
});

#[derive(Debug, Deserialize)]
pub struct QuizineConfig {
    pub database_url: String,
}
