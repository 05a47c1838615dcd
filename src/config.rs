use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env if present; real env vars always win.
        dotenvy::dotenv().ok();

        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "eduquiz-local".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if the connection string still points at a local default
    pub fn validate_for_production(&self) {
        if self.mongo_conn_string == "mongodb://localhost:27017" {
            panic!(
                "FATAL: MONGO_CONN_STRING is using the local default! Set MONGO_CONN_STRING environment variable."
            );
        }

        if self.mongo_db_name == "eduquiz-local" {
            panic!(
                "FATAL: MONGO_DB_NAME is using the local default! Set MONGO_DB_NAME environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "eduquiz-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
        }
    }
}
