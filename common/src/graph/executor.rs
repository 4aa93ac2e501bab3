use crate::error::{IngestError, Result};
use async_trait::async_trait;
use serde_json::json;

/// An open unit of work against the graph database.
#[async_trait]
pub trait GraphSession: Send {
    /// Execute one Cypher statement to completion.
    async fn run(&mut self, statement: &str) -> Result<()>;

    /// Release the session. Must be safe to call after a failed `run`.
    async fn close(&mut self) -> Result<()>;
}

/// Connection factory for the graph database.
#[async_trait]
pub trait GraphDriver: Send + Sync {
    async fn session(&self) -> Result<Box<dyn GraphSession>>;
}

/// Execute the statements one at a time, awaiting each before issuing the
/// next. The first failure aborts the remaining loop; the session is closed
/// on every exit path and the original error is surfaced.
#[tracing::instrument(skip(driver, statements), fields(statement_count = statements.len()))]
pub async fn ingest_statements(driver: &dyn GraphDriver, statements: &[String]) -> Result<usize> {
    let mut session = driver.session().await?;

    let outcome = execute_all(session.as_mut(), statements).await;
    let close_outcome = session.close().await;

    let executed = outcome?;
    close_outcome?;

    tracing::info!(executed, "regulation ingested into the graph");
    Ok(executed)
}

async fn execute_all(session: &mut dyn GraphSession, statements: &[String]) -> Result<usize> {
    for (index, statement) in statements.iter().enumerate() {
        session.run(statement).await?;
        tracing::info!(
            "executed statement {}/{}: {}",
            index + 1,
            statements.len(),
            excerpt(statement, 80)
        );
    }
    Ok(statements.len())
}

fn excerpt(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= limit {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(limit).collect();
        format!("{}...", head)
    }
}

#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Base URL of the database HTTP endpoint (e.g. `http://localhost:7474`).
    pub base_url: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl GraphConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            database: "neo4j".to_string(),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }
}

/// Driver speaking Neo4j's transactional HTTP API. Each statement is sent as
/// its own auto-committed transaction.
pub struct HttpGraphDriver {
    client: reqwest::Client,
    config: GraphConfig,
}

impl HttpGraphDriver {
    pub fn new(config: GraphConfig) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl GraphDriver for HttpGraphDriver {
    async fn session(&self) -> Result<Box<dyn GraphSession>> {
        let commit_url = format!(
            "{}/db/{}/tx/commit",
            self.config.base_url.trim_end_matches('/'),
            self.config.database
        );

        Ok(Box::new(HttpGraphSession {
            client: self.client.clone(),
            commit_url,
            username: self.config.username.clone(),
            password: self.config.password.clone(),
        }))
    }
}

struct HttpGraphSession {
    client: reqwest::Client,
    commit_url: String,
    username: String,
    password: String,
}

#[async_trait]
impl GraphSession for HttpGraphSession {
    async fn run(&mut self, statement: &str) -> Result<()> {
        let body = json!({ "statements": [{ "statement": statement }] });

        let response = self
            .client
            .post(&self.commit_url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(IngestError::Graph(format!(
                "transaction endpoint returned HTTP {}: {}",
                status.as_u16(),
                excerpt(&text, 200)
            )));
        }

        let payload: serde_json::Value = response.json().await?;

        // the endpoint reports statement errors with HTTP 200
        if let Some(first) = payload["errors"].as_array().and_then(|e| e.first()) {
            let code = first["code"].as_str().unwrap_or("unknown");
            let message = first["message"].as_str().unwrap_or("no message");
            return Err(IngestError::Graph(format!("{}: {}", code, message)));
        }

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        // auto-commit transactions hold no server-side state
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    struct RecordingDriver {
        executed: Arc<Mutex<Vec<String>>>,
        closed: Arc<AtomicBool>,
        fail_on: Option<usize>,
    }

    struct RecordingSession {
        executed: Arc<Mutex<Vec<String>>>,
        closed: Arc<AtomicBool>,
        fail_on: Option<usize>,
        count: usize,
    }

    #[async_trait]
    impl GraphDriver for RecordingDriver {
        async fn session(&self) -> Result<Box<dyn GraphSession>> {
            Ok(Box::new(RecordingSession {
                executed: Arc::clone(&self.executed),
                closed: Arc::clone(&self.closed),
                fail_on: self.fail_on,
                count: 0,
            }))
        }
    }

    #[async_trait]
    impl GraphSession for RecordingSession {
        async fn run(&mut self, statement: &str) -> Result<()> {
            if self.fail_on == Some(self.count) {
                return Err(IngestError::Graph("constraint violation".to_string()));
            }
            self.count += 1;
            self.executed.lock().unwrap().push(statement.to_string());
            Ok(())
        }

        async fn close(&mut self) -> Result<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn driver(fail_on: Option<usize>) -> (RecordingDriver, Arc<Mutex<Vec<String>>>, Arc<AtomicBool>) {
        let executed = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        let driver = RecordingDriver {
            executed: Arc::clone(&executed),
            closed: Arc::clone(&closed),
            fail_on,
        };
        (driver, executed, closed)
    }

    #[tokio::test]
    async fn test_statements_execute_in_order() {
        let (driver, executed, closed) = driver(None);
        let statements = vec!["MERGE (a)".to_string(), "MERGE (b)".to_string()];

        let count = ingest_statements(&driver, &statements).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(*executed.lock().unwrap(), statements);
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_statements() {
        let (driver, executed, closed) = driver(Some(1));
        let statements = vec![
            "MERGE (a)".to_string(),
            "MERGE (b)".to_string(),
            "MERGE (c)".to_string(),
        ];

        let err = ingest_statements(&driver, &statements).await.unwrap_err();

        assert!(matches!(err, IngestError::Graph(_)));
        // only the statement before the failure ran
        assert_eq!(executed.lock().unwrap().len(), 1);
        // session still released on the failure path
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_statement_list_is_a_noop() {
        let (driver, executed, closed) = driver(None);
        let count = ingest_statements(&driver, &[]).await.unwrap();

        assert_eq!(count, 0);
        assert!(executed.lock().unwrap().is_empty());
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_excerpt_truncates_long_statements() {
        let long = "M".repeat(200);
        let short = excerpt(&long, 80);
        assert_eq!(short.chars().count(), 83);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_graph_config_defaults_database() {
        let config = GraphConfig::new("http://localhost:7474", "neo4j", "secret");
        assert_eq!(config.database, "neo4j");
        assert_eq!(config.with_database("fire").database, "fire");
    }
}
