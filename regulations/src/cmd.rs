use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "regulations")]
#[command(about = "fire-safety regulation ingestion tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ModelArgs {
    /// Model id for the completion endpoint
    #[arg(long, env = "REGULATIONS_MODEL")]
    model: Option<String>,

    /// Base URL of the completion endpoint
    #[arg(long, env = "REGULATIONS_ENDPOINT")]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a natural-language rule into its normalized schema
    Convert {
        /// Regulation text, e.g. "Fire doors must have a rating of at least EI 60."
        #[arg(short, long)]
        text: String,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Convert a rule and ingest it into the graph database
    Ingest {
        /// Regulation text to ingest
        #[arg(short, long)]
        text: String,

        /// Print the Cypher statements without executing them
        #[arg(long, default_value = "false")]
        dry_run: bool,

        #[command(flatten)]
        model: ModelArgs,

        /// Graph database HTTP endpoint
        #[arg(long, env = "NEO4J_HTTP_URI", default_value = "http://localhost:7474")]
        graph_uri: String,

        /// Graph database user
        #[arg(long, env = "NEO4J_USERNAME", default_value = "neo4j")]
        graph_user: String,

        /// Graph database password
        #[arg(long, env = "NEO4J_PASSWORD")]
        graph_password: Option<String>,

        /// Target database name
        #[arg(long, env = "NEO4J_DATABASE", default_value = "neo4j")]
        database: String,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Convert { text, model } => convert_rule(text, model).await,
            Commands::Ingest {
                text,
                dry_run,
                model,
                graph_uri,
                graph_user,
                graph_password,
                database,
            } => {
                ingest_rule(
                    text,
                    dry_run,
                    model,
                    graph_uri,
                    graph_user,
                    graph_password,
                    database,
                )
                .await
            }
        }
    }
}

fn build_client(args: ModelArgs) -> Result<common::llm::OpenAiClient> {
    use common::llm::{ClientConfig, OpenAiClient};

    let mut config = ClientConfig::from_env().context("completion endpoint credential")?;
    if let Some(model) = args.model {
        config = config.with_model(model);
    }
    if let Some(endpoint) = args.endpoint {
        config = config.with_endpoint(endpoint);
    }

    Ok(OpenAiClient::new(config)?)
}

async fn convert_rule(text: String, model: ModelArgs) -> Result<()> {
    use common::agent::regulation_text_to_schema;
    use common::tracing::init_tracing;

    let _guard = init_tracing("regulations")?;

    tracing::info!("input: \"{}\"", text);

    let client = build_client(model)?;
    let schema = regulation_text_to_schema(&client, &text).await?;

    println!("{}", serde_json::to_string_pretty(&schema)?);

    Ok(())
}

async fn ingest_rule(
    text: String,
    dry_run: bool,
    model: ModelArgs,
    graph_uri: String,
    graph_user: String,
    graph_password: Option<String>,
    database: String,
) -> Result<()> {
    use common::agent::regulation_text_to_schema;
    use common::graph::{ingest_statements, transform_to_cypher, GraphConfig, HttpGraphDriver};
    use common::tracing::init_tracing;

    let _guard = init_tracing("regulations")?;

    tracing::info!("input: \"{}\"", text);

    let client = build_client(model)?;
    let schema = regulation_text_to_schema(&client, &text).await?;

    tracing::info!(
        "generated schema:\n{}",
        serde_json::to_string_pretty(&schema)?
    );

    let statements = transform_to_cypher(&schema);
    tracing::info!("generated {} cypher statement(s)", statements.len());

    if dry_run {
        println!("{}", statements.join("\n---\n"));
        return Ok(());
    }

    let password = graph_password.context("graph database password is required (NEO4J_PASSWORD)")?;
    let config = GraphConfig::new(graph_uri, graph_user, password).with_database(database);
    let driver = HttpGraphDriver::new(config)?;

    let executed = ingest_statements(&driver, &statements).await?;
    tracing::info!("{} statement(s) executed, regulation ingested", executed);

    Ok(())
}
