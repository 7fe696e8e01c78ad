//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, QueryArgs};
use crate::config::HarvestConfig;
use crate::connector::HarvestConnector;
use crate::error::{Error, Result};
use crate::router::{self, Structure};
use crate::types::{Operation, QueryRequest};
use serde::Serialize;
use serde_json::json;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Count(args) => {
                let count = self.connector()?.count(&build_request(args)).await?;
                self.print(&json!({ "count": count }))
            }
            Commands::Retrieve(args) => {
                let record = self.connector()?.retrieve(&build_request(args)).await?;
                self.print(&record)
            }
            Commands::Search(args) => {
                let list = self.connector()?.search(&build_request(args)).await?;
                self.print(&list)
            }
            Commands::Structures => self.structures(),
        }
    }

    /// Load configuration from `--config-json` or `--config`
    fn load_config(&self) -> Result<HarvestConfig> {
        if let Some(inline) = &self.cli.config_json {
            return HarvestConfig::from_json_str(inline);
        }
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config not specified (use -C or --config-json)"))?;
        HarvestConfig::from_file(path)
    }

    fn connector(&self) -> Result<HarvestConnector> {
        let config = self.load_config()?;
        if self.cli.verbose {
            eprintln!("Using {config:?}");
        }
        HarvestConnector::new(config)
    }

    fn structures(&self) -> Result<()> {
        let structures: Vec<_> = HarvestConnector::structures()
            .map(|structure: Structure| {
                let operations: Vec<&str> =
                    [Operation::Count, Operation::Retrieve, Operation::Search]
                        .into_iter()
                        .filter(|op| router::supports(structure, *op))
                        .map(|op| op.as_str())
                        .collect();
                json!({ "name": structure.name(), "operations": operations })
            })
            .collect();
        self.print(&structures)
    }

    fn print<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{output}");
        Ok(())
    }
}

/// Turn CLI arguments into a query request
pub fn build_request(args: &QueryArgs) -> QueryRequest {
    let mut request = QueryRequest::new(args.structure.clone())
        .query(args.query.clone())
        .fields(args.fields.iter().cloned());
    for (name, value) in &args.params {
        request = request.parameter(name.clone(), value.clone());
    }
    for (key, value) in &args.metadata {
        request = request.metadata(key.clone(), value.clone());
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_build_request() {
        let args = QueryArgs {
            structure: "Projects".to_string(),
            query: r#"projects?is_active=<%=parameter["Active"]%>"#.to_string(),
            params: vec![("Active".to_string(), "true".to_string())],
            fields: vec!["id".to_string(), "name".to_string()],
            metadata: vec![("page".to_string(), "3".to_string())],
        };

        let request = build_request(&args);
        assert_eq!(request.structure, "Projects");
        assert_eq!(request.get_parameter("Active"), Some("true"));
        assert_eq!(request.fields, vec!["id", "name"]);
        assert_eq!(request.metadata.get("page").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_missing_config() {
        let cli = Cli::try_parse_from(["solidafy-harvest", "count", "-s", "Clients"]).unwrap();
        let err = Runner::new(cli).load_config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_inline_config() {
        let cli = Cli::try_parse_from([
            "solidafy-harvest",
            "--config-json",
            r#"{"access_token": "tok", "account_id": "1"}"#,
            "structures",
        ])
        .unwrap();
        let config = Runner::new(cli).load_config().unwrap();
        assert_eq!(config.account_id.as_deref(), Some("1"));
    }
}
