use std::env;

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;

use faceit::catalog::Kind;
use faceit::error::EnvVarError;
use faceit::{FaceitClient, Operation, Params, Value};

const API_KEY_VAR: &str = "FACEIT_API_KEY";

#[derive(Parser, Debug)]
#[command(name = "faceit", about = "Query the FACEIT data api")]
pub enum Cmd {
    /// Search players by nickname.
    SearchPlayers {
        #[arg(long)]
        nickname: String,
        #[arg(long)]
        game: Option<String>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Invoke any operation, e.g. `call players.history player_id=... game=csgo`.
    Call {
        operation: Operation,
        /// `key=value` pairs; list parameters take comma-separated values.
        params: Vec<String>,
    },
    /// Print every operation with its path and parameters.
    Operations,
}

fn client() -> anyhow::Result<FaceitClient> {
    let api_key = env::var(API_KEY_VAR).map_err(|e| EnvVarError::new(API_KEY_VAR, e))?;
    Ok(FaceitClient::new(api_key)?)
}

/// Parses `key=value` arguments against the parameters `operation` declares.
fn parse_params(operation: Operation, args: &[String]) -> anyhow::Result<Params> {
    let mut params = Params::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("expected key=value, got `{arg}`");
        };
        let is_list = operation
            .endpoint()
            .params
            .iter()
            .any(|p| p.name == key && p.kind == Kind::ArrayOfString)
            || key == "expanded";
        let value = if is_list {
            Value::List(
                value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            )
        } else {
            Value::from(value)
        };
        params.set(key, value);
    }
    Ok(params)
}

fn print(body: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

impl Cmd {
    pub async fn run(self) -> anyhow::Result<()> {
        match self {
            Cmd::SearchPlayers {
                nickname,
                game,
                country,
                offset,
                limit,
            } => {
                let params = Params::new()
                    .with("nickname", nickname)
                    .with_opt("game", game)
                    .with_opt("country", country)
                    .with_opt("offset", offset)
                    .with_opt("limit", limit);
                let body = client()?.search().players(&params).await?;
                print(&body)?;
            }
            Cmd::Call { operation, params } => {
                let params = parse_params(operation, &params)?;
                let body = client()?
                    .call(operation, &params)
                    .await
                    .with_context(|| format!("{operation} failed"))?;
                print(&body)?;
            }
            Cmd::Operations => {
                let operations: Vec<serde_json::Value> = Operation::ALL
                    .iter()
                    .map(|op| json!({ "operation": op.name(), "endpoint": op.endpoint() }))
                    .collect();
                print(&serde_json::Value::Array(operations))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_params() {
        let params = parse_params(
            Operation::ChampionshipsShow,
            &args(&["championship_id=c1", "expanded=organizer,game"]),
        )
        .unwrap();

        assert_eq!(params.get("championship_id"), Some(&Value::from("c1")));
        assert_eq!(
            params.get("expanded"),
            Some(&Value::List(vec!["organizer".into(), "game".into()]))
        );
    }

    #[test]
    fn test_parse_params_keeps_equals_in_values() {
        let params = parse_params(Operation::SearchTeams, &args(&["nickname=a=b"])).unwrap();
        assert_eq!(params.get("nickname"), Some(&Value::from("a=b")));
    }

    #[test]
    fn test_parse_params_rejects_bare_words() {
        assert!(parse_params(Operation::GamesShow, &args(&["csgo"])).is_err());
    }

    #[test]
    fn test_cli_parses_operation_names() {
        let cmd = Cmd::try_parse_from(["faceit", "call", "players.history", "player_id=x"]).unwrap();
        assert!(matches!(
            cmd,
            Cmd::Call { operation: Operation::PlayersHistory, ref params } if params.len() == 1
        ));

        assert!(Cmd::try_parse_from(["faceit", "call", "players.nope"]).is_err());
    }
}
