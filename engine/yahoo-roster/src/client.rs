use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, info};
use upgrade_core::{Player, PositionType, ProviderError, RosterProvider};

const PROVIDER: &str = "yahoo";
const BASE_URL: &str = "https://fantasysports.yahooapis.com/fantasy/v2";

/// Yahoo Fantasy API client scoped to one league
///
/// Yahoo's JSON nests every record as an array of single-field attribute
/// objects under index-string keys, so responses are traversed as
/// `serde_json::Value` and the attribute objects merged per record rather
/// than deserialized into fixed structs.
pub struct YahooRosterClient {
    client: reqwest::Client,
    token: String,
    league_key: String,
    base_url: String,
}

impl YahooRosterClient {
    /// Create a client for `league_key` using a pre-obtained bearer token
    pub fn new(token: impl Into<String>, league_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ProviderError::unavailable(PROVIDER, e.to_string()))?;

        Ok(Self {
            client,
            token: token.into(),
            league_key: league_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    async fn fetch(&self, url: &str) -> Result<Value, ProviderError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| ProviderError::unavailable(PROVIDER, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::unavailable(
                PROVIDER,
                format!("request to {url} failed with status {status}"),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::bad_response(PROVIDER, e.to_string()))
    }

    /// Find the team key of the team owned by the logged-in user
    async fn my_team_key(&self) -> Result<String, ProviderError> {
        let url = format!("{}/league/{}/teams?format=json", self.base_url, self.league_key);
        let body = self.fetch(&url).await?;

        parse_my_team_key(&body).ok_or_else(|| {
            ProviderError::bad_response(PROVIDER, "no team owned by the current login")
        })
    }
}

#[async_trait]
impl RosterProvider for YahooRosterClient {
    async fn my_roster(&self) -> Result<Vec<Player>, ProviderError> {
        let team_key = self.my_team_key().await?;
        let url = format!("{}/team/{}/roster/players?format=json", self.base_url, team_key);
        let body = self.fetch(&url).await?;

        let players = parse_pitchers(&body);
        info!("Fetched {} pitchers from my roster", players.len());
        Ok(players)
    }

    async fn available_players(&self) -> Result<Vec<Player>, ProviderError> {
        let url = format!(
            "{}/league/{}/players;status=A?format=json",
            self.base_url, self.league_key
        );
        let body = self.fetch(&url).await?;

        let players = parse_pitchers(&body);
        info!("Fetched {} available pitchers", players.len());
        Ok(players)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

/// Collect every value stored under `key` anywhere in the tree
fn collect_nodes<'a>(value: &'a Value, key: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(obj) => {
            for (k, v) in obj {
                if k == key {
                    out.push(v);
                }
                collect_nodes(v, key, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_nodes(item, key, out);
            }
        }
        _ => {}
    }
}

/// Flatten a record's nested attribute-object arrays into one map
fn merge_attrs(value: &Value, merged: &mut Map<String, Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                merge_attrs(item, merged);
            }
        }
        Value::Object(obj) => {
            for (k, v) in obj {
                merged.insert(k.clone(), v.clone());
            }
        }
        _ => {}
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
        Value::String(s) => s == "1",
        _ => false,
    }
}

/// Extract the team key of the team flagged as owned by the current login
fn parse_my_team_key(body: &Value) -> Option<String> {
    let mut nodes = Vec::new();
    collect_nodes(body, "team", &mut nodes);

    for node in nodes {
        let mut merged = Map::new();
        merge_attrs(node, &mut merged);

        let owned = merged.get("is_owned_by_current_login").map(is_truthy).unwrap_or(false);
        if owned {
            if let Some(key) = merged.get("team_key").and_then(Value::as_str) {
                return Some(key.to_string());
            }
        }
    }

    None
}

/// Extract every pitcher record from a roster or player-list response
fn parse_pitchers(body: &Value) -> Vec<Player> {
    let mut nodes = Vec::new();
    collect_nodes(body, "player", &mut nodes);

    let mut players = Vec::new();
    for node in nodes {
        let mut merged = Map::new();
        merge_attrs(node, &mut merged);

        let Some(name) = merged
            .get("name")
            .and_then(|n| n.get("full"))
            .and_then(Value::as_str)
        else {
            continue;
        };

        let position_type = merged
            .get("position_type")
            .and_then(Value::as_str)
            .map(PositionType::from_code)
            .unwrap_or(PositionType::Other);

        // Only pitchers matter downstream; batters are dropped here
        if position_type != PositionType::Pitcher {
            continue;
        }

        let position = merged
            .get("display_position")
            .and_then(Value::as_str)
            .unwrap_or_default();

        players.push(Player::new(name, position, position_type));
    }

    players
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn player_node(name: &str, position: &str, position_type: &str) -> Value {
        json!([[
            { "player_key": "431.p.1" },
            { "name": { "full": name, "first": "", "last": "" } },
            { "display_position": position },
            { "position_type": position_type }
        ]])
    }

    #[test]
    fn test_parse_pitchers_from_indexed_players_map() {
        let body = json!({
            "fantasy_content": {
                "league": [
                    { "league_key": "431.l.1234" },
                    {
                        "players": {
                            "0": { "player": player_node("Gerrit Cole", "SP", "P") },
                            "1": { "player": player_node("Aaron Judge", "OF", "B") },
                            "2": { "player": player_node("Michael King", "SP,RP", "P") },
                            "count": 3
                        }
                    }
                ]
            }
        });

        let players = parse_pitchers(&body);

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Gerrit Cole");
        assert_eq!(players[0].position, "SP");
        assert_eq!(players[1].name, "Michael King");
        assert_eq!(players[1].position, "SP,RP");
    }

    #[test]
    fn test_player_without_name_is_skipped() {
        let body = json!({
            "players": {
                "0": { "player": [[ { "display_position": "SP" }, { "position_type": "P" } ]] },
                "count": 1
            }
        });

        assert!(parse_pitchers(&body).is_empty());
    }

    #[test]
    fn test_parse_my_team_key_picks_owned_team() {
        let body = json!({
            "fantasy_content": {
                "league": [
                    { "league_key": "431.l.1234" },
                    {
                        "teams": {
                            "0": { "team": [[
                                { "team_key": "431.l.1234.t.1" },
                                { "name": "Someone Else" }
                            ]]},
                            "1": { "team": [[
                                { "team_key": "431.l.1234.t.7" },
                                { "name": "My Team" },
                                { "is_owned_by_current_login": 1 }
                            ]]},
                            "count": 2
                        }
                    }
                ]
            }
        });

        assert_eq!(parse_my_team_key(&body).as_deref(), Some("431.l.1234.t.7"));
    }

    #[test]
    fn test_parse_my_team_key_none_when_no_owned_team() {
        let body = json!({
            "teams": {
                "0": { "team": [[ { "team_key": "431.l.1234.t.1" } ]] },
                "count": 1
            }
        });

        assert_eq!(parse_my_team_key(&body), None);
    }

    #[test]
    fn test_truthy_handles_yahoo_flag_encodings() {
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("1")));
        assert!(is_truthy(&json!(true)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!(null)));
    }
}
