use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::catalog::Operation;
use crate::error::Error;
use crate::params::Params;
use crate::request;
use crate::transport::{ReqwestTransport, Transport};

pub const BASE_URL: &str = "https://open.faceit.com/data/v4";

/// Client for the FACEIT data api.
///
/// Holds the api key and the transport for its whole lifetime; build a
/// new client to change either. Calls share no mutable state, so one
/// client can serve any number of concurrent calls.
#[derive(Clone)]
pub struct FaceitClient {
    api_key: String,
    transport: Arc<dyn Transport>,

    #[cfg(test)]
    pub(crate) mock_url: Option<String>,
}

impl FaceitClient {
    /// Client using the bundled reqwest transport.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Ok(Self::with_transport(api_key, ReqwestTransport::new()?))
    }

    pub fn with_transport(api_key: impl Into<String>, transport: impl Transport + 'static) -> Self {
        Self {
            api_key: api_key.into(),
            transport: Arc::new(transport),
            #[cfg(test)]
            mock_url: None,
        }
    }

    #[cfg(test)]
    fn set_mock_url(&mut self, url: String) {
        self.mock_url = Some(url);
    }

    fn base_url(&self) -> &str {
        #[cfg(not(test))]
        let base_url = BASE_URL;
        #[cfg(test)]
        let base_url = self.mock_url.as_deref().unwrap_or(BASE_URL);
        base_url
    }

    /// Validates `params` and builds the url `operation` would request,
    /// without any I/O.
    pub fn build_url(&self, operation: Operation, params: &Params) -> Result<String, Error> {
        Ok(request::prepare(
            self.base_url(),
            operation.endpoint(),
            params,
        )?)
    }

    /// Invokes `operation`. Parameter errors are returned before the
    /// transport is touched.
    pub async fn call(&self, operation: Operation, params: &Params) -> Result<serde_json::Value, Error> {
        let url = self.build_url(operation, params)?;
        debug!("{operation}: {url}");
        self.perform_request(&url).await
    }

    /// Authenticated GET of `url`, returning the decoded body whatever the
    /// status code.
    pub async fn perform_request(&self, url: &str) -> Result<serde_json::Value, Error> {
        if self.api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        let headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", self.api_key)),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];

        let response = self.transport.fetch(url, &headers).await?;
        debug!("GET {url} -> {}", response.status);

        response.json(url).inspect_err(|e| {
            warn!("could not decode response of {url} ({}): {e}", response.status)
        })
    }
}

impl fmt::Debug for FaceitClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceitClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;

    use serde_json::json;

    use crate::api_client::FaceitClient;
    use crate::catalog::Operation;
    use crate::error::Error;
    use crate::params::Params;
    use crate::transport::HttpResponse;

    const PLAYER_ID: &str = "cf5c2089-b4a6-4201-a69b-9fd608429c79";

    type Requests = std::sync::Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>;

    /// Client whose transport records every request and answers `body`.
    fn recording_client(api_key: &str, body: &'static str) -> (FaceitClient, Requests) {
        let requests = Requests::default();
        let recorded = requests.clone();
        let client = FaceitClient::with_transport(api_key, move |url: String, headers: Vec<(String, String)>| {
            recorded.lock().unwrap().push((url, headers));
            async move {
                Ok::<_, Error>(HttpResponse {
                    status: 200,
                    body: body.to_string(),
                })
            }
        });
        (client, requests)
    }

    #[tokio::test]
    async fn test_players_history() {
        let mut client = FaceitClient::new("asdf1234").unwrap();
        let mut server = mockito::Server::new_async().await;
        client.set_mock_url(server.url());

        let json = r###"
            {
              "items": [
                {
                  "match_id": "1-2b6f4f4e-0d4f-4a55-b2d1-6b8a3c3c5f7e",
                  "game_id": "csgo",
                  "region": "EU",
                  "status": "finished"
                }
              ],
              "start": 0,
              "end": 1
            }
        "###;

        let mock = server
            .mock(
                "GET",
                format!("/players/{PLAYER_ID}/history?game=csgo&limit=5").as_str(),
            )
            .match_header("authorization", "Bearer asdf1234")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json)
            .create_async()
            .await;

        let params = Params::new()
            .with("player_id", PLAYER_ID)
            .with("game", "csgo")
            .with("limit", 5);
        let history = client.players().history(&params).await.unwrap();
        mock.assert_async().await;

        assert_eq!(history, serde_json::from_str::<serde_json::Value>(json).unwrap());
        assert_eq!(history["items"][0]["game_id"], "csgo");
    }

    #[tokio::test]
    async fn test_error_bodies_are_returned() {
        let mut client = FaceitClient::new("asdf1234").unwrap();
        let mut server = mockito::Server::new_async().await;
        client.set_mock_url(server.url());

        let json = r#"{"errors":[{"message":"The resource was not found.","code":"err_nf0","http_status":404}]}"#;
        let mock = server
            .mock("GET", "/search/players?nickname=DotJar&game=csgo&country=nl")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(json)
            .create_async()
            .await;

        let params = Params::new()
            .with("nickname", "DotJar")
            .with("game", "csgo")
            .with("country", "nl");
        let res = client.search().players(&params).await.unwrap();
        mock.assert_async().await;

        assert_eq!(res["errors"][0]["http_status"], 404);
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let mut client = FaceitClient::new("asdf1234").unwrap();
        let mut server = mockito::Server::new_async().await;
        client.set_mock_url(server.url());

        let mock = server
            .mock("GET", "/games")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let err = client.games().all(&Params::new()).await.unwrap_err();
        mock.assert_async().await;

        assert!(matches!(err, Error::JSON(_)));
    }

    #[tokio::test]
    async fn test_invalid_params_never_reach_the_network() {
        let mut client = FaceitClient::new("asdf1234").unwrap();
        let mut server = mockito::Server::new_async().await;
        client.set_mock_url(server.url());

        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let params = Params::new()
            .with("player_id", PLAYER_ID)
            .with("game", "csgo")
            .with("limit", "se5drftuyhionjkm");
        let err = client.players().history(&params).await.unwrap_err();
        assert_eq!(err.to_string(), "limit must be of type: Number");

        let err = client.players().history(&Params::new()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ref e) if e.param() == "player_id"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failures_are_passed_through() {
        let client = FaceitClient::with_transport(
            "asdf1234",
            |_: String, _: Vec<(String, String)>| async {
                Err::<HttpResponse, _>(Error::Transport("connection reset".into()))
            },
        );

        let err = client
            .hubs()
            .show(&Params::new().with("hub_id", "h1"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(ref msg) if msg == "connection reset"));
        assert_eq!(err.to_string(), "transport error: connection reset");
    }

    #[tokio::test]
    async fn test_network_errors_are_passed_through() {
        let mut client = FaceitClient::new("asdf1234").unwrap();
        // nothing listens on port 1
        client.set_mock_url("http://127.0.0.1:1".into());

        let err = client.games().all(&Params::new()).await.unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let (client, requests) = recording_client("", "{}");

        let err = client
            .matches()
            .show(&Params::new().with("match_id", "1-abc"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingApiKey));
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_injected_transport() {
        let (client, requests) = recording_client("asdf1234", r#"{"items":[]}"#);

        let params = Params::new()
            .with("game_id", "csgo")
            .with("region", "EU")
            .with("country", "nl")
            .with("limit", 20);
        let first = client.rankings().game(&params).await.unwrap();
        let second = client.rankings().game(&params).await.unwrap();

        assert_eq!(first, json!({"items": []}));
        assert_eq!(first, second);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            client.build_url(Operation::RankingsGame, &params).unwrap(),
            requests[0].0
        );
        assert_eq!(
            requests[0].0,
            "https://open.faceit.com/data/v4/rankings/games/csgo/regions/EU?country=nl&limit=20"
        );
        assert_eq!(requests[0], requests[1]);
        assert_eq!(
            requests[0].1,
            vec![
                ("Authorization".to_string(), "Bearer asdf1234".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_calls_do_not_interfere() {
        let (client, requests) = recording_client("asdf1234", "{}");

        let a = Params::new().with("team_id", "a");
        let b = Params::new().with("team_id", "b").with("game_id", "csgo");
        let (ra, rb) = tokio::join!(client.teams().show(&a), client.teams().stats(&b));
        ra.unwrap();
        rb.unwrap();

        let mut urls: Vec<String> = requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect();
        urls.sort();
        assert_eq!(
            urls,
            vec![
                "https://open.faceit.com/data/v4/teams/a".to_string(),
                "https://open.faceit.com/data/v4/teams/b/stats/csgo".to_string(),
            ]
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let (client, _) = recording_client("asdf1234", "{}");
        let debug = format!("{client:?}");
        assert!(!debug.contains("asdf1234"));
    }
}
