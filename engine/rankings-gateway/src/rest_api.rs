//! REST API endpoints for the RankingsGateway
//!
//! - `GET /` greeting echoing the request path
//! - `GET /players` the full ranking board, highest value first
//! - `GET /health` liveness check

use crate::config::{GatewayConfig, ResponseConfig};
use crate::error::GatewayResult;
use beer_sheet::{PlayerRanking, RankingBoard};
use serde::Serialize;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use warp::http::{header, HeaderValue, StatusCode};
use warp::reply::Response;
use warp::{Filter, Reply};

/// Players response
#[derive(Serialize)]
pub struct PlayersResponse<'a> {
    pub format: &'a str,
    pub time_updated: String,
    pub rankings: &'a [PlayerRanking],
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub timestamp: String,
}

/// Error detail
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Greeting with the escaped request path
pub fn index(path: warp::path::FullPath) -> String {
    format!("Hello, {:?}", escape_html(path.as_str()))
}

/// Serialize the board into the `/players` body
pub fn players_body(board: &RankingBoard, config: &ResponseConfig) -> GatewayResult<Vec<u8>> {
    let time_updated = if config.legacy_time_updated {
        "now".to_string()
    } else {
        board.built_at().to_rfc3339()
    };

    let response =
        PlayersResponse { format: &config.format, time_updated, rankings: board.rankings() };
    Ok(serde_json::to_vec(&response)?)
}

/// Get every ranking on the board
pub async fn get_players(
    board: Arc<RankingBoard>,
    config: Arc<ResponseConfig>,
) -> Result<Response, Infallible> {
    let response = match players_body(&board, &config) {
        Ok(body) => {
            let mut response = Response::new(body.into());
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => {
            tracing::error!("Failed to serialize {} rankings: {}", board.len(), e);
            error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                "Failed to serialize rankings",
            )
            .into_response()
        }
    };

    Ok(response)
}

fn error_reply(status: StatusCode, code: &str, message: &str) -> impl Reply {
    let error = ErrorResponse {
        error: ErrorDetail { code: code.to_string(), message: message.to_string() },
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    warp::reply::with_status(warp::reply::json(&error), status)
}

/// Create REST API routes
pub fn create_routes(
    board: Arc<RankingBoard>,
    response: ResponseConfig,
) -> impl Filter<Extract = impl Reply, Error = warp::Rejection> + Clone {
    let board_filter = warp::any().map(move || board.clone());
    let response = Arc::new(response);
    let response_filter = warp::any().map(move || response.clone());

    // Greeting endpoint
    let hello = warp::path::end().and(warp::get()).and(warp::path::full()).map(index);

    // Rankings endpoint
    let players = warp::path("players")
        .and(warp::path::end())
        .and(warp::get())
        .and(board_filter.clone())
        .and(response_filter)
        .and_then(get_players)
        .map(|reply| warp::reply::with_header(reply, "Access-Control-Allow-Origin", "*"));

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(board_filter)
        .map(|board: Arc<RankingBoard>| {
            warp::reply::json(&serde_json::json!({
                "status": "healthy",
                "players": board.len(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        });

    hello.or(players).or(health).with(warp::trace::request())
}

/// Serve the board until `shutdown` resolves
pub async fn serve<F>(
    config: &GatewayConfig,
    board: Arc<RankingBoard>,
    shutdown: F,
) -> GatewayResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.server_addr()?;
    let players = board.len();
    let routes = create_routes(board, config.response.clone());

    let (bound, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, shutdown)?;
    tracing::info!("Listening on {} with {} players", bound, players);

    server.await;
    tracing::info!("RankingsGateway stopped");
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&#34;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::error::GatewayError;

    fn ranking(name: &str, position: &str, value: f32) -> PlayerRanking {
        PlayerRanking {
            name: name.to_string(),
            position: position.to_string(),
            team_bye: "PIT/9".to_string(),
            rank: 1.0,
            adp_vs_rank: 0.5,
            past_performance: "RB1".to_string(),
            value,
            scarcity: 0.5,
        }
    }

    fn create_test_board() -> Arc<RankingBoard> {
        Arc::new(RankingBoard::from_rankings(vec![
            ranking("Aaron Rodgers", "QB1", 25.0),
            ranking("David Johnson", "RB1", 60.0),
            ranking("Antonio Brown", "WR1", 55.5),
            ranking("Rob Gronkowski", "TE1", 30.0),
        ]))
    }

    #[tokio::test]
    async fn test_players_endpoint() {
        let board = create_test_board();
        let routes = create_routes(board.clone(), ResponseConfig::default());

        let res = warp::test::request().method("GET").path("/players").reply(&routes).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["access-control-allow-origin"], "*");
        assert_eq!(res.headers()["content-type"], "application/json");

        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["format"], "standard");
        assert_eq!(body["time_updated"], board.built_at().to_rfc3339());

        let rankings = body["rankings"].as_array().unwrap();
        assert_eq!(rankings.len(), board.len());
        let names: Vec<&str> = rankings.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["David Johnson", "Antonio Brown", "Rob Gronkowski", "Aaron Rodgers"]);

        let first = rankings[0].as_object().unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first["position"], "RB1");
        assert_eq!(first["value"], 60.0);
        assert_eq!(first["scarcity"], 0.5);
        assert!(!first.contains_key("team_bye"));
    }

    #[tokio::test]
    async fn test_players_legacy_time_updated() {
        let config = ResponseConfig { format: "ppr".to_string(), legacy_time_updated: true };
        let routes = create_routes(create_test_board(), config);

        let res = warp::test::request().path("/players").reply(&routes).await;
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();

        assert_eq!(body["format"], "ppr");
        assert_eq!(body["time_updated"], "now");
    }

    #[tokio::test]
    async fn test_players_empty_board() {
        let routes = create_routes(
            Arc::new(RankingBoard::from_rankings(Vec::new())),
            ResponseConfig::default(),
        );

        let res = warp::test::request().path("/players").reply(&routes).await;
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body["rankings"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_index_endpoint() {
        let routes = create_routes(create_test_board(), ResponseConfig::default());

        let res = warp::test::request().path("/").reply(&routes).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.body().as_ref(), b"Hello, \"/\"");
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let routes = create_routes(create_test_board(), ResponseConfig::default());

        let res = warp::test::request().path("/health").reply(&routes).await;
        let body: serde_json::Value = serde_json::from_slice(res.body()).unwrap();

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["players"], 4);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let routes = create_routes(create_test_board(), ResponseConfig::default());

        let res = warp::test::request().path("/rankings").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("/"), "/");
        assert_eq!(escape_html("/<b>&'\""), "/&lt;b&gt;&amp;&#39;&#34;");
    }

    #[test]
    fn test_error_reply() {
        let res = error_reply(StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR", "boom")
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let config = GatewayConfig {
            server: ServerConfig { host: "127.0.0.1".to_string(), port: 0 },
            ..Default::default()
        };

        serve(&config, create_test_board(), async {}).await.unwrap();
    }

    #[tokio::test]
    async fn test_serve_reports_bind_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let config = GatewayConfig {
            server: ServerConfig { host: "127.0.0.1".to_string(), port },
            ..Default::default()
        };

        let result = serve(&config, create_test_board(), async {}).await;
        assert!(matches!(result, Err(GatewayError::Bind(_))));
    }
}
