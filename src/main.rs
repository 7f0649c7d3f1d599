// define modules in crate
mod config;
mod domain;
mod dtos;
mod errors;
mod fetcher;
mod metrics;
mod renderer;
mod screen;
mod state;

use std::process;
use std::sync::{Arc, Mutex};

use config::{AppConfig, LoggingInitializationInfo};
use dotenv::dotenv;
use fetcher::{build_http_client, HttpProductFetcher};
use metrics::{FetchMetrics, FetchOutcome};
use screen::{FetchState, ProductScreen, TriggerOutcome};
use state::AppState;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};
use tracing::{event, Level};

fn init_logging(info: &LoggingInitializationInfo) -> Result<(), String> {
    let builder = tracing_subscriber::fmt()
        .with_max_level(info.level)
        .with_target(false)
        .with_ansi(false)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true);

    match &info.path {
        Some(path) => match std::fs::File::create(path) {
            Ok(file) => {
                builder.with_writer(Mutex::new(file)).init();
                Ok(())
            }
            Err(e) => Err(format!("Failed to create log file {}: {}", path, e)),
        },
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(())
        }
    }
}

fn build_state(config: &AppConfig) -> Result<AppState, String> {
    let client = build_http_client(config.fake_store.timeout).map_err(|e| e.to_string())?;
    let fetcher = HttpProductFetcher::new(client, &config.fake_store.base_url).map_err(|e| e.to_string())?;
    event!(Level::INFO, "Fetching products from {}", fetcher.endpoint());

    let metrics = Arc::new(FetchMetrics::new()?);
    Ok(AppState {
        product_screen: Arc::new(ProductScreen::new(Arc::new(fetcher), metrics.clone())),
        metrics,
    })
}

async fn load_product(state: &AppState) {
    println!("Loading product...");

    match state.product_screen.trigger().await {
        TriggerOutcome::Applied(FetchState::Rendered(rendered)) => {
            print!("{}", renderer::to_table(&rendered));
        }
        TriggerOutcome::Applied(FetchState::Failed(notification)) => {
            println!("{}", notification);
        }
        TriggerOutcome::Applied(other) => {
            event!(Level::WARN, "Fetch completed in unexpected state {:?}", other);
        }
        TriggerOutcome::Superseded => {
            event!(Level::DEBUG, "Fetch superseded, current state {:?}", state.product_screen.state().await);
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum InputCommand {
    Reload,
    Quit,
    Ignored,
}

fn parse_input(line: &str) -> InputCommand {
    let line = line.trim();
    if line.is_empty() {
        InputCommand::Reload
    } else if line.eq_ignore_ascii_case("q") {
        InputCommand::Quit
    } else {
        InputCommand::Ignored
    }
}

// Loads run in the background so a reload issued while one is pending supersedes it.
fn spawn_load(tasks: &mut JoinSet<()>, state: &AppState) {
    while tasks.try_join_next().is_some() {}

    let state = state.clone();
    tasks.spawn(async move {
        load_product(&state).await;
    });
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let state = match build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            event!(Level::ERROR, "Failed to start: {}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let mut tasks = JoinSet::new();
    spawn_load(&mut tasks, &state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Press Enter to reload, or q to quit.");
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_input(&line) {
                InputCommand::Reload => spawn_load(&mut tasks, &state),
                InputCommand::Quit => {
                    tasks.abort_all();
                    break;
                }
                InputCommand::Ignored => println!("Press Enter to reload, or q to quit."),
            },
            Ok(None) => {
                while tasks.join_next().await.is_some() {}
                break;
            }
            Err(e) => {
                event!(Level::WARN, "Failed to read input: {}", e);
                break;
            }
        }
    }

    event!(
        Level::INFO,
        "Rendered {} products, {} failed fetches",
        state.metrics.count(FetchOutcome::Rendered),
        state.metrics.count(FetchOutcome::Failed)
    );
    event!(Level::DEBUG, "Fetch metrics:\n{}", state.metrics.render());
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    #[test]
    fn empty_line_reloads_and_q_quits() {
        assert_eq!(parse_input(""), InputCommand::Reload);
        assert_eq!(parse_input("   "), InputCommand::Reload);
        assert_eq!(parse_input("q"), InputCommand::Quit);
        assert_eq!(parse_input(" Q "), InputCommand::Quit);
        assert_eq!(parse_input("reload"), InputCommand::Ignored);
    }

    #[tokio::test]
    async fn reload_while_pending_supersedes_the_first_load() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "id": 1,
                        "title": "Mens Casual Premium Slim Fit T-Shirts",
                        "price": 22.3,
                        "category": "men's clothing",
                        "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
                        "rating": {"rate": 4.1, "count": 259}
                    }))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(2)
            .mount(&server)
            .await;

        let uri = server.uri();
        let config = AppConfig::from_lookup(|key| match key {
            "FAKESTORE_BASE_URL" => Some(uri.clone()),
            "HTTP_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        })
        .unwrap();
        let state = build_state(&config).unwrap();

        let mut tasks = JoinSet::new();
        spawn_load(&mut tasks, &state);
        spawn_load(&mut tasks, &state);
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap();
        }

        assert_eq!(state.metrics.count(FetchOutcome::Superseded), 1);
        assert_eq!(state.metrics.count(FetchOutcome::Rendered), 1);
        assert!(matches!(state.product_screen.state().await, FetchState::Rendered(_)));
    }
}
