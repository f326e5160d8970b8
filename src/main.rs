use tokenlens::api::router::create_router;
use tokenlens::config::AppConfig;
use tokenlens::insight::{InsightClient, InsightSettings};
use tokenlens::market::MarketClient;
use tokenlens::risk::RiskClient;
use tokenlens::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let db = db::init_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("Database connected");

    let metrics_handle = metrics::init_metrics();

    // One shared HTTP client; the bounded timeout applies to every upstream.
    let http = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()?;

    let market = MarketClient::new(http.clone(), config.market_api_base.clone());
    let risk = RiskClient::new(
        http.clone(),
        config.risk_api_base.clone(),
        config.risk_api_key.clone(),
    );
    let insight = InsightClient::new(
        http,
        InsightSettings {
            api_url: config.completion_api_url.clone(),
            api_key: config.completion_api_key.clone(),
            model: config.completion_model.clone(),
            market_temperature: config.market_insight_temperature,
            market_max_tokens: config.market_insight_max_tokens,
            risk_temperature: config.risk_assessment_temperature,
            risk_max_tokens: config.risk_assessment_max_tokens,
        },
    );

    if !config.has_completion_auth() {
        tracing::warn!("COMPLETION_API_KEY not set; insight sections will degrade on every request");
    }

    let state = AppState {
        db,
        config,
        market,
        risk,
        insight,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
