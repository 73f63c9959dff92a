use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;
use serde_json::Value;
use smu_bab::core::dates::parse_reference_date;
use smu_bab::utils::{logger, validation::Validate};
use smu_bab::{LambdaConfig, MenuEngine, RotatingSampleProvider, SmuMenuSource, WeeklyFeed};

type Engine = MenuEngine<SmuMenuSource<LambdaConfig>, RotatingSampleProvider>;

#[derive(Debug, Default, Deserialize)]
pub struct Request {
    /// `weekly` (預設) 或 `today`
    pub action: Option<String>,
    pub date: Option<String>,
}

async fn function_handler(engine: &Engine, event: LambdaEvent<Request>) -> Result<Value, Error> {
    let request = event.payload;
    tracing::info!(
        action = request.action.as_deref().unwrap_or("weekly"),
        date = request.date.as_deref().unwrap_or("today"),
        "Handling menu request"
    );

    let reference = match parse_reference_date(request.date.as_deref()) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!("⚠️ {}", e);
            return Ok(serde_json::to_value(WeeklyFeed::failed(
                e.user_friendly_message(),
            ))?);
        }
    };

    let response = match request.action.as_deref().unwrap_or("weekly") {
        "today" => serde_json::to_value(engine.daily(reference).await)?,
        "weekly" => serde_json::to_value(engine.weekly(reference).await)?,
        other => serde_json::to_value(WeeklyFeed::failed(format!(
            "Unknown action '{}': expected 'weekly' or 'today'",
            other
        )))?,
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;

    let engine = MenuEngine::new(SmuMenuSource::new(config)?, RotatingSampleProvider::default());
    let engine = &engine;

    run(service_fn(move |event: LambdaEvent<Request>| async move {
        function_handler(engine, event).await
    }))
    .await
}
