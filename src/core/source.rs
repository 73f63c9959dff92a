use crate::core::classifier::RowClassifier;
use crate::core::parser::GridParser;
use crate::core::segmenter::KeywordTable;
use crate::core::table::PositionalTableLocator;
use crate::domain::model::{MealType, MenuRecord, MenuSlot, Restaurant};
use crate::domain::ports::{ConfigProvider, MenuSource};
use crate::utils::error::{MenuError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;

/// Seoul campus menu page. Only lunch is listed there.
pub struct SmuMenuSource<C: ConfigProvider> {
    config: C,
    client: Client,
    parser: GridParser,
}

impl<C: ConfigProvider> SmuMenuSource<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        let mut keywords = KeywordTable::default();
        keywords.extend(config.extra_keywords().iter().cloned());

        let parser = GridParser::new(
            Box::new(PositionalTableLocator::new(config.table_index())),
            RowClassifier::seoul_lunch(config.staff_marker()),
            keywords,
        );

        Ok(Self {
            config,
            client,
            parser,
        })
    }

    async fn fetch_html(&self, reference: NaiveDate) -> Result<String> {
        let attempts = self.config.retry_attempts().max(1);
        let mut attempt = 1;

        loop {
            match self.request_page(reference).await {
                Ok(html) => return Ok(html),
                // 只重試連線層錯誤；逾時與非 2xx 直接視為來源失效
                Err(MenuError::Http(e)) if attempt < attempts => {
                    let delay = Duration::from_millis(self.config.retry_delay_ms() * u64::from(attempt));
                    tracing::warn!(
                        "🔁 Attempt {}/{} to {} failed: {}; retrying in {:?}",
                        attempt,
                        attempts,
                        self.config.menu_endpoint(),
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn request_page(&self, reference: NaiveDate) -> Result<String> {
        let endpoint = self.config.menu_endpoint();
        let date = reference.format("%Y-%m-%d").to_string();

        tracing::debug!("Making menu request to: {} (srDt={})", endpoint, date);

        let response = self
            .client
            .get(endpoint)
            .query(&[
                ("mode", "menuList"),
                ("srMealCategory", "L"),
                ("srDt", date.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        tracing::debug!("Menu response status: {}", status);

        if !status.is_success() {
            return Err(MenuError::SourceUnavailable {
                message: format!("{} responded with {}", endpoint, status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| self.classify_transport_error(e))
    }

    fn classify_transport_error(&self, error: reqwest::Error) -> MenuError {
        if error.is_timeout() {
            MenuError::Timeout {
                seconds: self.config.timeout_seconds(),
            }
        } else {
            MenuError::Http(error)
        }
    }
}

#[async_trait]
impl<C: ConfigProvider> MenuSource for SmuMenuSource<C> {
    fn name(&self) -> &str {
        "smu-seoul"
    }

    fn slots(&self) -> Vec<MenuSlot> {
        vec![MenuSlot::new(Restaurant::SeoulStudent, MealType::Lunch)]
    }

    async fn fetch_week(&self, reference: NaiveDate) -> Result<Vec<MenuRecord>> {
        let html = self.fetch_html(reference).await?;
        tracing::debug!("Fetched {} bytes of menu HTML", html.len());
        self.parser.parse(&html, reference)
    }
}
