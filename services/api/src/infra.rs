use card_optimizer::catalog::CsvCardCatalog;
use card_optimizer::config::AppConfig;
use card_optimizer::error::AppError;
use card_optimizer::merchant::{HttpMccDirectory, TableMerchantResolver};
use card_optimizer::rewards::RewardOptimizer;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type ServiceOptimizer = RewardOptimizer<CsvCardCatalog, TableMerchantResolver>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) model_loaded: bool,
}

/// Optimizer over the configured catalog file and merchant table.
pub(crate) fn build_optimizer(config: &AppConfig) -> Result<ServiceOptimizer, AppError> {
    let catalog = CsvCardCatalog::new(config.data.cards_path.clone());
    let resolver = TableMerchantResolver::from_path(&config.data.merchants_path)?;
    Ok(RewardOptimizer::new(Arc::new(catalog), Arc::new(resolver))
        .with_base_confidence(config.optimizer.base_confidence))
}

pub(crate) fn build_mcc_directory(config: &AppConfig) -> Result<HttpMccDirectory, AppError> {
    Ok(HttpMccDirectory::new(
        config.optimizer.mcc_api_url.clone(),
        config.optimizer.mcc_timeout,
    )?)
}

/// Parse a `category=amount` pair from the command line.
pub(crate) fn parse_spend_entry(raw: &str) -> Result<(String, f64), String> {
    let (category, amount) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=AMOUNT, got '{raw}'"))?;
    let category = category.trim();
    if category.is_empty() {
        return Err(format!("missing category in '{raw}'"));
    }
    let amount = amount
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse amount in '{raw}' ({err})"))?;
    Ok((category.to_string(), amount))
}
