use chrono::NaiveDate;
use lease_pricing::error::AppError;
use lease_pricing::workflows::comps::MarketCompImporter;
use lease_pricing::workflows::pricing::PricingRequest;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_percent(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a percentage ({err})"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside 0-100"))
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Loads a pricing snapshot, appending comps from a survey CSV when given.
pub(crate) fn load_pricing_request(
    request_path: &Path,
    comps_csv: Option<&Path>,
) -> Result<PricingRequest, AppError> {
    let mut request: PricingRequest = read_json(request_path)?;
    if let Some(csv_path) = comps_csv {
        let comps = MarketCompImporter::from_path(csv_path)?;
        request.market_comps.extend(comps);
    }
    Ok(request)
}
