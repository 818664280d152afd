use thiserror::Error;
use crate::dashboard::RenderError;
use crate::forecast::ForecastError;
use crate::manager_owm::errors::OwmError;

/// Any failure in the fetch, parse or render stages of a run. The entry
/// point reports one human-readable message and exits non-zero, there is
/// no partial-success reporting.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Owm(#[from] OwmError),
    #[error(transparent)]
    Forecast(#[from] ForecastError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
