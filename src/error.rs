use crate::inputs::error::ValidationError;
use crate::weather_data::error::{FormatError, NetworkError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowerRainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
