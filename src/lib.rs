mod error;
mod inputs;
mod power_rain;
mod presenter;
mod session;
mod types;
mod weather_data;

pub use error::PowerRainError;
pub use power_rain::*;

pub use inputs::error::ValidationError;
pub use inputs::query::{collect_inputs, InputState, LatLon, QueryParameters};

pub use types::enriched::{EnrichedRow, EnrichedTable, DISPLAY_DATE_FORMAT};
pub use types::observation::ObservationTable;
pub use types::parameter::Parameter;

pub use weather_data::error::{FormatError, NetworkError};
pub use weather_data::fetcher::{PowerFetcher, RawResponse};
pub use weather_data::parser::{parse, HEADER_END_MARKER, MISSING_SENTINEL};
pub use weather_data::source::{FetchConfig, HttpSource, RawSource, POWER_DAILY_POINT_URL};
pub use weather_data::transformer::transform;

pub use presenter::{render_error, render_summary, ChartTarget, Presenter};
pub use session::{PipelineOutcome, Session};
