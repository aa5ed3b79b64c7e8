//! Defines the NASA POWER parameters this crate can request.

use std::fmt;

/// A daily NASA POWER parameter, identified on the wire by its code.
///
/// Only the parameters the crate knows how to accumulate are listed here.
/// The code doubles as the column name in the CSV body of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Bias-corrected total precipitation, in mm/day (`PRECTOTCORR`).
    CorrectedPrecipitation,
}

impl Parameter {
    /// The precipitation parameter every query accumulates.
    pub const PRECIPITATION: Parameter = Parameter::CorrectedPrecipitation;

    /// The code used both in the `parameters` query field and as CSV column header.
    ///
    /// # Examples
    ///
    /// ```
    /// use power_rain::Parameter;
    ///
    /// assert_eq!(Parameter::CorrectedPrecipitation.code(), "PRECTOTCORR");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Parameter::CorrectedPrecipitation => "PRECTOTCORR",
        }
    }

    /// Unit the source reports values in.
    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::CorrectedPrecipitation => "mm",
        }
    }

    /// Name of the running-sum column derived from this parameter.
    pub(crate) fn cumulative_column(&self) -> String {
        format!("CUMULATIVE_{}", self.code())
    }

    /// Comma-joins parameter codes the way the `parameters` query field expects.
    pub fn join_codes(parameters: &[Parameter]) -> String {
        parameters
            .iter()
            .map(Parameter::code)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formats a `Parameter` as its code.
///
/// ```
/// use power_rain::Parameter;
///
/// assert_eq!(Parameter::PRECIPITATION.to_string(), "PRECTOTCORR");
/// ```
impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
