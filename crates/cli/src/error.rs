//! Failure kinds of `folio-fx` and the exit status each one ends with.
//!
//! | status | cause |
//! |---|---|
//! | 0 | done |
//! | 2 | rejected by clap before any work starts |
//! | 10 | the field could not be built or stepped |
//! | 11 | the PNG could not be written |
//! | 12 | malformed user input: `--params`, a color, a counter target |
//! | 13 | JSON output could not be produced |

use folio_fx_core::FxError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// Viewport or particle configuration rejected by the field.
    Sim(FxError),
    Io(String),
    /// Something the user typed that we could not make sense of.
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sim(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sim(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                f.write_str(msg)
            }
        }
    }
}

/// Color and target failures come from what the user passed in, so they
/// report as input; write failures keep their own status.
impl From<FxError> for CliError {
    fn from(e: FxError) -> Self {
        match e {
            FxError::Io(msg) => CliError::Io(msg),
            e @ (FxError::InvalidColor(_) | FxError::InvalidTarget(_)) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Sim(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_its_own_status() {
        let cases = [
            (CliError::Sim(FxError::InvalidConfig("grid step".into())), 10),
            (CliError::Io("write failed".into()), 11),
            (CliError::Input("bad params".into()), 12),
            (CliError::Serialization("json fail".into()), 13),
        ];
        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "{err}");
        }
    }

    #[test]
    fn write_failure_keeps_io_status_and_message() {
        let err = CliError::from(FxError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn bad_color_or_target_is_user_input() {
        assert_eq!(CliError::from(FxError::InvalidColor("hsl".into())).exit_code(), 12);
        let err = CliError::from(FxError::InvalidTarget("abc".into()));
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn negative_viewport_is_a_simulation_failure() {
        let err = FxError::InvalidViewport {
            width: -1.0,
            height: 10.0,
            dpr: 1.0,
        };
        assert_eq!(CliError::from(err).exit_code(), 10);
    }

    #[test]
    fn broken_json_maps_to_serialization_status() {
        let parse = serde_json::from_str::<serde_json::Value>("{invalid");
        assert_eq!(CliError::from(parse.unwrap_err()).exit_code(), 13);
    }
}
