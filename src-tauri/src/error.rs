use derive_more::{Display, From};

/// Failures surfaced by the shell's own commands. Pipeline load and run
/// failures are reported through session state and events instead.
#[derive(Debug, Display, From)]
pub enum Error {
    #[from]
    #[display("Keychain error: {_0}")]
    Keychain(keyring::Error),

    #[from]
    #[display("{_0}")]
    Backend(playground_pipelines::PipelineError),

    #[display("{_0}")]
    InvalidConfig(String),

    #[display("Failed to save settings: {_0}")]
    Store(String),
}

impl From<Error> for String {
    fn from(error: Error) -> Self {
        error.to_string()
    }
}
