//! Error types for site-behaviors
//!
//! A missing DOM node is never an error. These variants cover the places a
//! behavior run touches the outside world: the platform directories, the
//! config file, preference storage and replay fixtures.

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The platform reported no home or data directory
    #[snafu(display("No platform directory: {message}"))]
    NoProjectDir { message: String },

    /// Reading or writing the config file, the file-backed preference store
    /// or a fixture file
    #[snafu(context(false), display("File access failed: {source}"))]
    Io { source: std::io::Error },

    /// Fixture JSON that does not match the fixture schema
    #[snafu(context(false), display("Malformed fixture JSON: {source}"))]
    Json { source: serde_json::Error },

    /// Config or preference file that is not valid TOML for its schema
    #[snafu(context(false), display("Malformed TOML: {source}"))]
    TomlDe { source: toml::de::Error },

    /// Config or preferences that could not be written back as TOML
    #[snafu(context(false), display("Could not encode TOML: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Preference storage backend refused a read or write
    #[snafu(display("Storage error: {message}"))]
    Storage { message: String },

    /// Replay fixture could not be interpreted
    #[snafu(display("Fixture error: {message}"))]
    Fixture { message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
