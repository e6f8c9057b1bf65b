#![deny(missing_docs)]
//! This crate provides the initialization every ingest handler binary runs before serving events.
//! It keeps the tracing configuration consistent across the handlers.

use tracing_subscriber::EnvFilter;

mod environment;

pub use environment::{Environment, UnknownEnvironment};

/// unit struct which defines the behaviour for instantiation
#[derive(Debug)]
pub struct IngestEntrypoint {
    env: Environment,
}

impl Default for IngestEntrypoint {
    fn default() -> Self {
        IngestEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [IngestEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint {
    env: Environment,
}

impl InitializedEntrypoint {
    /// the [Environment] the process was initialized for
    pub fn environment(&self) -> Environment {
        self.env
    }
}

impl IngestEntrypoint {
    /// create a new instance of [Self] from an input [Environment]
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                // lambda already prefixes every line with the request id and timestamp
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .without_time()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint { env: self.env }
    }
}
