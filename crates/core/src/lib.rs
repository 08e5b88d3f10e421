pub mod config;
pub mod metadata;
pub mod pipeline;
pub mod store;
pub mod testing;
pub mod weblink;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    SanitizedConfig, TelegramConfig,
};
pub use metadata::{
    CatalogError, FilmCatalog, FilmDetails, FilmSummary, KinopoiskClient, KinopoiskConfig,
};
pub use pipeline::{LookupPipeline, PipelineError, ResolvedLookup, HISTORY_LIMIT};
pub use store::{FilmCounter, HistoryEntry, LookupStore, SqliteLookupStore, StoreError};
pub use weblink::{SearchEngineLinkFinder, WebLinkConfig, WebLinkError, WebLinkFinder};
