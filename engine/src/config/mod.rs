pub mod settings;

pub use settings::ParserSettings;
