mod loader;

pub use loader::{ScenarioLoader, ScenarioLoaderError, ScenarioOutcome, ScenarioRecord};
