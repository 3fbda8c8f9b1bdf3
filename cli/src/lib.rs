pub mod commands;

use std::io::Write;
use std::sync::Arc;

use cragscout_core::{AppConfig, AppConfigExt, AreaIndex, AreaResult, ResultStore};
use tokio::sync::RwLock;

/// Mutable REPL state behind one lock.
pub struct AppState {
    pub config: AppConfig,
    pub index: Option<AreaIndex>,
    /// Current search's results, in completion order
    pub results: Vec<AreaResult>,
    pub area_cursor: usize,
    /// Discovery-set size of the last search, for degradation reporting
    pub last_discovered: usize,
    pub last_failed_areas: Vec<String>,
}

pub struct CliContext {
    pub state: Arc<RwLock<AppState>>,
    pub store: Arc<ResultStore>,
}

impl CliContext {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState {
                config: AppConfig::load(),
                index: None,
                results: Vec::new(),
                area_cursor: 0,
                last_discovered: 0,
                last_failed_areas: Vec::new(),
            })),
            store: Arc::new(ResultStore::new()),
        }
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn readline() -> Result<String, String> {
    write!(std::io::stdout(), "cragscout> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut buffer = String::new();
    let read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    if read == 0 {
        // EOF
        return Ok("exit".to_string());
    }
    Ok(buffer)
}
