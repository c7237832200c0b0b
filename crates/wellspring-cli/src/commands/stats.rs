use clap::Subcommand;

use wellspring_core::error::{CoreError, StorageError};

use super::{open_db, print_json};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print session counters and recorded-session totals
    Show,
    /// List the most recent recorded sessions
    Recent {
        #[arg(long, default_value = "10")]
        limit: u32,
    },
}

pub fn run(action: StatsAction) -> Result<(), CoreError> {
    let db = open_db()?;
    match action {
        StatsAction::Show => {
            let stats = db.stats().map_err(StorageError::from)?;
            print_json(&stats)?;
        }
        StatsAction::Recent { limit } => {
            let sessions = db.recent_sessions(limit).map_err(StorageError::from)?;
            print_json(&sessions)?;
        }
    }
    Ok(())
}
