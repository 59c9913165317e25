use standings::config::cli::Command;
use standings::config::Config;
use standings::error::Result;
use standings::infrastructure::FileSystemStore;
use standings::services::StandingsService;
use standings::Category;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    let config = Config::new()?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    config.ensure_directories()?;

    let mut store = FileSystemStore::new(&config.args.snapshot, &config.args.data_dir);
    if config.args.compact {
        store = store.compact();
    }
    let service = StandingsService::new(Arc::new(store));

    match config.command() {
        Command::All => {
            let standings = service.publish_all()?;
            info!(
                "Standings computed: {} restaurants ranked overall, {} same-named dishes",
                standings.overall.len(),
                standings.same_named.len()
            );
        }
        Command::Category { name } => {
            let category: Category = name.parse()?;
            let leaderboard = service.publish_category(category)?;
            for ranked in leaderboard.iter() {
                info!(
                    "{}{} {} ({})",
                    ranked.rank,
                    if ranked.is_tied { "=" } else { "." },
                    ranked.entry.restaurant_name,
                    ranked.entry.rating
                );
            }
        }
        Command::Dishes => {
            for dish in service.publish_dishes()? {
                info!(
                    "{}: {} restaurants",
                    dish.display_name,
                    dish.leaderboard.len()
                );
            }
        }
        Command::Restaurant { id } => {
            let placements = service.placements(&id)?;
            if placements.is_empty() {
                info!("Restaurant {id} holds no leaderboard positions");
            }
            for placement in placements {
                let dish = placement.dish.as_deref().unwrap_or(placement.category.label());
                info!(
                    "{dish}: #{} of {} ({})",
                    placement.rank, placement.out_of, placement.rating
                );
            }
        }
    }

    info!("Standings completed successfully!");
    Ok(())
}
