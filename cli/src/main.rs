use clap::{Parser, Subcommand};
use cragscout_cli::{CliContext, commands, readline};
use cragscout_core::{Discipline, SearchParams};

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                println!("{err}");
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "climbing area aggregator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load an area index snapshot
    Load {
        #[arg(short, long)]
        path: String,
    },
    /// Find and aggregate areas around a point
    Search {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Radius in miles
        #[arg(long)]
        radius: f64,
        /// Only keep climbs of this discipline (sport, trad, tr, boulder)
        #[arg(long)]
        discipline: Option<String>,
    },
    /// Print the current area and climb
    Show,
    NextArea,
    PrevArea,
    NextClimb,
    PrevClimb,
    /// Persist the current climb
    Save,
    ListSaved,
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: invalid quoting")?;
    args.insert(0, "cragscout".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Load { path }) => commands::load_index(ctx, &path).await,
        Some(Commands::Search {
            lat,
            lon,
            radius,
            discipline,
        }) => {
            let discipline = match discipline.as_deref().map(Discipline::from_tag) {
                Some(Discipline::Unknown) => {
                    return Err("unknown discipline; expected sport, trad, tr or boulder".into());
                }
                other => other,
            };
            let params = SearchParams {
                latitude: lat,
                longitude: lon,
                radius_miles: radius,
                discipline,
            };
            commands::search(ctx, params).await;
        }
        Some(Commands::Show) => commands::show(ctx).await,
        Some(Commands::NextArea) => commands::step_area(ctx, 1).await,
        Some(Commands::PrevArea) => commands::step_area(ctx, -1).await,
        Some(Commands::NextClimb) => commands::step_climb(ctx, 1).await,
        Some(Commands::PrevClimb) => commands::step_climb(ctx, -1).await,
        Some(Commands::Save) => commands::save(ctx).await,
        Some(Commands::ListSaved) => commands::list_saved(ctx).await,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::Exit) => return Ok(true),
        None => {}
    }
    Ok(false)
}
