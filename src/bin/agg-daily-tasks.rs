use agg_daily_tasks::cli::{self, Args, Command};
use agg_daily_tasks::config::Config;
use agg_daily_tasks::context::StandardContext;
use agg_daily_tasks::notes::{Rollup, RollupOutcome};
use agg_daily_tasks::storage::LocalStorage;
use anyhow::Result;
use chrono::Local;
use std::env;

fn main() -> Result<()> {
    let args = Args::parse(env::args().skip(1))?;

    if args.command == Command::Help {
        cli::print_help("agg-daily-tasks");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());

    // CLI Command: agg-daily-tasks config
    if args.command == Command::Config {
        if let Err(e) = Config::load(&ctx) {
            if !Config::is_missing_config_error(&e) {
                return Err(e);
            }
            Config::default().save(&ctx)?;
        }
        println!("{}", Config::get_path_string(&ctx)?);
        return Ok(());
    }

    let mut cfg = Config::load_or_default(&ctx)?;
    args.apply(&mut cfg);
    cli::init_logging(cfg.log_level_filter());

    let rollup = Rollup::from_config(&cfg);
    let outcome = rollup.run(Local::now().date_naive())?;

    if let RollupOutcome::Tasks { output, days, .. } = &outcome {
        if let Some(target) = &args.insert {
            let mode = LocalStorage::insert_at_marker(target, output, &cfg.insert_marker)?;
            log::debug!("Wrote rollup into {:?} ({:?})", target, mode);
        } else if args.json {
            println!("{}", serde_json::to_string_pretty(days)?);
        } else {
            print!("{}", output);
        }
    }

    let inserted = args.insert.is_some() && outcome.task_count() > 0;
    eprintln!("{}", outcome.message(&cfg.note_suffix, inserted));
    Ok(())
}
