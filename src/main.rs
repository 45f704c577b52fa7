use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use icon_fanout::android::android_project_plan;
use icon_fanout::config::load_plan;
use icon_fanout::{load_master, run_plan_with, RunOptions};

#[derive(Debug, Parser)]
#[clap(
    name = "icon-fanout",
    about = "Replace every app icon in a project tree with resized copies of one master image"
)]
struct Args {
    /// Master icon (PNG or any format convertible to RGBA).
    #[clap(value_name = "MASTER")]
    master: PathBuf,

    /// Project root the plan's paths are relative to.
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// TOML plan file; defaults to the built-in Android project layout.
    #[clap(short, long, value_name = "FILE")]
    plan: Option<PathBuf>,

    /// Evaluate every rule but write nothing.
    #[clap(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // 主图加载失败直接退出，此时还没有任何文件被改动
    let master = load_master(&args.master)
        .with_context(|| format!("loading master icon {}", args.master.display()))?;
    info!(
        "source icon: {}x{} ({})",
        master.width(),
        master.height(),
        master.path().display()
    );

    let builtin = args.plan.is_none();
    let rules = match &args.plan {
        Some(file) => load_plan(file, &args.root)
            .with_context(|| format!("reading plan {}", file.display()))?,
        None => android_project_plan(&args.root),
    };
    info!("{} rule(s) to process", rules.len());

    let options = RunOptions {
        dry_run: args.dry_run,
    };
    match run_plan_with(&master, &rules, options) {
        Ok(result) => {
            println!("{result}");
            if builtin && !args.dry_run {
                println!("Build outputs in gradle/build/ will be regenerated on next build.");
            }
            Ok(())
        }
        Err(aborted) => {
            error!("required target failed: {}", aborted.error);
            println!("{}", aborted.partial);
            Err(aborted.into())
        }
    }
}
