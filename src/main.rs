use std::path::PathBuf;
use std::process;

use clap::{arg, command, value_parser, ArgAction, ArgMatches};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dirt::config::{Config, DEFAULT_MAX_DEPTH};
use dirt::report;
use dirt::{scan, GitInspector, ScanOptions};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("DIRT_LOG").unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = command!()
        .about("Find git repositories with uncommitted changes or unpushed commits")
        .arg(
            arg!([paths] ... "Directories to scan (default: configured roots, then the current directory)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(-d --depth <DEPTH> "How many directory levels below each path to search")
                .value_parser(value_parser!(usize)),
        )
        .arg(arg!(--"no-untracked" "Do not count untracked files as uncommitted changes").action(ArgAction::SetTrue))
        .arg(arg!(-a --all "Also list clean repositories").action(ArgAction::SetTrue))
        .arg(arg!(--json "Print the result as JSON").action(ArgAction::SetTrue))
        .arg(
            arg!(-c --config <FILE> "Read configuration from FILE instead of the default location")
                .value_parser(value_parser!(PathBuf)),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("dirt: {err:#}");
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_file(path)?,
        None => Config::load()?,
    };
    debug!(?config, "loaded config");

    let mut roots: Vec<PathBuf> = matches
        .get_many::<PathBuf>("paths")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default();
    if roots.is_empty() {
        roots = config.root_paths();
    }
    if roots.is_empty() {
        roots.push(PathBuf::from("."));
    }

    let max_depth = matches
        .get_one::<usize>("depth")
        .copied()
        .or(config.max_depth)
        .unwrap_or(DEFAULT_MAX_DEPTH);
    let options = ScanOptions::new(max_depth).with_marker(config.marker.as_str());
    let inspector =
        GitInspector::new(config.include_untracked && !matches.get_flag("no-untracked"));

    let statuses = scan(&roots, &options, &inspector);

    if matches.get_flag("json") {
        println!("{}", report::render_json(&statuses)?);
    } else {
        print!(
            "{}",
            report::render(&statuses, matches.get_flag("all"), report::get_symbols())
        );
    }
    Ok(())
}
