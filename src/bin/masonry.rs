use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "masonry", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario JSON file and print the final layout.
    Layout(LayoutArgs),
    /// Lay out a list of item heights in a fresh grid.
    Place(PlaceArgs),
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,

    /// Also print every write the layout sink received.
    #[arg(long)]
    dump_writes: bool,
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Number of columns.
    #[arg(long, default_value_t = 3)]
    columns: usize,

    /// Gutter between stacked items.
    #[arg(long, default_value_t = 10.0)]
    gutter: f64,

    /// Container width.
    #[arg(long, default_value_t = 0.0)]
    width: f64,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,

    /// Item heights, in insertion order.
    #[arg(required = true)]
    heights: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("masonry=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Layout(args) => cmd_layout(args),
        Command::Place(args) => cmd_place(args),
    }
}

fn read_scenario_json(path: &Path) -> anyhow::Result<masonry::Scenario> {
    let f = File::open(path).with_context(|| format!("open scenario '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scenario: masonry::Scenario =
        serde_json::from_reader(r).with_context(|| "parse scenario JSON")?;
    scenario.validate()?;
    Ok(scenario)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let scenario = read_scenario_json(&args.in_path)?;
    let (report, sink) = masonry::replay_recorded(&scenario)
        .with_context(|| format!("replay scenario '{}'", args.in_path.display()))?;

    if args.dump_writes {
        eprintln!("sink writes:");
        for w in &sink.writes {
            match w {
                masonry::SinkWrite::Item { id, placement } => eprintln!(
                    "  item {id}: column={} top={} width={}",
                    placement.column, placement.top, placement.width
                ),
                masonry::SinkWrite::ContainerHeight { height } => {
                    eprintln!("  container height={height}")
                }
            }
        }
    }

    print_json(&report, args.pretty)
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let items = args
        .heights
        .iter()
        .enumerate()
        .map(|(i, &h)| masonry::ScenarioItem {
            id: masonry::ItemId(i as u64),
            height: Some(h),
        })
        .collect();
    let scenario = masonry::Scenario {
        config: masonry::GridConfig {
            columns: args.columns,
            gutter: args.gutter,
            width: 0.0,
        },
        container_width: args.width,
        items,
        events: Vec::new(),
        settle: true,
    };

    let report = masonry::replay(&scenario)?;
    print_json(&report, args.pretty)
}
