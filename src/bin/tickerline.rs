use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tickerline::{
    BackendKind, Page, PageSource, ParleyMetrics, TickerConfig, TickerEngine, outer_html,
};

#[derive(Parser, Debug)]
#[command(name = "tickerline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Install the ticker and print the per-row plan and generated stylesheet as JSON.
    Plan(PlanArgs),
    /// Install the ticker, run the page clock, and print each row's position.
    Simulate(SimulateArgs),
    /// Install the ticker and print the resulting document markup.
    Html(PlanArgs),
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine config JSON; defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the animation backend from the config.
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Font file for text measurement (fixed-advance metrics otherwise).
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    page: PageArgs,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Milliseconds of page time to run.
    #[arg(long, default_value_t = 1000)]
    ms: u64,

    /// Scroll the document to this offset before running.
    #[arg(long)]
    scroll_y: Option<f64>,

    /// Resize the viewport before running, as `WIDTHxHEIGHT`.
    #[arg(long, value_parser = parse_size)]
    resize: Option<(u32, u32)>,
}

#[derive(Debug, serde::Serialize)]
struct RowPosition {
    index: usize,
    translate_x: Option<f64>,
    paused: bool,
    visible: Option<bool>,
}

#[derive(Debug, serde::Serialize)]
struct SimulateReport {
    now_ms: u64,
    passes: u64,
    rows: Vec<RowPosition>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Html(args) => cmd_html(args),
    }
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<u32>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<u32>().map_err(|e| format!("height: {e}"))?;
    Ok((w, h))
}

fn read_json(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))
}

fn setup(args: &PageArgs) -> anyhow::Result<(Page, Option<TickerEngine>)> {
    let source = PageSource::from_json(&read_json(&args.in_path)?)
        .with_context(|| format!("parse page '{}'", args.in_path.display()))?;
    let mut config = match &args.config {
        Some(path) => TickerConfig::from_json(&read_json(path)?)
            .with_context(|| format!("parse config '{}'", path.display()))?,
        None => TickerConfig::default(),
    };
    if let Some(backend) = args.backend {
        config.backend = backend;
    }

    let mut page = Page::from_source(&source)?;
    if let Some(font) = &args.font {
        let bytes = std::fs::read(font).with_context(|| format!("read font '{}'", font.display()))?;
        page = page.with_metrics(Box::new(ParleyMetrics::from_font_bytes(&bytes)?));
    }
    let engine = TickerEngine::install(&mut page, config)?;
    if engine.is_none() {
        eprintln!("no ticker rows found");
    }
    Ok((page, engine))
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let (page, engine) = setup(&args.page)?;
    if let Some(engine) = engine {
        println!("{}", serde_json::to_string_pretty(&engine.report(&page))?);
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let (mut page, engine) = setup(&args.page)?;
    let Some(mut engine) = engine else {
        return Ok(());
    };
    if let Some(y) = args.scroll_y {
        page.scroll_to(0.0, y)?;
    }
    if let Some((w, h)) = args.resize {
        page.resize(w, h)?;
    }
    page.run_for(args.ms, &mut engine)?;

    let report = engine.report(&page);
    let mut rows = Vec::with_capacity(report.rows.len());
    for row in &report.rows {
        let (translate_x, paused) = match row.track {
            Some(track) => (
                page.current_translate_x(track),
                page.computed_style(track).is_paused(),
            ),
            None => (None, false),
        };
        rows.push(RowPosition {
            index: row.index,
            translate_x,
            paused,
            visible: row.visible,
        });
    }
    let out = SimulateReport {
        now_ms: page.now().0,
        passes: report.passes,
        rows,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_html(args: PlanArgs) -> anyhow::Result<()> {
    let (page, _engine) = setup(&args.page)?;
    let doc = page.document();
    println!("{}", outer_html(doc, doc.document_element()));
    Ok(())
}
