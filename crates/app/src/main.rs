mod demo;

use std::{path::PathBuf, rc::Rc};

use clap::{Args, Parser, Subcommand};
use score_render_core::{RenderFinishedArgs, Score, ScoreRenderer, Settings, Track};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::demo::CanvasSummary;

fn main() -> score_render_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { args } => run_render(&args, None),
        Commands::Resize { args, to } => run_render(&args, Some(to)),
    }
}

fn run_render(args: &RenderArgs, resize_to: Option<u32>) -> score_render_core::Result<()> {
    let settings = args.settings()?;
    tracing::info!(
        engine = %settings.engine,
        layout = %settings.layout.mode,
        width = settings.width,
        scale = settings.scale,
        "starting render"
    );

    let mut renderer = ScoreRenderer::new(Rc::new(demo::registry()), settings);
    subscribe_printers(&mut renderer);

    let score = Rc::new(Score::new(args.title.clone()));
    let tracks = args
        .tracks
        .iter()
        .enumerate()
        .map(|(index, name)| Rc::new(Track::new(&score, index, name)))
        .collect();
    renderer.render_multiple(tracks)?;

    if let Some(width) = resize_to {
        renderer.resize(width)?;
    }

    if let Some(lookup) = renderer.bounds_lookup() {
        println!("{}", lookup.to_json()?);
    }
    Ok(())
}

fn subscribe_printers(renderer: &mut ScoreRenderer) {
    renderer.on_pre_render_event(|args| print_event("preRender", args));
    renderer.on_partial_render_finished(|args| print_event("partialRenderFinished", args));
    renderer.on_render_finished_event(|args| print_event("renderFinished", args));
    renderer.on_post_render_finished(|| println!("{}", json!({ "event": "postRenderFinished" })));
}

fn print_event(event: &str, args: &RenderFinishedArgs) {
    let summary = args.render_result.downcast_ref::<CanvasSummary>();
    println!(
        "{}",
        json!({
            "event": event,
            "totalWidth": args.total_width,
            "totalHeight": args.total_height,
            "width": args.width,
            "height": args.height,
            "renderResult": summary,
        })
    );
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render scores through pluggable engines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one full render of the given tracks.
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },
    /// Render the given tracks, then resize to a new width.
    Resize {
        #[command(flatten)]
        args: RenderArgs,
        /// Width to resize to after the first render.
        #[arg(long)]
        to: u32,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON settings file; flags below override its values.
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Canvas engine key.
    #[arg(long)]
    engine: Option<String>,
    /// Layout mode key.
    #[arg(long)]
    layout: Option<String>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    scale: Option<f32>,
    /// Title of the generated score.
    #[arg(long, default_value = "Untitled")]
    title: String,
    /// Names of the tracks to render, in order.
    tracks: Vec<String>,
}

impl RenderArgs {
    fn settings(&self) -> score_render_core::Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::from_path(path)?,
            None => Settings::default(),
        };
        if let Some(engine) = &self.engine {
            settings.engine = engine.clone();
        }
        if let Some(layout) = &self.layout {
            settings.layout.mode = layout.clone();
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        settings.validate()?;
        Ok(settings)
    }
}
