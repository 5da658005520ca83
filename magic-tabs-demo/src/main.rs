//! Drives a tab bar and a page indicator from a simulated pager, frame by
//! frame, and logs what each frame would paint.
//!
//! ```text
//! RUST_LOG=magic_tabs=debug,magic_tabs_demo=info cargo run -p magic-tabs-demo -- --taps 3,1
//! ```

mod pager;

use std::{
    cell::RefCell,
    path::PathBuf,
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use magic_tabs::{
    Bitmap, CommandRecorder, Constraint, Density, DrawCommand, FrameTicker, PageIndicator,
    PageIndicatorArgs, TabBar, TabBarArgsBuilder, Title,
};
use tracing::info;

use pager::{Pager, PagerEvent};

#[derive(Parser)]
#[command(name = "magic-tabs-demo")]
#[command(version, about = "Headless tab bar and page indicator driven by a simulated pager", long_about = None)]
struct Cli {
    /// Width of both widgets in pixels
    #[arg(long, default_value_t = 360.0)]
    width: f32,
    /// Display density (pixels per dp)
    #[arg(long, default_value_t = 1.0)]
    density: f32,
    /// Tab titles as `short:full`, comma separated
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_title,
        default_value = "Home:Home feed,Hot:Trending,Saved:Saved items,Me:My profile"
    )]
    titles: Vec<Title>,
    /// Tabs to tap, in order, spread evenly over the run
    #[arg(long, value_delimiter = ',', default_values_t = [2, 0])]
    taps: Vec<usize>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 90)]
    frames: u32,
    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Grow the selected label in on every selection change
    #[arg(long)]
    scale_reveal: bool,
    /// Image drawn inside the cutout (PNG or JPEG)
    #[arg(long)]
    select_image: Option<PathBuf>,
}

fn parse_title(raw: &str) -> Result<Title, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("title must not be empty".to_string());
    }
    Ok(match raw.split_once(':') {
        Some((short, full)) => Title::new(short.trim(), full.trim()),
        None => Title::new(raw, raw),
    })
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,magic_tabs=info,magic_tabs_demo=info")
        {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}

/// Counts of the draw commands in one frame.
#[derive(Debug, Default)]
struct FrameSummary {
    layers: usize,
    paths: usize,
    rects: usize,
    images: usize,
    texts: usize,
}

impl FrameSummary {
    fn of(commands: &[DrawCommand]) -> Self {
        let mut summary = Self::default();
        for command in commands {
            match command {
                DrawCommand::SaveLayer { .. } => summary.layers += 1,
                DrawCommand::FillPath { .. } => summary.paths += 1,
                DrawCommand::FillRect { .. } | DrawCommand::FillRoundRect { .. } => {
                    summary.rects += 1
                }
                DrawCommand::DrawImage { .. } => summary.images += 1,
                DrawCommand::DrawText(_) => summary.texts += 1,
                DrawCommand::Scale { .. } | DrawCommand::Restore => {}
            }
        }
        summary
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    if cli.titles.is_empty() {
        bail!("at least one title is required");
    }

    let density = Density::new(cli.density, 1.0);
    let ticker = FrameTicker::new();

    let mut args = TabBarArgsBuilder::default().scale_reveal(cli.scale_reveal);
    if let Some(path) = &cli.select_image {
        let bitmap = Bitmap::open(path)
            .with_context(|| format!("loading select image {}", path.display()))?;
        args = args.select_bitmap(bitmap);
    }
    let mut tabs = TabBar::new(args.build()?, density, ticker.clone())?;
    tabs.set_titles(&cli.titles);
    tabs.layout(tabs.measure(Constraint::Exactly(cli.width), Constraint::AtMost(f32::INFINITY)));

    let mut dots = PageIndicator::new(PageIndicatorArgs::default(), density)?;
    dots.set_count(cli.titles.len());
    dots.layout(dots.measure(Constraint::Exactly(cli.width), Constraint::AtMost(f32::INFINITY)));

    let mut pager = Pager::new(cli.titles.len(), Duration::from_millis(250), ticker.clone());

    // Selection changes are queued and handed to the pager between frames.
    let requested = Rc::new(RefCell::new(Vec::new()));
    let sink = requested.clone();
    tabs.set_on_select_change(move |index| sink.borrow_mut().push(index));

    let frame = Duration::from_millis(cli.frame_ms);
    let tap_spacing = (cli.frames / (cli.taps.len() as u32 + 1)).max(1);
    let start = Instant::now();
    let mut recorder = CommandRecorder::new();

    for index in 0..=cli.frames {
        let now = start + frame * index;

        if index > 0
            && index % tap_spacing == 0
            && let Some(&tab) = cli.taps.get((index / tap_spacing - 1) as usize)
        {
            tap_tab(&mut tabs, tab, now);
        }

        let pending: Vec<usize> = requested.borrow_mut().drain(..).collect();
        for page in pending {
            if let Some(event) = pager.set_current(page, now) {
                dispatch(event, &mut tabs, &mut dots, now);
            }
        }
        if let Some(event) = pager.tick(now) {
            dispatch(event, &mut tabs, &mut dots, now);
        }
        tabs.tick(now);

        if tabs.needs_redraw() || dots.needs_redraw() {
            recorder.clear();
            tabs.render(&mut recorder);
            dots.render(&mut recorder);
            let summary = FrameSummary::of(recorder.commands());
            info!(
                frame = index,
                selected = ?tabs.selected_index(),
                cursor = tabs.cursor_offset(),
                indicator = ?dots.cursor_rect(),
                layers = summary.layers,
                paths = summary.paths,
                rects = summary.rects,
                images = summary.images,
                texts = summary.texts,
                "frame painted"
            );
        }
    }

    info!(
        page = pager.current(),
        tab = ?tabs.selected_index(),
        dot = dots.current_page(),
        "simulation finished"
    );
    Ok(())
}

/// Taps the centre of tab `tab`'s slot.
fn tap_tab(tabs: &mut TabBar, tab: usize, now: Instant) {
    let Some(slot) = tabs
        .label_placements()
        .into_iter()
        .find(|placement| placement.index == tab)
        .map(|placement| placement.slot)
    else {
        info!(tab, "tap target out of range");
        return;
    };
    if !tabs.tap_at(slot.center_x(), slot.center_y(), now) {
        info!(tab, "tap ignored");
    }
}

fn dispatch(event: PagerEvent, tabs: &mut TabBar, dots: &mut PageIndicator, now: Instant) {
    match event {
        PagerEvent::Selected(page) => {
            tabs.select_at(page, now);
        }
        PagerEvent::Scrolled { position, offset } => dots.on_scroll(position, offset),
    }
}
