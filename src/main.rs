use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use sideways_banner::{
    birthdays,
    config::AppConfig,
    logging::{self, Sink},
    output,
    studio::Studio,
    types::{Page, RenderOptions, Rotation},
};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Sideways dot-matrix banners for continuous-feed printers.
#[derive(Parser)]
#[command(name = "sideways-banner", version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    /// Config file (default: ~/.config/sideways-banner/config.json).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one banner.
    Render {
        text: String,
        #[command(flatten)]
        layout: LayoutArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render a banner for everyone whose birthday is today.
    Birthdays {
        /// Roster CSV (default from config, else birthdays.csv).
        csv: Option<String>,
        /// Check this date instead of today (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Banner text; `{name}` becomes the display name.
        #[arg(long)]
        message: Option<String>,
        #[command(flatten)]
        layout: LayoutArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Browse birthdays and custom banners interactively.
    Studio {
        /// Roster CSV (default from config, else birthdays.csv).
        csv: Option<String>,
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RotateArg {
    Cw,
    Ccw,
}

/// Page and lettering overrides; anything unset keeps the config value.
#[derive(Args)]
struct LayoutArgs {
    /// Columns per page.
    #[arg(long)]
    cols: Option<u16>,
    /// Lines per page.
    #[arg(long)]
    lines: Option<u16>,
    /// Largest zoom to use (default: as large as fits).
    #[arg(long)]
    zoom: Option<u16>,
    /// Blank lines above and below the banner.
    #[arg(long)]
    margin: Option<u16>,
    /// Blank columns left and right of the banner.
    #[arg(long)]
    side_margin: Option<u16>,
    #[arg(long, value_enum)]
    rotate: Option<RotateArg>,
    /// Character used for ink.
    #[arg(long)]
    ink: Option<char>,
    /// Draw each letter with the letter itself.
    #[arg(long)]
    self_ink: bool,
    /// Fail on characters the font does not have.
    #[arg(long)]
    strict: bool,
    /// Let the banner run across up to this many pages.
    #[arg(long)]
    pages: Option<u16>,
}

impl LayoutArgs {
    fn apply(&self, opts: &mut RenderOptions) {
        if let Some(v) = self.cols {
            opts.page_width = v;
        }
        if let Some(v) = self.lines {
            opts.page_height = v;
        }
        if self.zoom.is_some() {
            opts.zoom = self.zoom;
        }
        if let Some(v) = self.margin {
            opts.margin_top_bottom = v;
        }
        if let Some(v) = self.side_margin {
            opts.margin_sides = v;
        }
        if let Some(r) = self.rotate {
            opts.rotation = match r {
                RotateArg::Cw => Rotation::Clockwise,
                RotateArg::Ccw => Rotation::CounterClockwise,
            };
        }
        if let Some(c) = self.ink {
            opts.ink_char = c;
        }
        if let Some(v) = self.pages {
            opts.max_pages = v;
        }
        opts.ink_from_text |= self.self_ink;
        opts.strict |= self.strict;
    }
}

#[derive(Args)]
#[group(multiple = false)]
struct OutputArgs {
    /// Show framed pages on stdout instead of raw text.
    #[arg(long)]
    preview: bool,
    /// Send to the print spooler, optionally naming a printer.
    #[arg(long, value_name = "PRINTER", num_args = 0..=1, default_missing_value = "")]
    print: Option<String>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let sink = match (&cli.log_file, &cli.command) {
        (Some(path), _) => Sink::File(path),
        (None, Command::Studio { .. }) => Sink::Off,
        (None, _) => Sink::Stderr,
    };
    logging::init(cli.verbose, sink)?;

    let mut config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Command::Render {
            text,
            layout,
            output,
        } => {
            layout.apply(&mut config.render);
            let page = sideways_banner::render(&text, &config.render)
                .with_context(|| format!("Cannot render {text:?}"))?;
            emit(&page, &output, &config)
        }
        Command::Birthdays {
            csv,
            date,
            message,
            layout,
            output,
        } => {
            layout.apply(&mut config.render);
            if let Some(m) = message {
                config.birthday_message = m;
            }
            let csv = csv.unwrap_or_else(|| config.csv_path.clone());
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            birthday_run(&csv, date, &output, &config)
        }
        Command::Studio { csv, layout } => {
            layout.apply(&mut config.render);
            let csv = csv.unwrap_or_else(|| config.csv_path.clone());
            Studio::open(&csv, config).run()
        }
    }
}

/// Produce one banner per birthday on `date`. A banner that cannot be
/// rendered or printed is logged and skipped; the run still fails at the end
/// so a scheduler notices.
fn birthday_run(csv: &str, date: NaiveDate, out: &OutputArgs, config: &AppConfig) -> Result<()> {
    let roster =
        birthdays::load(csv).with_context(|| format!("Could not open roster {csv}"))?;

    let mut failed = 0usize;
    let mut found = 0usize;
    for person in birthdays::celebrants_on(&roster, date) {
        found += 1;
        let name = person.display_name();
        let text = birthdays::banner_text(&config.birthday_message, name);
        let result = sideways_banner::render(&text, &config.render)
            .map_err(anyhow::Error::from)
            .and_then(|page| emit(&page, out, config));
        match result {
            Ok(()) => {
                if out.print.is_some() {
                    println!("Printed birthday banner for: {name}");
                }
            }
            Err(e) => {
                warn!(name, "skipping birthday banner: {e:#}");
                failed += 1;
            }
        }
    }

    if found == 0 {
        info!(%date, "no birthdays today");
    }
    if failed > 0 {
        bail!("{failed} of {found} birthday banner(s) could not be produced");
    }
    Ok(())
}

fn emit(page: &Page, out: &OutputArgs, config: &AppConfig) -> Result<()> {
    if out.preview {
        output::write_preview(&mut io::stdout().lock(), page)?;
    } else if let Some(printer) = &out.print {
        let mut spool = config.spool.clone();
        if !printer.is_empty() {
            spool.printer = Some(printer.clone());
        }
        spool.print(page).context("Failed to print banner")?;
    } else {
        output::write_plain(&mut io::stdout().lock(), page)?;
    }
    Ok(())
}
