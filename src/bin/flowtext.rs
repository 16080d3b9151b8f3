use clap::{Args, Parser, Subcommand};
use flowtext::{Document, FontSpec, LayoutConfig, ScaledMetrics, Size, svg};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "flowtext")]
#[command(about = "Justified text flow with a cursor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out a text file and write an SVG preview
    Render {
        /// UTF-8 text file to lay out
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Print the position of every glyph
    Dump {
        /// UTF-8 text file to lay out
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Print the effective layout configuration
    Config {
        /// Print the default config file location instead
        #[arg(long)]
        path: bool,

        /// Layout config file (default: per-user layout.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Display width
    #[arg(long, default_value = "800")]
    width: f32,

    /// Display height
    #[arg(long, default_value = "600")]
    height: f32,

    /// Font size
    #[arg(long = "font-size", default_value = "24")]
    font_size: u8,

    /// Layout config file (default: per-user layout.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// An explicit config file must load; the per-user one is optional
fn load_config(path: Option<&Path>) -> flowtext::Result<LayoutConfig> {
    match path {
        Some(path) => LayoutConfig::load(path),
        None => Ok(LayoutConfig::default_path()
            .map(|path| LayoutConfig::load_or_default(&path))
            .unwrap_or_default()),
    }
}

fn layout(input: &Path, args: &LayoutArgs) -> flowtext::Result<Document> {
    let config = load_config(args.config.as_deref())?;
    let text = fs::read_to_string(input)?;
    log::info!(
        "Laying out {} ({} bytes) at {}x{}",
        input.display(),
        text.len(),
        args.width,
        args.height
    );

    let mut document = Document::with_text(
        Size::new(args.width, args.height),
        FontSpec::new(0, args.font_size),
        config,
        ScaledMetrics,
        &text,
    );
    // Leave the caret at the start, where an editor would open the file
    document.set_cursor(Default::default());
    Ok(document)
}

fn run(cli: Cli) -> flowtext::Result<()> {
    match cli.command {
        Commands::Render {
            input,
            output,
            layout: args,
        } => {
            let document = layout(&input, &args)?;
            let svg = svg::render_svg(&document);
            match output {
                Some(path) => {
                    fs::write(&path, svg)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{svg}"),
            }
        }
        Commands::Dump {
            input,
            layout: args,
        } => {
            let document = layout(&input, &args)?;
            for at in document.slots() {
                let c = document.char_at(at);
                if let Some(ch) = c.ch() {
                    println!(
                        "{} {} {} {:?} {} {} {} {}",
                        at.paragraph,
                        at.line,
                        at.index,
                        ch,
                        c.x,
                        c.y,
                        c.width(),
                        c.height()
                    );
                }
            }
        }
        Commands::Config { path, config } => {
            if path {
                match LayoutConfig::default_path() {
                    Some(path) => println!("{}", path.display()),
                    None => eprintln!("No home directory found"),
                }
            } else {
                let config = load_config(config.as_deref())?;
                print!("{}", config.to_toml_string()?);
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
