use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};

use smartqr::builder::{default_file_name, open_logo};
use smartqr::{
    Color, DotShape, ECLevel, ExportFormat, QRBuilder, QRReader, SettingsStore, Theme,
    DEFAULT_THRESHOLD,
};

#[derive(Parser)]
#[command(name = "smartqr", version, about = "Generate styled QR codes and scan them back")]
struct Cli {
    /// Settings file holding the theme preference
    #[arg(long, global = true, env = "SMARTQR_SETTINGS")]
    settings: Option<PathBuf>,

    /// Log pipeline steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text or a URL into a styled QR image
    Generate {
        data: String,
        #[arg(long, default_value_t = Color::DEFAULT_DOT)]
        dot_color: Color,
        #[arg(long, default_value_t = Color::DEFAULT_BACKGROUND)]
        bg_color: Color,
        #[arg(long, default_value_t = DotShape::Square)]
        shape: DotShape,
        /// Image placed at the center of the symbol
        #[arg(long)]
        logo: Option<PathBuf>,
        #[arg(long, default_value = "H")]
        ec_level: ECLevel,
        #[arg(long, default_value_t = smartqr::builder::DEFAULT_SIZE)]
        size: u32,
        /// png, jpeg or webp. Inferred from the output extension when omitted
        #[arg(long)]
        format: Option<ExportFormat>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode the QR payload from an image file
    Scan {
        image: PathBuf,
        /// Channel mean above which a pixel becomes white in the rescue pass
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u8,
        /// Copy the decoded payload to the system clipboard
        #[cfg(feature = "clipboard")]
        #[arg(long)]
        copy: bool,
    },
    /// Show or change the stored theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Command::Generate {
            data,
            dot_color,
            bg_color,
            shape,
            logo,
            ec_level,
            size,
            format,
            output,
        } => {
            let logo = logo.as_deref().map(open_logo).transpose()?;

            let mut builder = QRBuilder::new(&data);
            builder.dot_color(dot_color).bg_color(bg_color).dot_shape(shape);
            builder.ec_level(ec_level).size(size);
            if let Some(logo) = logo.as_ref() {
                builder.logo(logo);
            }
            let qr = builder.build()?;

            let from_ext = output
                .as_ref()
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .and_then(|e| e.parse::<ExportFormat>().ok());
            let format = format.or(from_ext).unwrap_or_default();
            let output = output.unwrap_or_else(|| PathBuf::from(default_file_name(format)));

            qr.save(&output, format)?;
            println!("{}", output.display());
        }
        Command::Scan {
            image,
            threshold,
            #[cfg(feature = "clipboard")]
            copy,
        } => {
            let report = QRReader::new().threshold(threshold).scan_path(&image)?;
            debug!("Decoded with {:?} after {} call(s)", report.attempt, report.decode_calls);

            println!("{}", report.payload);
            if report.is_web_address() {
                println!("Web address detected, open it with: {}", report.payload);
            }

            #[cfg(feature = "clipboard")]
            if copy {
                arboard::Clipboard::new()?.set_text(report.payload.clone())?;
                info!("Copied payload to clipboard");
            }
        }
        Command::Theme { action } => {
            let path = cli.settings.unwrap_or_else(SettingsStore::default_path);
            let store = SettingsStore::new(path);
            let theme = match action {
                ThemeAction::Show => store.load_theme()?,
                ThemeAction::Toggle => store.toggle_theme()?,
                ThemeAction::Light => set_theme(&store, Theme::Light)?,
                ThemeAction::Dark => set_theme(&store, Theme::Dark)?,
            };
            println!("{theme}");
        }
    }

    Ok(())
}

fn set_theme(store: &SettingsStore, theme: Theme) -> Result<Theme, Box<dyn Error>> {
    store.save_theme(theme)?;
    info!("Theme set to {theme} in {}", store.path().display());
    Ok(theme)
}
