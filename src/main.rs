mod clipboard;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::io;
use monkey::{CharacterClass, CharacterSetOptions, DerivationInput, charset, strength};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "monkey",
    version,
    about = "Deterministic password generator: the same simple password and unique key always give the same password"
)]
struct Cli {
    #[arg(
        short,
        long,
        env = "MONKEY_LENGTH",
        value_parser = clap::value_parser!(u64).range(1..=ui::MAX_LENGTH as u64),
        help = "Password length; prompted for when omitted"
    )]
    length: Option<u64>,

    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Number of passwords, each with its own unique key"
    )]
    count: u64,

    #[arg(long, alias = "no-uppercase", help = "Exclude uppercase letters")]
    no_upper: bool,

    #[arg(long, alias = "no-lowercase", help = "Exclude lowercase letters")]
    no_lower: bool,

    #[arg(long, help = "Exclude numbers")]
    no_numbers: bool,

    #[arg(long, help = "Exclude symbols")]
    no_symbols: bool,

    #[arg(
        long,
        env = "MONKEY_SYMBOLS",
        value_name = "SET",
        help = "Custom symbol set replacing the default one"
    )]
    symbols_set: Option<String>,

    #[arg(long, help = "Copy each password to the clipboard")]
    copy: bool,

    #[arg(short, long, help = "Show the SHA-256 digest and debug logs")]
    verbose: bool,

    #[arg(short, long, conflicts_with = "verbose", help = "Print only the password")]
    quiet: bool,

    #[arg(long, help = "Hash secrets exactly as typed, without NFC normalization")]
    raw: bool,
}

impl Cli {
    fn character_set(&self) -> CharacterSetOptions {
        let mut options = CharacterSetOptions::default();
        for (excluded, class) in [
            (self.no_upper, CharacterClass::Uppercase),
            (self.no_lower, CharacterClass::Lowercase),
            (self.no_numbers, CharacterClass::Numbers),
            (self.no_symbols, CharacterClass::Symbols),
        ] {
            if excluded {
                options = options.without(class);
            }
        }
        if let Some(symbols) = &self.symbols_set {
            options = options.with_symbols(symbols);
        }
        options
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let display = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let character_set = cli.character_set();
    let classes = character_set.active_classes()?;
    tracing::debug!(
        classes = ?classes.iter().map(|c| c.class.name()).collect::<Vec<_>>(),
        custom_symbols = character_set.custom_symbols.is_some(),
        "character set ready"
    );

    let length = match cli.length {
        Some(length) => usize::try_from(length)?,
        None => ui::prompt_length()?,
    };
    let mut out = io::stdout();
    let mut err = io::stderr();

    ui::warn_short_length(&mut err, length, &character_set, &display)?;

    let count = usize::try_from(cli.count)?;
    tracing::debug!(length, count, copy = cli.copy, raw = cli.raw, "generation options");

    let simple_password = ui::prompt_secret("Simple password", cli.raw)?;

    let info = ui::OutputInfo {
        length,
        pool_size: charset::pool_size(&classes),
        copy: cli.copy,
    };

    for index in 0..count {
        ui::display_header(&mut out, index, count, &display)?;

        let unique_key = ui::prompt_secret("Unique key", cli.raw)?;
        let input = DerivationInput::new(simple_password.as_str(), unique_key.as_str(), length);

        let derived = monkey::derive(&input, &character_set)?;
        tracing::debug!(index, "password derived");

        let report = strength::estimate(derived.value());
        ui::display_output(&mut out, &derived, &report, &character_set, &info, &display)?;

        if cli.copy {
            let copied = clipboard::copy_to_clipboard(derived.value());
            ui::display_clipboard_result(&mut out, &mut err, copied, &display)?;
        }
    }

    ui::display_footer(&mut out, &display)?;

    Ok(())
}
