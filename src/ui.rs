use anyhow::{Context, Result};
use console::{Style, Term};
use monkey::charset::CharacterSetOptions;
use monkey::strength::{StrengthLevel, StrengthReport, Tone};
use monkey::{CharacterClass, DerivedPassword};
use rpassword::prompt_password;
use std::io::{self, BufRead, Write};
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

pub const DEFAULT_LENGTH: usize = 16;
pub const MIN_SAFE_LENGTH: usize = 12;
pub const MAX_LENGTH: usize = 4096;
pub const MAX_SECRET_BYTES: usize = 1024 * 1024;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
    pub verbose: bool,
}

pub struct OutputInfo {
    pub length: usize,
    pub pool_size: usize,
    pub copy: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn branches(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn styled(options: &DisplayOptions, style: Style) -> Style {
    if options.color_support {
        style
    } else {
        Style::new()
    }
}

fn validate_control_characters(s: &str, input_name: &str) -> Result<()> {
    let control_chars: Vec<usize> = s
        .chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .map(|(pos, _)| pos)
        .collect();

    if !control_chars.is_empty() {
        let term = Term::stderr();

        let warning_msg = format!(
            "WARNING: {} contains {} control character(s) at position(s): {}",
            input_name,
            control_chars.len(),
            control_chars
                .iter()
                .map(|pos| pos.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        term.write_line(&warning_msg)?;
        term.write_str("Continue anyway? [y/N]: ")?;
        term.flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;
        let response = response.trim().to_lowercase();

        term.clear_last_lines(2)?;

        if response != "y" && response != "yes" {
            anyhow::bail!("Aborted");
        }
    }

    Ok(())
}

fn normalize_secret(s: &str, raw: bool) -> Zeroizing<String> {
    if raw {
        Zeroizing::new(s.to_string())
    } else {
        Zeroizing::new(s.nfc().collect())
    }
}

pub fn prompt_secret(label: &str, raw: bool) -> Result<Zeroizing<String>> {
    let input = Zeroizing::new(
        prompt_password(format!("{}: ", label)).with_context(|| format!("Failed to read {}", label))?,
    );

    if input.is_empty() {
        anyhow::bail!("{} cannot be empty", label);
    }

    let normalized = normalize_secret(&input, raw);

    if normalized.len() > MAX_SECRET_BYTES {
        anyhow::bail!(
            "{} too long ({} bytes, maximum is {})",
            label,
            normalized.len(),
            MAX_SECRET_BYTES
        );
    }

    validate_control_characters(&normalized, label)?;

    Ok(normalized)
}

pub fn parse_length(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_LENGTH);
    }

    let length: usize = trimmed
        .parse()
        .with_context(|| format!("Invalid length \"{}\", expected a positive integer", trimmed))?;

    if length == 0 {
        anyhow::bail!("Length must be a positive integer");
    }
    if length > MAX_LENGTH {
        anyhow::bail!("Length too large ({}, maximum is {})", length, MAX_LENGTH);
    }

    Ok(length)
}

pub fn prompt_length() -> Result<usize> {
    read_length(&mut io::stdin().lock(), &mut io::stderr())
}

fn read_length(input: &mut impl BufRead, prompt: &mut impl Write) -> Result<usize> {
    loop {
        write!(prompt, "Length [{}]: ", DEFAULT_LENGTH)?;
        prompt.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("No length given");
        }

        match parse_length(&line) {
            Ok(length) => return Ok(length),
            Err(e) => writeln!(prompt, "{:#}", e)?,
        }
    }
}

pub fn warn_short_length(
    err: &mut impl Write,
    length: usize,
    character_set: &CharacterSetOptions,
    options: &DisplayOptions,
) -> io::Result<()> {
    let enabled = character_set.enabled_count();
    if length < enabled {
        let style = styled(options, Style::new().yellow());
        writeln!(
            err,
            "{}",
            style.apply_to(format!(
                "Warning: length {} cannot fit all {} enabled character classes",
                length, enabled
            ))
        )?;
    }
    Ok(())
}

pub fn display_header(
    out: &mut impl Write,
    index: usize,
    count: usize,
    options: &DisplayOptions,
) -> io::Result<()> {
    if count > 1 && !options.quiet {
        let style = styled(options, Style::new().blue().bold());
        writeln!(out, "{}", style.apply_to(format!("Password {} of {}", index + 1, count)))?;
    }
    Ok(())
}

pub fn display_output(
    out: &mut impl Write,
    derived: &DerivedPassword,
    report: &StrengthReport,
    character_set: &CharacterSetOptions,
    info: &OutputInfo,
    options: &DisplayOptions,
) -> io::Result<()> {
    if options.quiet {
        return writeln!(out, "{}", derived.value());
    }

    writeln!(out, "Out:\n{}\n", derived.value())?;

    if options.verbose {
        writeln!(out, "SHA-256:\n{}\n", derived.source_hash_hex())?;
    }

    display_settings(out, character_set, info, options)?;
    display_stats(out, derived, report, info, options)
}

fn display_settings(
    out: &mut impl Write,
    character_set: &CharacterSetOptions,
    info: &OutputInfo,
    options: &DisplayOptions,
) -> io::Result<()> {
    let (mid, last) = branches(options.unicode_support);
    let on = styled(options, Style::new().green());
    let off = styled(options, Style::new().red());

    writeln!(out, "Settings:")?;

    for class in CharacterClass::ALL {
        let enabled = character_set.is_enabled(class);
        let label = if enabled { "on" } else { "off" };
        let style = if enabled { &on } else { &off };

        if class == CharacterClass::Symbols && enabled && character_set.custom_symbols.is_some() {
            let symbols: String = character_set.symbols().into_iter().collect();
            writeln!(
                out,
                "  {} {:<10} {} ({})",
                mid,
                class.to_string(),
                style.apply_to(label),
                symbols
            )?;
        } else {
            writeln!(out, "  {} {:<10} {}", mid, class.to_string(), style.apply_to(label))?;
        }
    }

    writeln!(out, "  {} Hash       SHA-256", mid)?;
    writeln!(
        out,
        "  {} Output     {} {}",
        mid,
        info.length,
        if info.length == 1 { "char" } else { "chars" }
    )?;
    writeln!(
        out,
        "  {} Clipboard  {}",
        last,
        if info.copy { "copy" } else { "off" }
    )?;

    writeln!(out)
}

fn display_stats(
    out: &mut impl Write,
    derived: &DerivedPassword,
    report: &StrengthReport,
    info: &OutputInfo,
    options: &DisplayOptions,
) -> io::Result<()> {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (mid, last) = branches(options.unicode_support);

    let length = derived.char_count();
    let length_secure = length >= MIN_SAFE_LENGTH;
    let length_style = styled(
        options,
        if length_secure {
            Style::new().green()
        } else {
            Style::new().yellow()
        },
    );
    let length_status = if length_secure { check_ok } else { check_warn };

    let strength_secure = report.level >= StrengthLevel::Strong;
    let strength_style = styled(
        options,
        match report.level {
            StrengthLevel::VeryWeak => Style::new().red().bold(),
            StrengthLevel::Weak => Style::new().color256(208).bold(),
            StrengthLevel::Moderate => Style::new().yellow().bold(),
            StrengthLevel::Strong | StrengthLevel::VeryStrong => Style::new().green().bold(),
        },
    );
    let strength_status = if strength_secure { check_ok } else { check_warn };

    writeln!(out, "Stats:")?;

    writeln!(
        out,
        "  {} Length     {} {} {}",
        mid,
        length_style.apply_to(format!("[{}]", length_status)),
        length_style.apply_to(length),
        if length == 1 { "char" } else { "chars" }
    )?;
    writeln!(out, "  {} Charset    {} chars", mid, info.pool_size)?;

    for (i, item) in report.feedback.iter().enumerate() {
        let tone_style = styled(
            options,
            match item.tone {
                Tone::Good => Style::new().green(),
                Tone::Fair => Style::new().yellow(),
                Tone::Poor => Style::new().red(),
            },
        );
        let label = if i == 0 { "Feedback" } else { "" };
        writeln!(out, "  {} {:<10} {}", mid, label, tone_style.apply_to(item.message))?;
    }

    writeln!(
        out,
        "  {} Strength   {} {}",
        last,
        strength_style.apply_to(format!("[{}]", strength_status)),
        strength_style.apply_to(report.level)
    )
}

pub fn display_clipboard_result(
    out: &mut impl Write,
    err: &mut impl Write,
    copied: Result<bool>,
    options: &DisplayOptions,
) -> io::Result<()> {
    let ok = styled(options, Style::new().green().bold());
    let warn = styled(options, Style::new().yellow().bold());

    match copied {
        Ok(true) if options.quiet => Ok(()),
        Ok(true) => writeln!(out, "\n{}", ok.apply_to("Password copied to clipboard.")),
        Ok(false) => writeln!(
            err,
            "{}",
            warn.apply_to("No clipboard available. Please copy the password manually.")
        ),
        Err(e) => writeln!(
            err,
            "{}",
            warn.apply_to(format!("{:#}. Please copy the password manually.", e))
        ),
    }
}

pub fn display_footer(out: &mut impl Write, options: &DisplayOptions) -> io::Result<()> {
    if options.quiet {
        return Ok(());
    }

    let dim = styled(options, Style::new().dim());
    writeln!(
        out,
        "\n{}",
        dim.apply_to("Nothing is stored. The same inputs always give the same password.")
    )
}
