use std::io::Write;

use anyhow::{bail, Result};
use clap::Parser;

use huefit::cli::Args;
use huefit::color::Rgb;
use huefit::error::PaletteError;
use huefit::pipeline::extract::{ColorSource, PixelSampler, SyntheticSampler};
use huefit::pipeline::harmony::{generate_matches, MatchResult, Scheme};
use huefit::pipeline::load::load_and_prepare;
use huefit::preview;
use huefit::store::{list_palettes, save_palette, FileStore};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if args.list {
        return run_list(&args);
    }

    let dominant: Vec<Rgb> = if args.synthetic {
        SyntheticSampler::new().dominant_colors()
    } else {
        let Some(image) = args.image.as_deref() else {
            bail!("an image path is required unless --synthetic is given");
        };
        let img = load_and_prepare(image)?;
        PixelSampler::new(img.as_raw())
            .with_limits(args.colors, args.threshold)
            .dominant_colors()
    };

    if dominant.is_empty() {
        return Err(PaletteError::NoColors.into());
    }
    let base = *dominant
        .get(args.base)
        .ok_or(PaletteError::BaseOutOfRange {
            index: args.base,
            available: dominant.len(),
        })?;

    let result = generate_matches(base, args.scheme);

    let mut stdout = std::io::stdout().lock();
    if args.json {
        let doc = serde_json::json!({
            "dominant": dominant.iter().map(|c| c.to_hex()).collect::<Vec<_>>(),
            "base": { "hex": base.to_hex(), "name": base.name() },
            "matches": result,
        });
        writeln!(stdout, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else if args.preview {
        preview::print_dominant(&mut stdout, &dominant)?;
        preview::print_result(&mut stdout, base, &result)?;
    } else {
        print_plain(&mut stdout, &dominant, base, &result, args.scheme)?;
    }

    if let Some(name) = &args.save {
        let mut store = open_store(&args)?;
        let saved = save_palette(&mut store, &args.user, name, &base.to_hex(), &result)?;
        writeln!(stdout, "\nsaved as '{}' (id {})", saved.name, saved.id)?;
    }

    Ok(())
}

fn open_store(args: &Args) -> Result<FileStore> {
    Ok(match &args.store_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::open_default()?,
    })
}

fn run_list(args: &Args) -> Result<()> {
    let store = open_store(args)?;
    let entries = list_palettes(&store, &args.user)?;
    if entries.is_empty() {
        println!("no saved palettes for user '{}'", args.user);
        return Ok(());
    }
    for entry in entries {
        println!(
            "{:>4}  {:<24}  base {}  saved_at {}",
            entry.id, entry.name, entry.base_hex, entry.created_at
        );
    }
    Ok(())
}

fn print_plain(
    out: &mut impl Write,
    dominant: &[Rgb],
    base: Rgb,
    result: &MatchResult,
    scheme: Scheme,
) -> std::io::Result<()> {
    writeln!(out, "Dominant colors:")?;
    for (i, c) in dominant.iter().enumerate() {
        writeln!(out, "  {}. {}  {}", i, c.to_hex(), c.name())?;
    }
    writeln!(out, "\nBase: {} ({})", base.to_hex(), base.name())?;

    let third_label = match scheme {
        Scheme::Triadic => "Triadic",
        Scheme::Contrasting => "Contrasting",
    };
    for (label, group) in [
        ("Complementary", &result.complementary),
        ("Analogous", &result.analogous),
        (third_label, &result.triadic),
        ("Neutral", &result.neutral),
    ] {
        writeln!(out, "\n{label}:")?;
        for swatch in group {
            writeln!(out, "  {}  {}", swatch.hex, swatch.name)?;
        }
    }
    Ok(())
}
