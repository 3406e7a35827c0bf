//! sdff - SDFF font asset tool
//!
//! Headless side of the SDFF pipeline: build a compact `.sdff` asset
//! from a rasterized atlas PNG plus a metrics text, inspect an asset,
//! or run the layout engine over it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use sdff_font::{codec, AtlasImage, FontAsset};
use sdff_text::TextBox;

const USAGE: &str = "\
sdff - SDFF font asset tool

USAGE:
    sdff pack <atlas.png> <metrics.txt> [-o <out.sdff>] [--family <name>] [--size <px>]
    sdff info <font.sdff>
    sdff layout <font.sdff> <box-width> <text>...

The two pack inputs may be given in either order; they are told apart
by content. Family defaults to the metrics file stem, base size to 32.
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("pack") => pack(&args[1..]),
        Some("info") => info(&args[1..]),
        Some("layout") => layout(&args[1..]),
        _ => {
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x89, b'P', b'N', b'G'])
}

/// The two pack inputs sorted out by content. The original tool
/// accepted the atlas and the metrics file in either order, so the
/// PNG is sniffed rather than positional.
struct PackInputs {
    png_path: PathBuf,
    png: Vec<u8>,
    metrics_path: PathBuf,
    metrics: Vec<u8>,
}

fn classify_inputs(a: (PathBuf, Vec<u8>), b: (PathBuf, Vec<u8>)) -> Result<PackInputs> {
    match (is_png(&a.1), is_png(&b.1)) {
        (true, false) => Ok(PackInputs {
            png_path: a.0,
            png: a.1,
            metrics_path: b.0,
            metrics: b.1,
        }),
        (false, true) => Ok(PackInputs {
            png_path: b.0,
            png: b.1,
            metrics_path: a.0,
            metrics: a.1,
        }),
        (true, true) => bail!("both inputs are PNG images, one must be metrics text"),
        (false, false) => bail!("neither input is a PNG image"),
    }
}

fn pack(args: &[String]) -> Result<()> {
    let mut inputs: Vec<PathBuf> = Vec::new();
    let mut out: Option<PathBuf> = None;
    let mut family: Option<String> = None;
    let mut base_size = 32.0f32;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--out" => {
                out = Some(iter.next().context("-o needs a path")?.into());
            }
            "--family" => {
                family = Some(iter.next().context("--family needs a name")?.clone());
            }
            "--size" => {
                base_size = iter
                    .next()
                    .context("--size needs a value")?
                    .parse()
                    .context("--size must be a number")?;
            }
            _ => inputs.push(arg.into()),
        }
    }
    let [a, b] = inputs.as_slice() else {
        bail!("pack needs exactly two input files (atlas + metrics)");
    };

    let inputs = classify_inputs((a.clone(), read(a)?), (b.clone(), read(b)?))?;

    let atlas = image::load_from_memory(&inputs.png)
        .with_context(|| format!("decoding {}", inputs.png_path.display()))?
        .to_luma8();
    let (width, height) = atlas.dimensions();
    let atlas = AtlasImage::from_luma(width, height, atlas.into_raw())
        .context("atlas buffer size mismatch")?;

    let metrics = String::from_utf8(inputs.metrics)
        .with_context(|| format!("{} is not UTF-8", inputs.metrics_path.display()))?;

    let family = family.unwrap_or_else(|| {
        inputs
            .metrics_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Unnamed".to_string())
    });

    let asset = FontAsset::from_image_and_metrics(family, base_size, atlas, &metrics)?;
    let out = out.unwrap_or_else(|| PathBuf::from(format!("{}.sdff", asset.family())));

    std::fs::write(&out, codec::encode(&asset))
        .with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(
        "Packed '{}' ({} glyphs, {}x{} atlas) -> {}",
        asset.family(),
        asset.glyph_count(),
        width,
        height,
        out.display()
    );
    Ok(())
}

fn info(args: &[String]) -> Result<()> {
    let [path] = args else {
        bail!("info needs one .sdff file");
    };
    let asset = codec::decode(&read(Path::new(path))?)?;

    println!("family:      {}", asset.family());
    println!("base size:   {}", asset.base_size());
    println!("line height: {}", asset.line_height());
    println!("glyphs:      {}", asset.glyph_count());
    println!(
        "atlas:       {}x{} ({} bytes)",
        asset.atlas().width,
        asset.atlas().height,
        asset.atlas().pixels.len()
    );
    Ok(())
}

fn layout(args: &[String]) -> Result<()> {
    let [path, width, text @ ..] = args else {
        bail!("layout needs a .sdff file, a box width and text");
    };
    if text.is_empty() {
        bail!("layout needs text to lay out");
    }
    let box_width: f32 = width.parse().context("box width must be a number")?;
    let asset = codec::decode(&read(Path::new(path))?)?;

    let mut text_box = TextBox::new(Arc::new(asset), box_width, 0.0);
    text_box.set_text(text.join(" "));

    for (i, line) in text_box.layout().lines.iter().enumerate() {
        println!("line {:>3}: width {:>8.2}  glyphs {}", i, line.width, line.quads.len());
    }
    let (w, h) = text_box.bounds();
    println!("bounds: {w:.2} x {h:.2}");
    Ok(())
}
