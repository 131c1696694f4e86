//
// cargo run -- label.png label.esl --barcode A4108251199313541
//
use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};

use esl_encoder::{bitonal, encode, Config, WireMode};

/// Convert an image into an .esl frame file for an electronic shelf label.
///
/// The barcode may also be supplied with `ESL_BARCODE`, from the environment or a `.env` file.
#[derive(Parser, Debug)]
#[command(name = "esl-encode")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to send, any format the image crate can decode
    input: PathBuf,

    /// Destination .esl file
    output: PathBuf,

    /// Barcode printed on the label
    #[arg(short, long, env = "ESL_BARCODE")]
    barcode: Option<String>,

    /// Use PP16 framing
    #[arg(long)]
    pp16: bool,

    /// Send the color mask plane as well
    #[arg(long)]
    color: bool,

    /// Fail on an unparsable barcode instead of addressing label 00000000
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    let args = Args::parse();
    let written = run(args)?;
    println!("Wrote {} bytes", written);

    Ok(())
}

/// The display controllers address the screen in blocks of 8 pixels.
fn dimensions_aligned(width: u32, height: u32) -> bool {
    width % 8 == 0 && height % 8 == 0
}

/// Encode `input` and write the .esl file, returning its size.
fn run(args: Args) -> Result<usize> {
    let Args {
        input,
        output,
        barcode,
        pp16,
        color,
        strict,
    } = args;

    let img = image::open(&input)
        .with_context(|| format!("Failed to open image {}", input.display()))?;
    let rgb_img = img.to_rgb8();
    let (width, height) = rgb_img.dimensions();
    log::info!("Loaded image: {}x{} pixels", width, height);
    if !dimensions_aligned(width, height) {
        log::warn!("Image dimensions {}x{} should be multiples of 8", width, height);
    }

    let pixels = bitonal::pack_rgb(&rgb_img.into_raw());

    let config = Config::new(barcode)
        .wire_mode(WireMode::from_pp16(pp16))
        .color(color)
        .strict_label_id(strict);

    let esl = encode(&pixels, width, height, &config).context("Failed to encode image")?;

    fs::write(&output, &esl)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Wrote {}", output.display());

    Ok(esl.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("esl-encode-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_dimensions_aligned() {
        assert!(dimensions_aligned(296, 128));
        assert!(dimensions_aligned(0, 0));
        assert!(!dimensions_aligned(250, 128));
        assert!(!dimensions_aligned(16, 12));
    }

    #[test]
    fn test_run_writes_file() {
        let input = scratch("white.png");
        let output = scratch("white.esl");
        image::RgbImage::from_pixel(16, 8, image::Rgb([0xFF, 0xFF, 0xFF]))
            .save(&input)
            .unwrap();

        let args = Args::try_parse_from(vec![
            "esl-encode",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--barcode",
            "A4108251199313541",
            "--pp16",
        ])
        .unwrap();
        let written = run(args).unwrap();

        let bytes = fs::read(&output).unwrap();
        assert_eq!(bytes.len(), written);
        assert_eq!(bytes[0], 0x01);
        // wake frame record: 400 repeats
        assert_eq!(&bytes[1..3], &[0x90, 0x01]);

        fs::remove_file(&input).ok();
        fs::remove_file(&output).ok();
    }

    #[test]
    fn test_run_strict_rejects_barcode() {
        let input = scratch("strict.png");
        let output = scratch("strict.esl");
        image::RgbImage::from_pixel(8, 8, image::Rgb([0x00, 0x00, 0x00]))
            .save(&input)
            .unwrap();

        let args = Args::try_parse_from(vec![
            "esl-encode",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "--barcode",
            "short",
            "--strict",
        ])
        .unwrap();
        assert!(run(args).is_err());
        assert!(!output.exists());

        fs::remove_file(&input).ok();
    }
}
