//! spritepack - Convert images to and from sprite assets
//!
//! A command-line tool for building the packed (`SPRITEPK`) and raw
//! (`SPRITERW`) sprite sheets loaded by the handheld engine.

mod load;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use spritepack::{
    decode, encode_packed, encode_raw, peek_header, reduce_colors, SpriteFormat, SpriteSheet,
    TileSize,
};

#[derive(Parser)]
#[command(name = "spritepack")]
#[command(version)]
#[command(about = "Convert images to and from sprite assets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an image as a paletted sprite sheet (SPRITEPK)
    Pack {
        /// Input image file (PNG, JPEG, GIF, WebP)
        input: PathBuf,

        /// Output asset file (default: input with .bin extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tile: TileArgs,

        /// Image whose colors form a fixed target palette
        #[arg(short, long)]
        palette: Option<PathBuf>,

        /// Reduce the image to at most this many colors first (2-254, lossy)
        #[arg(short = 'c', long)]
        max_colors: Option<u8>,
    },

    /// Encode an image as a direct color sprite sheet (SPRITERW)
    Raw {
        /// Input image file (PNG, JPEG, GIF, WebP)
        input: PathBuf,

        /// Output asset file (default: input with .bin extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixel format
        #[arg(short, long, value_enum, default_value_t = RawFormat::Rgb565)]
        format: RawFormat,

        #[command(flatten)]
        tile: TileArgs,
    },

    /// Decode a sprite asset to PNG
    Unpack {
        /// Input asset file
        input: PathBuf,

        /// Output PNG file (default: input with .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the header and layout of a sprite asset
    Info {
        /// Input asset file
        input: PathBuf,
    },
}

#[derive(clap::Args)]
struct TileArgs {
    /// Tile width in pixels
    #[arg(long, default_value_t = 8)]
    tile_width: u16,

    /// Tile height in pixels
    #[arg(long, default_value_t = 8)]
    tile_height: u16,
}

impl TileArgs {
    fn tile_size(&self) -> Result<TileSize> {
        TileSize::new(self.tile_width, self.tile_height).context("Invalid tile size")
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RawFormat {
    Rgba,
    Rgb888,
    Rgb565,
}

impl From<RawFormat> for SpriteFormat {
    fn from(format: RawFormat) -> Self {
        match format {
            RawFormat::Rgba => SpriteFormat::Rgba,
            RawFormat::Rgb888 => SpriteFormat::Rgb888,
            RawFormat::Rgb565 => SpriteFormat::Rgb565,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            input,
            output,
            tile,
            palette,
            max_colors,
        } => {
            let mut image = load::load_image(&input)?;
            if let Some(max_colors) = max_colors {
                info!("Reducing '{}' to {} colors", input.display(), max_colors);
                image = reduce_colors(&image, max_colors)
                    .with_context(|| format!("Failed to reduce '{}'", input.display()))?;
            }
            let target = palette.as_deref().map(load::load_palette).transpose()?;

            let sheet = SpriteSheet::packed_from_image(&image, target.as_ref(), tile.tile_size()?)
                .with_context(|| format!("Failed to pack '{}'", input.display()))?;
            let bytes = encode_packed(&sheet)
                .with_context(|| format!("Failed to encode '{}'", input.display()))?;

            let path = output.unwrap_or_else(|| input.with_extension("bin"));
            write_asset(&path, &bytes)?;
        }

        Commands::Raw {
            input,
            output,
            format,
            tile,
        } => {
            let image = load::load_image(&input)?;
            let tile = tile.tile_size()?;
            let sheet = SpriteSheet::raw_from_image(&image, format.into(), tile)
                .with_context(|| format!("Failed to convert '{}'", input.display()))?;
            let bytes = encode_raw(&sheet)
                .with_context(|| format!("Failed to encode '{}'", input.display()))?;

            let path = output.unwrap_or_else(|| input.with_extension("bin"));
            write_asset(&path, &bytes)?;
        }

        Commands::Unpack { input, output } => {
            let sheet = read_asset(&input)?;
            let path = output.unwrap_or_else(|| input.with_extension("png"));

            let img = image::RgbaImage::from_raw(
                sheet.width() as u32,
                sheet.height() as u32,
                sheet.to_rgba8(),
            )
            .context("Failed to create image from decoded data")?;
            img.save(&path)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;

            info!(
                "Decoded: {}x{} {:?} -> '{}'",
                sheet.width(),
                sheet.height(),
                sheet.format(),
                path.display()
            );
        }

        Commands::Info { input } => {
            print!("{}", describe(&input)?);
        }
    }

    Ok(())
}

/// Summarizes the header and layout of the asset at `path`.
fn describe(path: &Path) -> Result<String> {
    let data = fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    let header = peek_header(&data)
        .with_context(|| format!("Failed to read header of '{}'", path.display()))?;
    let sheet = decode(&data).with_context(|| format!("Failed to decode '{}'", path.display()))?;

    let mut text = format!(
        "type:    {:?}\nsize:    {} bytes\npixels:  {}x{}\ntiles:   {}x{}\nformat:  {:?}\n",
        header.asset_type,
        header.size,
        sheet.width(),
        sheet.height(),
        sheet.columns(),
        sheet.rows(),
        sheet.format()
    );
    if let Some(palette) = sheet.palette() {
        text.push_str(&format!(
            "palette: {} colors, {} bits per pixel\n",
            palette.len(),
            palette.bit_width()
        ));
    }
    Ok(text)
}

fn read_asset(path: &Path) -> Result<SpriteSheet> {
    let data = fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))?;
    info!("Decoding '{}' ({} bytes)", path.display(), data.len());
    decode(&data).with_context(|| format!("Failed to decode '{}'", path.display()))
}

fn write_asset(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write '{}'", path.display()))?;
    info!("Written {} bytes to '{}'", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritepack::{encode_packed, Color, SourceImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("spritepack-cli-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_describe_packed_asset() {
        let image = SourceImage::new(16, 8, vec![Color::rgb(1, 2, 3); 128]).unwrap();
        let sheet = SpriteSheet::packed_from_image(&image, None, TileSize::default()).unwrap();
        let path = temp_path("info.bin");
        fs::write(&path, encode_packed(&sheet).unwrap()).unwrap();

        let text = describe(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert!(text.contains("type:    Packed\n"), "{}", text);
        assert!(text.contains("tiles:   2x1\n"), "{}", text);
        assert!(text.contains("palette: 1 colors, 0 bits per pixel\n"), "{}", text);
    }

    #[test]
    fn test_describe_names_file_on_bad_header() {
        let path = temp_path("bad.bin");
        fs::write(&path, b"NOTASSET\x0a\x00").unwrap();

        let err = describe(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        let message = format!("{:#}", err);
        assert!(message.contains("Failed to read header of"), "{}", message);
        assert!(message.contains(&path.display().to_string()), "{}", message);
        assert!(message.contains("unknown asset type"), "{}", message);
    }

    #[test]
    fn test_zero_tile_size_has_context() {
        let args = TileArgs {
            tile_width: 0,
            tile_height: 8,
        };
        let message = format!("{:#}", args.tile_size().unwrap_err());
        assert_eq!(message, "Invalid tile size: invalid tile size: 0x8");
    }
}
