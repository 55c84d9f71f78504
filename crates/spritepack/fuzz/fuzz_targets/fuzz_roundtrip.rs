#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spritepack::{decode, encode, Color, SourceImage, SpriteFormat, SpriteSheet, TileSize};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    width: u8,
    height: u8,
    tile_width: u8,
    tile_height: u8,
    format: u8,
    palette: Vec<[u8; 4]>,
    indices: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let width = input.width as u32 % 64;
    let height = input.height as u32 % 64;
    let count = (width * height) as usize;
    if input.palette.is_empty() || input.indices.len() < count {
        return;
    }

    let table: Vec<Color> = input.palette.iter().map(|&c| Color::from(c)).collect();
    let pixels = input.indices[..count]
        .iter()
        .map(|&i| table[i as usize % table.len()])
        .collect();
    let Ok(image) = SourceImage::new(width, height, pixels) else {
        return;
    };
    let Ok(tile) = TileSize::new(input.tile_width as u16, input.tile_height as u16) else {
        return;
    };

    let sheet = match input.format % 4 {
        0 => SpriteSheet::raw_from_image(&image, SpriteFormat::Rgba, tile),
        1 => SpriteSheet::raw_from_image(&image, SpriteFormat::Rgb888, tile),
        2 => SpriteSheet::raw_from_image(&image, SpriteFormat::Rgb565, tile),
        _ => SpriteSheet::packed_from_image(&image, None, tile),
    };
    let Ok(sheet) = sheet else {
        // Only palette overflow is expected here
        return;
    };

    let bytes = encode(&sheet).expect("64x64 sheets always fit");
    let decoded = decode(&bytes).expect("encoded sheets always decode");
    assert_eq!(decoded, sheet);
});
