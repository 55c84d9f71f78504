use pretty_assertions::assert_eq;
use spritepack::*;

fn color_grid(width: u32, height: u32, colors: &[Color]) -> SourceImage {
    let pixels = (0..width * height)
        .map(|i| colors[(i as usize * 7 + i as usize / 3) % colors.len()])
        .collect();
    SourceImage::new(width, height, pixels).expect("pixel count matches")
}

fn distinct_colors(n: usize) -> Vec<Color> {
    (0..n)
        .map(|i| {
            let alpha = if i % 5 == 0 { 0 } else { 255 };
            Color::rgba(i as u8, (i * 3) as u8, (255 - i) as u8, alpha)
        })
        .collect()
}

#[test]
fn test_packed_roundtrip_every_bit_width() {
    for n in [1usize, 2, 3, 4, 5, 9, 16, 17, 33, 64, 65, 128, 129, 255] {
        let img = color_grid(24, 24, &distinct_colors(n));
        let sheet = SpriteSheet::packed_from_image(&img, None, TileSize::default()).unwrap();
        let bytes = encode_packed(&sheet).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, sheet, "palette of {} colors", n);
        assert_eq!(decoded.to_rgba8(), sheet.to_rgba8());
    }
}

#[test]
fn test_raw_roundtrip_each_format() {
    let img = color_grid(9, 5, &distinct_colors(40));
    for format in [SpriteFormat::Rgba, SpriteFormat::Rgb888, SpriteFormat::Rgb565] {
        let tile = TileSize::new(4, 2).unwrap();
        let sheet = SpriteSheet::raw_from_image(&img, format, tile).unwrap();
        let bytes = encode_raw(&sheet).unwrap();
        assert_eq!(
            bytes.len(),
            19 + 45 * format.bytes_per_pixel().unwrap(),
            "{:?}",
            format
        );
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, sheet, "{:?}", format);
        assert_eq!((decoded.columns(), decoded.rows()), (2, 2));
    }
}

#[test]
fn test_rgba_raw_preserves_source_pixels() {
    let img = color_grid(4, 4, &distinct_colors(10));
    let sheet = SpriteSheet::raw_from_image(&img, SpriteFormat::Rgba, TileSize::default()).unwrap();
    let decoded = decode(&encode(&sheet).unwrap()).unwrap();
    let expected: Vec<u8> = img.pixels().iter().flat_map(|c| c.to_array()).collect();
    assert_eq!(decoded.to_rgba8(), expected);
}

#[test]
fn test_two_by_two_example() {
    let a = Color::rgb(10, 20, 30);
    let b = Color::rgb(40, 50, 60);
    let img = SourceImage::new(2, 2, vec![a, a, b, a]).unwrap();
    let sheet = SpriteSheet::packed_from_image(&img, None, TileSize::default()).unwrap();
    let bytes = encode_packed(&sheet).unwrap();

    let header = peek_header(&bytes).unwrap();
    assert_eq!(header.asset_type, AssetType::Packed);
    assert_eq!(header.size as usize, bytes.len());

    assert_eq!(bytes[19], 2, "palette count");
    assert_eq!(sheet.palette().unwrap().bit_width(), 1);
    // 10 header + 9 fixed + 1 count + 8 palette, then one data byte
    assert_eq!(bytes.len(), 29);
    assert_eq!(bytes[28], 0b0010_0000);
}

#[test]
fn test_size_limit_boundary() {
    // 20 fixed bytes + 8 palette bytes + ceil(8 * h / 8) data bytes
    let palette = Palette::from_unique_pixels([Color::rgb(0, 0, 0), Color::rgb(255, 255, 255)])
        .unwrap();
    let sheet_of_height = |height: u16| {
        let count = 8 * height as usize;
        SpriteSheet::new(
            8,
            height,
            TileSize::default(),
            SpritePixels::Paletted {
                palette: palette.clone(),
                indices: (0..count).map(|i| (i % 2) as u8).collect(),
            },
        )
        .unwrap()
    };

    let fits = encode_packed(&sheet_of_height(65507)).unwrap();
    assert_eq!(fits.len(), 65535);
    assert_eq!(decode(&fits).unwrap(), sheet_of_height(65507));

    assert_eq!(
        encode_packed(&sheet_of_height(65508)),
        Err(SpriteError::AssetTooLarge { size: 65536 })
    );
}

#[test]
fn test_raw_too_large() {
    let sheet = SpriteSheet::new(
        256,
        64,
        TileSize::default(),
        SpritePixels::Rgba(vec![Color::default(); 256 * 64]),
    )
    .unwrap();
    assert_eq!(
        encode_raw(&sheet),
        Err(SpriteError::AssetTooLarge {
            size: 19 + 256 * 64 * 4
        })
    );
}

#[test]
fn test_fixed_palette_failure_produces_nothing() {
    let target = Palette::from_unique_pixels([Color::rgb(1, 1, 1), Color::rgb(2, 2, 2)]).unwrap();
    let img = SourceImage::new(
        3,
        1,
        vec![Color::rgb(1, 1, 1), Color::rgb(3, 3, 3), Color::rgb(2, 2, 2)],
    )
    .unwrap();
    let result = SpriteSheet::packed_from_image(&img, Some(&target), TileSize::default())
        .and_then(|sheet| encode_packed(&sheet));
    assert_eq!(
        result,
        Err(SpriteError::ColorNotFound {
            color: Color::rgb(3, 3, 3),
            position: Some((1, 0))
        })
    );
}

#[test]
fn test_fixed_palette_keeps_target_order() {
    let target = Palette::from_unique_pixels(distinct_colors(6)).unwrap();
    let img = color_grid(5, 5, &distinct_colors(6)[2..4]);
    let sheet = SpriteSheet::packed_from_image(&img, Some(&target), TileSize::default()).unwrap();
    let decoded = decode(&encode_packed(&sheet).unwrap()).unwrap();
    assert_eq!(decoded.palette(), Some(&target));
    let SpritePixels::Paletted { indices, .. } = decoded.pixels() else {
        panic!("expected paletted pixels");
    };
    assert!(indices.iter().all(|&i| i == 2 || i == 3));
}

#[test]
fn test_indexed_source_roundtrip() {
    let table = distinct_colors(20);
    let indices: Vec<u8> = (0..48u8).map(|i| (i * 5) % 20).collect();
    let img = SourceImage::indexed(8, 6, &indices, table.clone()).unwrap();
    let sheet = SpriteSheet::packed_from_image(&img, None, TileSize::default()).unwrap();
    assert_eq!(sheet.palette().unwrap().colors(), table.as_slice());
    assert_eq!(
        sheet.pixels(),
        &SpritePixels::Paletted {
            palette: Palette::from_colors(table).unwrap(),
            indices,
        }
    );
    assert_eq!(decode(&encode_packed(&sheet).unwrap()).unwrap(), sheet);
}

#[test]
fn test_single_color_sheet() {
    let img = SourceImage::new(7, 3, vec![Color::rgba(5, 6, 7, 8); 21]).unwrap();
    let sheet = SpriteSheet::packed_from_image(&img, None, TileSize::default()).unwrap();
    let bytes = encode_packed(&sheet).unwrap();
    assert_eq!(bytes.len(), 24, "no data bytes for a one-color palette");
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded, sheet);
    assert_eq!(decoded.to_rgba8(), [5u8, 6, 7, 8].repeat(21));
}

#[test]
fn test_empty_sheet() {
    let img = SourceImage::new(0, 0, vec![]).unwrap();
    let sheet = SpriteSheet::packed_from_image(&img, None, TileSize::default()).unwrap();
    let bytes = encode_packed(&sheet).unwrap();
    assert_eq!(bytes.len(), 20);
    assert_eq!(decode(&bytes).unwrap(), sheet);
}

#[test]
fn test_decode_rejects_every_truncation() {
    let img = color_grid(6, 3, &distinct_colors(5));
    let sheet = SpriteSheet::packed_from_image(&img, None, TileSize::default()).unwrap();
    let bytes = encode_packed(&sheet).unwrap();
    for len in 0..bytes.len() {
        let result = decode(&bytes[..len]);
        assert!(
            matches!(result, Err(SpriteError::TruncatedData { .. })),
            "length {} gave {:?}",
            len,
            result
        );
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        SpriteError::ColorNotFound {
            color: Color::rgb(255, 0, 0),
            position: Some((3, 4))
        }
        .to_string(),
        "color #ff0000ff at (3, 4) not found in palette"
    );
    let palette = Palette::from_unique_pixels([Color::rgb(1, 1, 1)]).unwrap();
    assert_eq!(
        palette.index_of(Color::rgb(255, 0, 0)).unwrap_err().to_string(),
        "color #ff0000ff not found in palette"
    );
    assert_eq!(
        SpriteError::AssetTooLarge { size: 70000 }.to_string(),
        "asset too large: 70000 bytes (limit 65535)"
    );
    assert_eq!(
        SpriteError::UnknownAssetType(*b"NOTASSET").to_string(),
        "unknown asset type \"NOTASSET\""
    );
}
