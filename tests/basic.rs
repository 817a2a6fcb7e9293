use zenpalette::{PaletteConfig, QuantizeError, RGB8, RGBA8};

fn gradient(width: usize, height: usize) -> Vec<RGB8> {
    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            let b = ((x + y) * 128 / (width + height)) as u8;
            pixels.push(RGB8::new(r, g, b));
        }
    }
    pixels
}

fn noisy(n: usize) -> Vec<RGB8> {
    (0..n)
        .map(|i| {
            let h = (i as u32).wrapping_mul(2654435761);
            RGB8::new(h as u8, (h >> 9) as u8, (h >> 19) as u8)
        })
        .collect()
}

fn two_clusters() -> Vec<RGB8> {
    let mut pixels = Vec::with_capacity(1000);
    for i in 0..1000u32 {
        // Jitter stays inside one reduced cell per cluster.
        let j = (i % 4) as u8;
        if i % 2 == 0 {
            pixels.push(RGB8::new(10 + j, 10, 10 + j));
        } else {
            pixels.push(RGB8::new(240 + j, 240, 240 - j));
        }
    }
    pixels
}

#[test]
fn smoke_test() {
    let pixels = gradient(64, 64);
    let cmap = zenpalette::quantize(&pixels, 16).unwrap();
    assert!(!cmap.is_empty());
    assert!(cmap.len() <= 16);
    assert!(cmap.len() >= 14, "palette too small: {}", cmap.len());
}

#[test]
fn palette_size_close_to_requested() {
    let pixels = noisy(20_000);
    for k in [2u32, 3, 4, 7, 10, 32, 100, 255, 256] {
        let palette = zenpalette::quantize(&pixels, k).unwrap().palette();
        assert!(!palette.is_empty());
        assert!(palette.len() <= k as usize, "k={k} got {}", palette.len());
        assert!(palette.len() + 2 >= k as usize, "k={k} got {}", palette.len());
    }
}

#[test]
fn two_clusters_scenario() {
    let pixels = two_clusters();
    let cmap = zenpalette::quantize(&pixels, 2).unwrap();
    let palette = cmap.palette();
    assert_eq!(palette.len(), 2);

    let dark = *palette.iter().find(|c| c.r < 40).expect("near-black entry");
    let light = *palette.iter().find(|c| c.r > 200).expect("near-white entry");
    assert!(dark.g < 40 && dark.b < 40, "{dark:?}");
    assert!(light.g > 200 && light.b > 200, "{light:?}");

    assert_eq!(cmap.nearest(RGB8::new(0, 0, 0)), Some(dark));
    assert_eq!(cmap.nearest(RGB8::new(255, 255, 255)), Some(light));
    assert_eq!(cmap.map(RGB8::new(12, 10, 11)), Some(dark));
    assert_eq!(cmap.map(RGB8::new(241, 242, 243)), Some(light));
}

#[test]
fn seed_box_average_matches_mean() {
    // Every pixel sits at a reduced cell center, so the weighted centroid is the plain mean.
    let pixels = vec![
        RGB8::new(4, 4, 4),
        RGB8::new(4, 4, 4),
        RGB8::new(12, 4, 20),
        RGB8::new(20, 12, 4),
    ];
    let hist = std::sync::Arc::new(zenpalette::histogram::Histogram::from_pixels(&pixels));
    let seed = zenpalette::ColorBox::from_pixels(&pixels, hist).unwrap();
    // (4+4+12+20)/4 = 10, (4+4+4+12)/4 = 6, (4+4+20+4)/4 = 8
    assert_eq!(seed.average(), RGB8::new(10, 6, 8));
    for &p in &pixels {
        assert!(seed.contains(p));
    }
}

#[test]
fn nearest_returns_exact_palette_entries() {
    let cmap = zenpalette::quantize(&gradient(32, 32), 12).unwrap();
    for color in cmap.palette() {
        assert_eq!(cmap.nearest(color), Some(color));
    }
}

#[test]
fn map_covers_source_pixels() {
    let pixels = gradient(16, 16);
    let cmap = zenpalette::quantize(&pixels, 8).unwrap();
    let palette = cmap.palette();
    for &p in &pixels {
        let mapped = cmap.map(p).unwrap();
        assert!(palette.contains(&mapped));
    }
}

#[test]
fn error_invalid_color_count() {
    let pixels = vec![RGB8::new(0, 0, 0); 4];
    assert!(matches!(
        zenpalette::quantize(&pixels, 1),
        Err(QuantizeError::InvalidColorCount(1))
    ));
    assert!(matches!(
        zenpalette::quantize(&pixels, 300),
        Err(QuantizeError::InvalidColorCount(300))
    ));
    assert!(zenpalette::quantize(&pixels, 2).is_ok());
    assert!(zenpalette::quantize(&pixels, 256).is_ok());
}

#[test]
fn error_empty_pixels() {
    for k in [0u32, 1, 2, 10, 256, 1000] {
        assert!(matches!(
            zenpalette::quantize(&[], k),
            Err(QuantizeError::EmptyPixels)
        ));
    }
}

#[test]
fn single_color_image() {
    let pixels = vec![RGB8::new(128, 128, 128); 64];
    let palette = zenpalette::quantize(&pixels, 4).unwrap().palette();
    assert_eq!(palette, vec![RGB8::new(132, 132, 132)]);
}

#[test]
fn deterministic() {
    let pixels = noisy(4096);
    let a = zenpalette::quantize(&pixels, 24).unwrap().palette();
    let b = zenpalette::quantize(&pixels, 24).unwrap().palette();
    assert_eq!(a, b);
}

#[test]
fn independent_quantizations_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|seed| {
            std::thread::spawn(move || {
                let pixels = noisy(2000 + seed * 500);
                zenpalette::quantize(&pixels, 8).unwrap().palette()
            })
        })
        .collect();
    for handle in handles {
        let palette = handle.join().unwrap();
        assert!(!palette.is_empty() && palette.len() <= 8);
    }
}

// ===================== RGBA palette API =====================

fn rgba(pixels: &[RGB8], a: u8) -> Vec<RGBA8> {
    pixels.iter().map(|p| RGBA8::new(p.r, p.g, p.b, a)).collect()
}

#[test]
fn get_palette_filters_white_and_transparent() {
    let mut pixels = rgba(&vec![RGB8::new(30, 120, 60); 300], 255);
    pixels.extend(rgba(&vec![RGB8::new(255, 255, 255); 3000], 255));
    pixels.extend(rgba(&vec![RGB8::new(200, 0, 200); 3000], 0));

    let config = PaletteConfig::new().color_count(3).quality(1);
    let palette = zenpalette::get_palette(&pixels, &config).unwrap();
    assert_eq!(palette, vec![RGB8::new(28, 124, 60)]);

    let with_white = zenpalette::get_palette(&pixels, &config.clone().allow_white(true)).unwrap();
    assert!(with_white.contains(&RGB8::new(252, 252, 252)));
    assert!(!with_white.iter().any(|c| c.r > 150 && c.g < 50));
}

#[test]
fn get_palette_rejects_bad_config() {
    let pixels = rgba(&gradient(8, 8), 255);
    assert!(matches!(
        zenpalette::get_palette(&pixels, &PaletteConfig::new().color_count(257)),
        Err(QuantizeError::InvalidColorCount(257))
    ));
    assert!(matches!(
        zenpalette::get_palette(&pixels, &PaletteConfig::new().quality(0)),
        Err(QuantizeError::InvalidQuality(0))
    ));
}

#[test]
fn get_palette_all_filtered_is_empty_error() {
    let pixels = rgba(&gradient(8, 8), 10);
    assert!(matches!(
        zenpalette::get_palette(&pixels, &PaletteConfig::new()),
        Err(QuantizeError::EmptyPixels)
    ));
}

#[test]
fn get_color_is_first_of_five_color_palette() {
    let mut pixels = rgba(&vec![RGB8::new(220, 40, 40); 7000], 255);
    pixels.extend(rgba(&vec![RGB8::new(40, 40, 220); 3000], 255));

    // color_count is ignored by get_color.
    let config = PaletteConfig::new().quality(1).color_count(200);
    let color = zenpalette::get_color(&pixels, &config).unwrap();

    let five = config.clone().color_count(zenpalette::DOMINANT_COLOR_COUNT);
    let palette = zenpalette::get_palette(&pixels, &five).unwrap();
    assert_eq!(color, palette[0]);
    assert!(
        color == RGB8::new(220, 44, 44) || color == RGB8::new(44, 44, 220),
        "{color:?}"
    );
}

#[test]
fn bytes_and_pixels_agree() {
    let pixels = rgba(&gradient(24, 24), 255);
    let bytes: Vec<u8> = pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect();
    let config = PaletteConfig::new().color_count(6).quality(2);
    assert_eq!(
        zenpalette::get_palette(&pixels, &config).unwrap(),
        zenpalette::get_palette_from_bytes(&bytes, &config).unwrap()
    );
    assert_eq!(
        zenpalette::get_color(&pixels, &config).unwrap(),
        zenpalette::get_color_from_bytes(&bytes, &config).unwrap()
    );
}
