use landmap::threshold::histogram;
use landmap::{
    CellularAutomataSettings, DiamondSquareSettings, GeneratorSettings, Grid, Heightmap,
    InterpolationMethod, MapGenError, MapGenerationParams, ValueNoiseSettings,
    accumulate_river_flow, classify_land, classify_land_with_rivers, generate_map,
    synthesize_cellular_automata, synthesize_diamond_square, synthesize_value_noise, water_level,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn uniform_map(seed: u64, size: usize) -> Heightmap {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Grid::from_fn(size, |_, _| rng.gen_range(0..=255u8))
}

#[test]
fn every_generator_is_deterministic() {
    let noise = ValueNoiseSettings {
        first_octave: 2,
        last_octave: 6,
        interpolation: InterpolationMethod::Bicubic,
    };
    assert_eq!(
        synthesize_value_noise(31, 128, &noise).unwrap(),
        synthesize_value_noise(31, 128, &noise).unwrap()
    );

    let ds = DiamondSquareSettings {
        roughness: 1.5,
        fragmentation: 4,
    };
    assert_eq!(
        synthesize_diamond_square(31, 128, &ds).unwrap(),
        synthesize_diamond_square(31, 128, &ds).unwrap()
    );

    let ca = CellularAutomataSettings::default();
    assert_eq!(
        synthesize_cellular_automata(31, 100, &ca),
        synthesize_cellular_automata(31, 100, &ca)
    );
}

#[test]
fn diamond_square_rejects_size_100() {
    let err = synthesize_diamond_square(0, 100, &DiamondSquareSettings::default());
    assert!(matches!(err, Err(MapGenError::SizeNotPowerOfTwo(100))));
}

#[test]
fn diamond_square_without_roughness_is_flat_zero() {
    let settings = DiamondSquareSettings {
        roughness: 0.0,
        fragmentation: 0,
    };
    let map = synthesize_diamond_square(0, 4, &settings).unwrap();
    assert_eq!(map.data, vec![0; 16]);
}

#[test]
fn threshold_on_uniform_map_is_within_one_bucket() {
    let map = uniform_map(2024, 100);
    let level = usize::from(water_level(&map, 30.0));
    let bucket = histogram(&map)[level];
    let land = classify_land(&map, 30.0).count(&true);

    assert!(land >= 3000, "land {land}");
    assert!(land < 3000 + bucket, "land {land}, bucket {bucket}");
}

#[test]
fn threshold_hits_exact_count_when_buckets_are_single_cells() {
    // 256 различных значений — каждая корзина ровно одна клетка
    let map = Grid::from_fn(16, |x, y| (x * 16 + y) as u8);
    for percentage in [0.0, 25.0, 50.0, 75.0, 100.0] {
        let land = classify_land(&map, percentage).count(&true);
        assert_eq!(land as f64, 256.0 * percentage / 100.0, "{percentage}%");
    }
}

#[test]
fn column_ramp_splits_at_median() {
    let map = Grid::from_fn(64, |_, y| y as u8);
    assert_eq!(water_level(&map, 50.0), 32);
    let mask = classify_land(&map, 50.0);
    for x in [0, 17, 63] {
        assert!(!mask.get(x, 31));
        assert!(mask.get(x, 32));
    }
}

#[test]
fn value_noise_land_target_within_one_bucket() {
    let settings = ValueNoiseSettings {
        first_octave: 1,
        last_octave: 7,
        interpolation: InterpolationMethod::Bicubic,
    };
    let map = synthesize_value_noise(77, 256, &settings).unwrap();
    assert!(map.value_range().unwrap().1 > 0);

    let level = usize::from(water_level(&map, 30.0));
    let bucket = histogram(&map)[level];
    let target = 256 * 256 * 30 / 100;
    let land = classify_land(&map, 30.0).count(&true);
    assert!(land > target && land <= target + bucket, "land {land}, bucket {bucket}");
}

#[test]
fn river_flow_grows_beyond_cell_count() {
    let map = uniform_map(5, 64);
    let level = water_level(&map, 50.0);
    let flow = accumulate_river_flow(&map, level);
    let total: u64 = flow.data.iter().map(|&f| u64::from(f)).sum();
    // Поток не сохраняется: каждая обработанная клетка добавляет свой поток соседу
    assert!(total > 64 * 64);
}

#[test]
fn rivers_carve_channels_out_of_smooth_terrain() {
    let settings = ValueNoiseSettings {
        first_octave: 3,
        last_octave: 7,
        interpolation: InterpolationMethod::Bilinear,
    };
    let map = synthesize_value_noise(3, 128, &settings).unwrap();
    let plain = classify_land(&map, 60.0);
    let carved = classify_land_with_rivers(&map, 60.0);
    assert!(carved.count(&true) <= plain.count(&true));
    assert!(
        plain
            .data
            .iter()
            .zip(&carved.data)
            .all(|(&p, &c)| p || !c)
    );
}

#[test]
fn config_file_drives_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.toml");
    std::fs::write(
        &path,
        r##"
        seed = 5
        size = 64
        land_percentage = 45.0
        rivers = true

        [generator]
        algorithm = "DiamondSquare"
        roughness = 2.0
        fragmentation = 1

        [colors]
        land = "#00ff00"
        "##,
    )
    .unwrap();

    let params = MapGenerationParams::from_toml_file(&path).unwrap();
    assert_eq!(params.colors.water, "#3c7fff");
    assert!(matches!(params.generator, GeneratorSettings::DiamondSquare(_)));

    let map = generate_map(&params).unwrap();
    let report = map.report();
    assert_eq!(report.size, 64);
    assert!(report.water_level.is_some());
    assert!(report.land_cells > 0);

    // Реки только убирают сушу из обычной маски
    let plain = classify_land(map.heightmap.as_ref().unwrap(), 45.0);
    assert!(report.land_cells <= plain.count(&true));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MapGenerationParams::from_toml_file(dir.path().join("absent.toml"));
    assert!(matches!(err, Err(MapGenError::Io(_))));
}
