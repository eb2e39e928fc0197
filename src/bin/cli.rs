use clap::Parser;
use landmap::render::Rgb;
use landmap::{MapGenerationParams, generate_map};
use rand::Rng;
use std::path::PathBuf;

/// Верхняя граница случайного сида (как в панели настроек генератора)
const MAX_SEED: u32 = 1_000_000;

/// Генератор карт суши и воды
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (без него — настройки по умолчанию)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Путь для сохранения карты (по умолчанию: ./map.png)
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,

    /// Сид вместо указанного в конфигурации
    #[arg(short, long, conflicts_with = "random_seed")]
    seed: Option<u32>,

    /// Случайный сид от 0 до 1000000
    #[arg(long)]
    random_seed: bool,

    /// Код интерполяции для value noise: 0 — билинейная, 1 — бикубическая
    #[arg(long)]
    interpolation: Option<u8>,

    /// Сохранить карту высот в оттенках серого вместо маски суши
    #[arg(long)]
    noise: bool,

    /// Путь для JSON-отчёта (алгоритм, уровень воды, доля суши)
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    println!("🔍 Загрузка конфигурации...");
    let mut params = match &cli.config {
        Some(path) => MapGenerationParams::from_toml_file(path)?,
        None => MapGenerationParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if cli.random_seed {
        params.seed = rand::thread_rng().gen_range(0..=MAX_SEED);
    }
    if let Some(code) = cli.interpolation {
        params.set_interpolation_code(code)?;
    }

    // Цвета проверяем до генерации, чтобы не считать карту впустую
    let land = Rgb::from_hex(&params.colors.land)?;
    let water = Rgb::from_hex(&params.colors.water)?;

    println!(
        "Генерация карты {} (размер: {}×{}, сид: {})...",
        params.generator.name(),
        params.size,
        params.size,
        params.seed
    );
    let map = generate_map(&params)?;

    println!("Сохранение в {:?}", cli.output);
    if cli.noise {
        let heightmap = map
            .heightmap
            .as_ref()
            .ok_or("CellularAutomata has no heightmap, run without --noise")?;
        heightmap.save_as_png(&cli.output)?;
    } else {
        map.land.save_as_png(&cli.output, land, water)?;
    }

    if let Some(path) = &cli.report {
        std::fs::write(path, map.report().to_json()?)?;
        println!("Отчёт сохранён в {path:?}");
    }

    println!("\nГотово! Карта сохранена.");
    Ok(())
}
