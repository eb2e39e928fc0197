pub mod cellular;
pub mod config;
pub mod diamond_square;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod map;
pub mod random;
pub mod render;
pub mod rivers;
pub mod threshold;
pub mod value_noise;

pub use cellular::synthesize_cellular_automata;
pub use config::{
    CellularAutomataSettings, DiamondSquareSettings, GeneratorSettings, MapColors,
    MapGenerationParams, ValueNoiseSettings,
};
pub use diamond_square::synthesize_diamond_square;
pub use error::{MapGenError, Result};
pub use grid::{FlowMap, Grid, Heightmap, LandMask};
pub use interpolation::InterpolationMethod;
pub use map::{GeneratedMap, MapReport, generate_map};
pub use rivers::{accumulate_river_flow, carve_rivers, classify_land_with_rivers};
pub use threshold::{classify_land, water_level};
pub use value_noise::synthesize_value_noise;
