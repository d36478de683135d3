#![allow(dead_code)]

use koi_core::{PaletteIndex, PaletteSample, Plane, Vector2, Vector3};
use koi_genetics::layer::{
    LayerBase, LayerRidge, LayerShapeBody, LayerShapeFin, LayerSpots, LayerStripes, LayerWeb,
};
use koi_genetics::{Fin, Fins, Fish, FishBody, Layer, Pattern, Tail};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn plane(z: f32) -> Plane {
    Plane::new(Vector3::new(12.0, -8.0, z), Vector3::new(0.3, 0.1, 1.0))
}

pub fn spots(palette_index: PaletteIndex) -> Layer {
    Layer::Spots(LayerSpots {
        plane: plane(4.0),
        palette_index,
        scale: 110,
        stretch: 90,
        threshold: 140,
        x_focus: 120,
        y_focus: 128,
        power: 70,
    })
}

pub fn stripes(palette_index: PaletteIndex) -> Layer {
    Layer::Stripes(LayerStripes {
        plane: plane(-30.0),
        palette_index,
        scale: 90,
        distortion: 60,
        roughness: 130,
        threshold: 128,
        slant: 20,
        suppression: 200,
        focus: 128,
        power: 90,
    })
}

pub fn ridge(palette_index: PaletteIndex) -> Layer {
    Layer::Ridge(LayerRidge {
        plane: plane(80.0),
        palette_index,
        scale: 128,
        power: 100,
        threshold: 150,
        focus: 128,
        focus_power: 60,
    })
}

pub fn web(palette_index: PaletteIndex) -> Layer {
    Layer::Web(LayerWeb {
        plane: plane(0.0),
        palette_index,
        scale: 100,
        thickness: 40,
        threshold: 128,
    })
}

pub fn pattern(base: PaletteIndex, layers: Vec<Layer>) -> Pattern {
    Pattern::new(
        LayerBase {
            palette_index: base,
            sample: PaletteSample::new(64, 190),
        },
        layers,
        LayerShapeBody {
            center_power: 128,
            radius_power: 120,
            eye_position: 140,
        },
        LayerShapeFin {
            angle: 100,
            inset: 128,
            dips: 90,
            dip_power: 128,
            roundness: 160,
        },
    )
}

pub fn fish(base: PaletteIndex, layers: Vec<Layer>) -> Fish {
    Fish {
        body: FishBody {
            pattern: pattern(base, layers),
            fins: Fins::new(vec![Fin { at: 70, radius: 120 }, Fin { at: 180, radius: 80 }])
                .expect("two fin pairs"),
            tail: Tail { length: 128 },
            length: 100,
            radius: 140,
            growth_speed: 128,
            mating_frequency: 128,
            offspring_count: 160,
            age: 0,
        },
        position: Vector2::new(0.0, 0.0),
        direction: Vector2::new(1.0, 0.0),
    }
}
