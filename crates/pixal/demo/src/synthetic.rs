//! Seeded synthetic wine table.
//!
//! Red wines with high alcohol are rated higher, so selecting the top
//! ratings should be explained by `color` and `alcohol`.

use pixal_data::{Dataset, DataResult, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SyntheticWines {
    rng: StdRng,
}

impl SyntheticWines {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self, rows: usize) -> DataResult<Dataset> {
        let mut alcohol = Vec::with_capacity(rows);
        let mut ph = Vec::with_capacity(rows);
        let mut sulphates = Vec::with_capacity(rows);
        let mut color = Vec::with_capacity(rows);
        let mut region = Vec::with_capacity(rows);
        let mut quality = Vec::with_capacity(rows);

        for _ in 0..rows {
            let red = self.rng.gen_bool(0.4);
            let abv: f64 = self.rng.gen_range(8.5..14.5);
            let acidity: f64 = self.rng.gen_range(2.8..3.9);
            let sulph: f64 = self.rng.gen_range(0.3..1.2);

            let mut score = 5.0 + (abv - 10.0) * 0.6 + if red { 0.8 } else { -0.4 };
            score += self.rng.gen_range(-0.7..0.7);
            let rating = score.round().clamp(3.0, 9.0) as i64;

            alcohol.push(Value::from((abv * 10.0).round() / 10.0));
            ph.push(Value::from((acidity * 100.0).round() / 100.0));
            sulphates.push(if self.rng.gen_bool(0.03) {
                Value::Null
            } else {
                Value::from((sulph * 100.0).round() / 100.0)
            });
            color.push(Value::from(if red { "red" } else { "white" }));
            region.push(Value::from(
                ["douro", "mosel", "rioja", "tokaj", "barossa"][self.rng.gen_range(0..5)],
            ));
            quality.push(Value::from(rating));
        }

        Dataset::new(vec![
            ("alcohol", alcohol),
            ("ph", ph),
            ("sulphates", sulphates),
            ("color", color),
            ("region", region),
            ("quality", quality),
        ])
    }
}
