use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    /// Index into `weights`, chosen proportionally.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut target = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                return i;
            }
            target -= w;
        }
        weights.len() - 1
    }
}

/// (cake, base price, popularity weight)
const CAKES: [(&str, f64, f64); 12] = [
    ("Chocolate Fudge", 32.99, 9.0),
    ("Carrot Cake", 29.99, 7.0),
    ("Red Velvet", 34.99, 6.5),
    ("Strawberry Shortcake", 31.49, 5.0),
    ("Lemon Chiffon", 27.99, 4.0),
    ("German Chocolate", 33.49, 3.5),
    ("Coconut Cream", 30.99, 3.0),
    ("Tiramisu", 38.99, 2.5),
    ("Black Forest", 36.49, 2.0),
    ("Italian Cream", 35.99, 1.5),
    ("Hummingbird", 31.99, 1.0),
    ("Rainbow Sprinkle", 26.49, 0.8),
];

/// Date spellings the dashboard's loader accepts, so the sample exercises them.
const DATE_STYLES: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y-%m-%d %H:%M:%S"];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sales.csv"));

    let mut rng = SimpleRng::new(42);
    let first_day = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;
    let days = 180;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(["OrderDate", "FSOrderNumber", "RetailPrice", "CakeName", "Store"])?;

    let stores = ["Midlothian", "Short Pump", "Carytown", "Chesterfield"];
    let weights: Vec<f64> = CAKES.iter().map(|c| c.2).collect();

    let mut order_number: u64 = 100_000;
    let mut rows = 0usize;
    let mut malformed = 0usize;

    for day in 0..days {
        let date = first_day + Duration::days(day);
        // Busier weekends.
        let orders_today = 3 + rng.below(6) + if day % 7 >= 5 { 4 } else { 0 };

        for _ in 0..orders_today {
            order_number += 1;
            let store = stores[rng.below(stores.len())];
            let line_items = 1 + rng.weighted(&[6.0, 2.0, 1.0]);

            for _ in 0..line_items {
                let (cake, base, _) = CAKES[rng.weighted(&weights)];
                let size_factor = [1.0, 1.5, 2.25][rng.below(3)];
                let price = (base * size_factor * 100.0).round() / 100.0;

                // Roughly one row in 150 carries a date the loader must skip.
                let date_text = if rng.below(150) == 0 {
                    malformed += 1;
                    "TBD".to_string()
                } else {
                    date.format(DATE_STYLES[rng.below(DATE_STYLES.len())]).to_string()
                };

                writer.write_record([
                    date_text,
                    order_number.to_string(),
                    format!("{price:.2}"),
                    cake.to_string(),
                    store.to_string(),
                ])?;
                rows += 1;
            }
        }
    }

    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {rows} order lines ({malformed} with malformed dates) to {}",
        output_path.display()
    );
    Ok(())
}
