//! Write a deterministic synthetic `titanic.csv` so the dashboard can run
//! without the Kaggle download. Survival odds depend on sex, class, and age,
//! so the charts come out looking like the real data. Extra columns (Name,
//! Fare, ...) are included on purpose: the loader must ignore them.

use anyhow::{Context, Result};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick an index by cumulative weight.
    fn pick(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut roll = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if roll < *w {
                return i;
            }
            roll -= w;
        }
        weights.len() - 1
    }
}

const N_PASSENGERS: usize = 891;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "titanic.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "PassengerId",
        "Survived",
        "Pclass",
        "Name",
        "Sex",
        "Age",
        "SibSp",
        "Parch",
        "Ticket",
        "Fare",
        "Cabin",
        "Embarked",
    ])?;

    for id in 1..=N_PASSENGERS {
        // Roughly the real class and sex mix.
        let pclass = [1u8, 2, 3][rng.pick(&[0.24, 0.21, 0.55])];
        let sex = if rng.next_f64() < 0.35 { "female" } else { "male" };

        // ~20% of ages are missing in the real data.
        let age = if rng.next_f64() < 0.80 {
            Some((rng.gauss(29.0, 14.0).clamp(0.5, 80.0) * 2.0).round() / 2.0)
        } else {
            None
        };

        // Two passengers famously boarded with no recorded port.
        let embarked = if rng.next_f64() < 0.003 {
            ""
        } else {
            ["S", "C", "Q"][rng.pick(&[0.72, 0.19, 0.09])]
        };

        let mut p_survive: f64 = if sex == "female" { 0.74 } else { 0.19 };
        p_survive += match pclass {
            1 => 0.12,
            2 => 0.02,
            _ => -0.06,
        };
        if age.is_some_and(|a| a <= 12.0) {
            p_survive += 0.20;
        }
        let survived = rng.next_f64() < p_survive.clamp(0.02, 0.98);

        let fare = match pclass {
            1 => rng.gauss(84.0, 60.0),
            2 => rng.gauss(21.0, 12.0),
            _ => rng.gauss(14.0, 10.0),
        }
        .max(4.0);

        let cabin = if pclass == 1 && rng.next_f64() < 0.3 {
            format!("C{}", 1 + rng.next_u64() % 120)
        } else {
            String::new()
        };

        writer.write_record([
            id.to_string(),
            (survived as u8).to_string(),
            pclass.to_string(),
            format!("Passenger, No. {id}"),
            sex.to_string(),
            age.map(|a| a.to_string()).unwrap_or_default(),
            (rng.next_u64() % 3).to_string(),
            (rng.next_u64() % 2).to_string(),
            format!("T{:06}", id * 7 + 13),
            format!("{fare:.2}"),
            cabin,
            embarked.to_string(),
        ])?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {N_PASSENGERS} passengers to {output_path}");
    Ok(())
}
