use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const PASSENGERS: usize = 891;

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Small count skewed towards zero.
    fn family(&mut self, p_more: f64, max: i64) -> i64 {
        let mut n = 0;
        while n < max && self.chance(p_more) {
            n += 1;
        }
        n
    }
}

/// Column-wise passenger data.
#[derive(Default)]
struct Passengers {
    id: Vec<i64>,
    survived: Vec<i64>,
    pclass: Vec<i64>,
    name: Vec<String>,
    sex: Vec<String>,
    age: Vec<Option<f64>>,
    sibsp: Vec<i64>,
    parch: Vec<i64>,
    fare: Vec<f64>,
}

fn generate(rng: &mut SimpleRng) -> Passengers {
    let surnames = ["Allen", "Braund", "Cumings", "Dooley", "Heikkinen", "Moran", "Nasser", "Palsson"];
    let mut p = Passengers::default();

    for i in 0..PASSENGERS {
        let pclass = match rng.next_f64() {
            x if x < 0.24 => 1,
            x if x < 0.45 => 2,
            _ => 3,
        };
        let female = rng.chance(0.35);
        let age = (!rng.chance(0.2)).then(|| {
            let mean = match pclass {
                1 => 38.0,
                2 => 30.0,
                _ => 25.0,
            };
            (rng.gauss(mean, 13.0).clamp(0.42, 80.0) * 2.0).round() / 2.0
        });
        let sibsp = rng.family(0.32, 8);
        let parch = rng.family(0.24, 6);
        let base_fare = match pclass {
            1 => 84.0,
            2 => 21.0,
            _ => 13.0,
        };
        let fare = (base_fare * (1.0 + 0.15 * (sibsp + parch) as f64) * rng.gauss(1.0, 0.35).max(0.2)
            * 10_000.0)
            .round()
            / 10_000.0;

        let mut p_survive: f64 = if female { 0.74 } else { 0.19 };
        p_survive += match pclass {
            1 => 0.15,
            2 => 0.02,
            _ => -0.1,
        };
        if age.is_some_and(|a| a < 12.0) {
            p_survive += 0.15;
        }
        if sibsp + parch > 3 {
            p_survive -= 0.15;
        }

        let surname = surnames[i % surnames.len()];
        let title = if female { "Mrs." } else { "Mr." };

        p.id.push(i as i64 + 1);
        p.survived.push(i64::from(rng.chance(p_survive.clamp(0.02, 0.98))));
        p.pclass.push(pclass);
        p.name.push(format!("{surname}, {title} Passenger {}", i + 1));
        p.sex.push(if female { "female" } else { "male" }.to_string());
        p.age.push(age);
        p.sibsp.push(sibsp);
        p.parch.push(parch);
        p.fare.push(fare);
    }
    p
}

fn write_csv(path: &Path, p: &Passengers) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "PassengerId", "Survived", "Pclass", "Name", "Sex", "Age", "SibSp", "Parch", "Fare",
    ])?;
    for i in 0..p.id.len() {
        writer.write_record([
            p.id[i].to_string(),
            p.survived[i].to_string(),
            p.pclass[i].to_string(),
            p.name[i].clone(),
            p.sex[i].clone(),
            p.age[i].map(|a| a.to_string()).unwrap_or_default(),
            p.sibsp[i].to_string(),
            p.parch[i].to_string(),
            p.fare[i].to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")
}

fn write_parquet(path: &Path, p: &Passengers) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("PassengerId", DataType::Int64, false),
        Field::new("Survived", DataType::Int64, false),
        Field::new("Pclass", DataType::Int64, false),
        Field::new("Name", DataType::Utf8, false),
        Field::new("Sex", DataType::Utf8, false),
        Field::new("Age", DataType::Float64, true),
        Field::new("SibSp", DataType::Int64, false),
        Field::new("Parch", DataType::Int64, false),
        Field::new("Fare", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(p.id.clone())),
            Arc::new(Int64Array::from(p.survived.clone())),
            Arc::new(Int64Array::from(p.pclass.clone())),
            Arc::new(StringArray::from(p.name.iter().map(|s| s.as_str()).collect::<Vec<_>>())),
            Arc::new(StringArray::from(p.sex.iter().map(|s| s.as_str()).collect::<Vec<_>>())),
            Arc::new(Float64Array::from(p.age.clone())),
            Arc::new(Int64Array::from(p.sibsp.clone())),
            Arc::new(Int64Array::from(p.parch.clone())),
            Arc::new(Float64Array::from(p.fare.clone())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new("data").join("train.csv"));
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rng = SimpleRng::new(42);
    let passengers = generate(&mut rng);

    let is_parquet = output_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&output_path, &passengers)?;
    } else {
        write_csv(&output_path, &passengers)?;
    }

    println!(
        "Wrote {} passengers to {}",
        passengers.id.len(),
        output_path.display()
    );
    Ok(())
}
