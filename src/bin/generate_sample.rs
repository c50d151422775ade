use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

const RIDES: usize = 2_000;
const BUILDINGS: usize = 1_200;
const STATIONS: usize = 430;

const BUILDING_CLASSES: [(&str, f64); 6] = [
    ("D4", 0.30),
    ("C6", 0.20),
    ("O4", 0.18),
    ("R4", 0.14),
    ("K1", 0.10),
    ("H3", 0.08),
];

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

    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as u32
    }

    /// Pick from `(value, weight)` pairs whose weights sum to 1.
    fn weighted<'a>(&mut self, choices: &[(&'a str, f64)]) -> &'a str {
        let mut roll = self.next_f64();
        for &(value, weight) in choices {
            if roll < weight {
                return value;
            }
            roll -= weight;
        }
        choices[choices.len() - 1].0
    }
}

#[derive(Serialize)]
struct Ride {
    ride_id: String,
    rideable_type: &'static str,
    start_station_id: u32,
    end_station_id: u32,
    member_casual: &'static str,
}

#[derive(Serialize)]
struct Building {
    bbl: u64,
    bldgclass: String,
    yearbuilt: String,
    numfloors: String,
}

#[derive(Serialize)]
struct Station {
    station_id: u32,
    lat: f64,
    lng: f64,
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)?;

    let mut rng = SimpleRng::new(42);

    let rides: Vec<Ride> = (0..RIDES)
        .map(|i| Ride {
            ride_id: format!("{i:016X}"),
            rideable_type: if rng.next_f64() < 0.62 {
                "classic_bike"
            } else {
                "electric_bike"
            },
            start_station_id: rng.range(1, STATIONS as u32),
            end_station_id: rng.range(1, STATIONS as u32),
            member_casual: if rng.next_f64() < 0.78 {
                "member"
            } else {
                "casual"
            },
        })
        .collect();

    let buildings: Vec<Building> = (0..BUILDINGS)
        .map(|i| {
            // A few rows with unknown year or floors, as in the PLUTO extract.
            let yearbuilt = if rng.next_f64() < 0.03 {
                "0".to_string()
            } else {
                rng.range(1850, 2023).to_string()
            };
            let numfloors = if rng.next_f64() < 0.02 {
                String::new()
            } else {
                let tall = rng.next_f64() < 0.1;
                let floors = if tall { rng.range(21, 90) } else { rng.range(1, 20) };
                floors.to_string()
            };
            Building {
                bbl: 1_000_000_000 + i as u64,
                bldgclass: rng.weighted(&BUILDING_CLASSES).to_string(),
                yearbuilt,
                numfloors,
            }
        })
        .collect();

    let stations: Vec<Station> = (1..=STATIONS as u32)
        .map(|station_id| Station {
            station_id,
            lat: 40.70 + rng.next_f64() * 0.18,
            lng: -74.02 + rng.next_f64() * 0.09,
        })
        .collect();

    write_csv(&out_dir.join("citibikerides.csv"), &rides)?;
    write_csv(&out_dir.join("MNBuilidng.csv"), &buildings)?;
    write_csv(&out_dir.join("MNstation.csv"), &stations)?;
    Ok(())
}
