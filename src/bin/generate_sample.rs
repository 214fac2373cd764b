use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

#[path = "../data/codes.rs"]
#[allow(dead_code)]
mod codes;

use codes::{
    AGE_COLUMN, CAREER_GOAL_COLUMN, EDUCATION_CODES, EDU_LEVEL_COLUMN, HOST_SITE_CODES,
    HOST_SITE_COLUMN, INDUSTRY_COLUMN, MILESTONE_COLUMN, MILESTONE_ORDER, SALARY_COLUMN,
    SALARY_ORDER,
};

const RESPONDENTS: usize = 240;

const INDUSTRIES: [&str; 7] = [
    "Arts & Media",
    "Business & Finance",
    "Education",
    "Environment & Natural Resources",
    "Healthcare",
    "Public Service",
    "Technology",
];

const CAREER_GOALS: [&str; 5] = [
    "Continue in national service",
    "Get a job in my field",
    "Go to college or grad school",
    "Start a business",
    "Still deciding",
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// One raw survey row, cells as exported (codes still numeric strings).
fn respondent(rng: &mut SimpleRng) -> [String; 7] {
    let host_site = if rng.chance(0.05) {
        "99.0".to_string() // unmapped site, dropped on load
    } else {
        HOST_SITE_CODES[rng.below(HOST_SITE_CODES.len())].0.to_string()
    };
    let age = format!("{:.1}", 18.0 + (rng.next_f64() * 12.0).floor());
    let edu = if rng.chance(0.05) {
        "0.0".to_string() // unmapped level, kept as missing
    } else {
        EDUCATION_CODES[rng.below(EDUCATION_CODES.len())].0.to_string()
    };
    let mut optional = |items: &[&str]| {
        if rng.chance(0.1) {
            String::new()
        } else {
            rng.pick(items).to_string()
        }
    };

    [
        host_site,
        age,
        edu,
        optional(&MILESTONE_ORDER[..]),
        optional(&INDUSTRIES[..]),
        optional(&SALARY_ORDER[..]),
        optional(&CAREER_GOALS[..]),
    ]
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<[String; 7]> = (0..RESPONDENTS).map(|_| respondent(&mut rng)).collect();
    let headers = [
        HOST_SITE_COLUMN,
        AGE_COLUMN,
        EDU_LEVEL_COLUMN,
        MILESTONE_COLUMN,
        INDUSTRY_COLUMN,
        SALARY_COLUMN,
        CAREER_GOAL_COLUMN,
    ];

    // CSV, with the leading unnamed index column a dataframe export writes
    let csv_path = "joinedservewafordash.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    writer.write_record(std::iter::once("").chain(headers))?;
    for (i, row) in rows.iter().enumerate() {
        let index = i.to_string();
        writer.write_record(std::iter::once(index.as_str()).chain(row.iter().map(String::as_str)))?;
    }
    writer.flush()?;

    // Parquet copy, every column as nullable text
    let schema = Arc::new(Schema::new(
        headers
            .iter()
            .map(|h| Field::new(*h, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = (0..headers.len())
        .map(|col| {
            let values: StringArray = rows
                .iter()
                .map(|row| Some(row[col].as_str()).filter(|s| !s.is_empty()))
                .collect();
            Arc::new(values) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let parquet_path = "joinedservewafordash.parquet";
    let file = File::create(parquet_path).context("creating Parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {RESPONDENTS} respondents to {csv_path} and {parquet_path}");
    Ok(())
}
