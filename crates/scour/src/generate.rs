//! Synthetic messy-order generator.
//!
//! Produces adversarial input for the cleaning pipeline: every field comes
//! out either in its clean canonical form or in one of the messy variants the
//! normalizers are expected to repair (or flag). Generation is fully
//! deterministic for a given seed.

use chrono::{Duration, NaiveDate};
use fastrand::Rng;

use crate::error::{Result, ScourError};
use crate::record::RawRecord;

const FIRST_NAMES: &[&str] = &[
    "james", "mary", "robert", "patricia", "john", "jennifer", "michael", "linda", "david",
    "elizabeth", "william", "barbara", "richard", "susan", "joseph", "jessica", "thomas",
    "sarah", "charles", "karen",
];

const LAST_NAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "rodriguez",
    "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson", "thomas", "taylor",
    "moore", "jackson", "martin",
];

const DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com", "aol.com"];

const PRODUCTS: &[&str] = &[
    "Smartphone", "Laptop", "Headphones", "Smart Watch", "Tablet", "Camera", "Printer",
    "Monitor", "Keyboard", "Mouse", "USB Cable", "Charger", "Power Bank", "Bluetooth Speaker",
    "Earbuds",
];

const BRANDS: &[&str] = &[
    "Apple", "Samsung", "Sony", "LG", "Bose", "Dell", "HP", "Lenovo", "Asus", "Acer",
];

/// Configuration for dataset generation. Read once; immutable for the run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Base rows to generate (duplicates are appended on top).
    pub rows: usize,
    /// RNG seed; the same seed always yields the same dataset.
    pub seed: u64,
    /// Probability (0.0..=1.0) that a field takes a messy variant instead of
    /// its clean form. Also scales the blank-field rate.
    pub messiness: f64,
    /// Earliest order date.
    pub start_date: NaiveDate,
    /// Latest order date.
    pub end_date: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 1000,
            seed: 42,
            messiness: 0.6,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or_default(),
        }
    }
}

impl GeneratorConfig {
    /// Reject out-of-range parameters before generating anything.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(ScourError::Config("rows must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.messiness) {
            return Err(ScourError::Config(format!(
                "messiness must be in 0.0..=1.0, got {}",
                self.messiness
            )));
        }
        if self.start_date > self.end_date {
            return Err(ScourError::Config(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}

/// Fraction of rows duplicated and appended to the dataset.
const DUPLICATE_FRACTION: f64 = 0.02;

/// Per-field blank probability at full messiness.
const BLANK_FRACTION: f64 = 0.05;

/// Seeded generator for messy order datasets.
pub struct Generator {
    config: GeneratorConfig,
    rng: Rng,
}

impl Generator {
    /// Create a generator with a validated configuration.
    pub fn with_config(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let rng = Rng::with_seed(config.seed);
        Ok(Self { config, rng })
    }

    /// Generate the dataset: `rows` base records plus ~2% appended
    /// duplicates, so the duplicate identifier always has work to do.
    pub fn generate(&mut self) -> Vec<RawRecord> {
        let mut records: Vec<RawRecord> = (0..self.config.rows).map(|_| self.record()).collect();

        let dup_count = ((self.config.rows as f64) * DUPLICATE_FRACTION).ceil() as usize;
        for _ in 0..dup_count {
            let idx = self.rng.usize(0..records.len());
            records.push(records[idx].clone());
        }

        records
    }

    fn record(&mut self) -> RawRecord {
        let first = self.pick(FIRST_NAMES);
        let last = self.pick(LAST_NAMES);
        let date = self.random_date();

        RawRecord {
            customer_name: self.field(|_| format!("{first} {last}"), |g| g.messy_name(first, last)),
            customer_email: self.field(
                |g| format!("{first}.{last}@{}", g.pick(DOMAINS)),
                |g| g.messy_email(first, last),
            ),
            customer_phone: self.field(|g| g.clean_phone(), |g| g.messy_phone()),
            order_date: self.field(
                |_| date.format("%Y-%m-%d").to_string(),
                |g| g.messy_date(date),
            ),
            product_id: self.field(|g| g.clean_product(), |g| g.messy_product()),
            price: self.field(|g| format!("{:.2}", g.base_price()), |g| g.messy_price()),
            quantity: self.field(|g| g.rng.i64(1..=10).to_string(), |g| g.messy_quantity()),
            carried_issues: Vec::new(),
        }
    }

    /// Choose blank, messy, or clean for one field.
    fn field(
        &mut self,
        clean: impl Fn(&mut Self) -> String,
        messy: impl Fn(&mut Self) -> String,
    ) -> String {
        if self.rng.f64() < BLANK_FRACTION * self.config.messiness {
            return String::new();
        }
        if self.rng.f64() < self.config.messiness {
            messy(self)
        } else {
            clean(self)
        }
    }

    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool[self.rng.usize(0..pool.len())]
    }

    fn random_date(&mut self) -> NaiveDate {
        let span = (self.config.end_date - self.config.start_date).num_days();
        self.config.start_date + Duration::days(self.rng.i64(0..=span))
    }

    fn messy_name(&mut self, first: &str, last: &str) -> String {
        let name = format!("{first} {last}");
        match self.rng.usize(0..7) {
            0 => name.to_lowercase(),
            1 => name.to_uppercase(),
            2 => name
                .chars()
                .map(|c| {
                    if self.rng.bool() {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect(),
            3 => name.replace(' ', ""),
            4 => name.replace(' ', "_"),
            5 => name.replace(' ', "-"),
            _ => format!("{name} {}", self.junk_letters(1, 3)),
        }
    }

    fn messy_email(&mut self, first: &str, last: &str) -> String {
        let domain = self.pick(DOMAINS);
        let first_initial = &first[..1];
        let base = match self.rng.usize(0..7) {
            0 => format!("{first_initial}{last}@{domain}"),
            1 => format!("{first}.{last}@{domain}"),
            2 => format!("{first}_{last}@{domain}"),
            3 => format!("{first}{}@{domain}", self.rng.u32(1..100)),
            4 => format!("{first}{last}@{domain}"),
            5 => format!("{first}@{domain}"),
            _ => format!("{first} .{last}@{domain}"),
        };
        // Sometimes break the @ so the syntax rule rejects it.
        match self.rng.usize(0..6) {
            0 => base.replace('@', "#"),
            1 => base.replace('@', "@@"),
            2 => base.replace('@', ""),
            _ => base,
        }
    }

    fn clean_phone(&mut self) -> String {
        // Area codes don't start with 0 or 1.
        let mut digits = self.rng.u32(2..=9).to_string();
        for _ in 0..9 {
            digits.push_str(&self.rng.u32(0..=9).to_string());
        }
        digits
    }

    fn messy_phone(&mut self) -> String {
        let d = self.clean_phone();
        match self.rng.usize(0..12) {
            0 => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]),
            1 => format!("{}-{}-{}", &d[..3], &d[3..6], &d[6..]),
            2 => format!("{}.{}.{}", &d[..3], &d[3..6], &d[6..]),
            3 => format!("+1 {}-{}-{}", &d[..3], &d[3..6], &d[6..]),
            4 => format!("{} {} {}", &d[..3], &d[3..6], &d[6..]),
            5 => format!("1-{}-{}-{}", &d[..3], &d[3..6], &d[6..]),
            6 => format!("{}/{}/{}", &d[..3], &d[3..6], &d[6..]),
            7 => format!("{}-{}", &d[..5], &d[5..]),
            8 => d,
            9 => format!("{}-{}", self.rng.u32(100..1000), self.rng.u32(1000..10000)),
            10 => "000-000-0000".to_string(),
            _ => "N/A".to_string(),
        }
    }

    fn messy_date(&mut self, date: NaiveDate) -> String {
        match self.rng.usize(0..12) {
            0 => date.format("%Y-%m-%d").to_string(),
            1 => date.format("%m/%d/%Y").to_string(),
            2 => date.format("%d-%m-%Y").to_string(),
            3 => date.format("%b %d, %Y").to_string(),
            4 => date.format("%B %d, %Y").to_string(),
            5 => date.format("%m/%d/%y").to_string(),
            6 => date.format("%Y%m%d").to_string(),
            7 => date.format("%Y").to_string(),
            8 => date.format("%m-%Y").to_string(),
            9 => "31/02/2022".to_string(),
            10 => "pending".to_string(),
            _ => format!(
                "{}/{}/{}",
                self.rng.u32(1..=12),
                self.rng.u32(13..=31),
                self.rng.u32(2020..=2023)
            ),
        }
    }

    fn clean_product(&mut self) -> String {
        format!("{} {}", self.pick(BRANDS), self.pick(PRODUCTS))
    }

    fn messy_product(&mut self) -> String {
        match self.rng.usize(0..6) {
            0 => self.clean_product(),
            1 => self.pick(PRODUCTS).to_string(),
            2 => self.pick(PRODUCTS).to_lowercase(),
            3 => self.pick(PRODUCTS).to_uppercase(),
            4 => format!("{} - {}", self.pick(PRODUCTS), self.pick(BRANDS)),
            _ => format!("{} v{}", self.pick(PRODUCTS), self.rng.u32(1..=5)),
        }
    }

    fn base_price(&mut self) -> f64 {
        let cents = self.rng.u32(1000..200000);
        cents as f64 / 100.0
    }

    fn messy_price(&mut self) -> String {
        let p = self.base_price();
        match self.rng.usize(0..9) {
            0 => format!("${p:.2}"),
            1 => format!("${p:.0}"),
            2 => format!("{p:.2} USD"),
            3 => format!("USD {p:.2}"),
            4 => format!("{}", p as i64),
            5 => format!("approx ${p:.0}"),
            6 => format!("${:.0} cents", p * 100.0),
            7 => "N/A".to_string(),
            _ => format!("{p:.2}"),
        }
    }

    fn messy_quantity(&mut self) -> String {
        match self.rng.usize(0..7) {
            0 => self.rng.i64(1..=10).to_string(),
            1 => format!("{}.0", self.rng.i64(1..=10)),
            2 => format!("{}.00", self.rng.i64(1..=10)),
            3 => ["one", "two", "three", "four", "five"][self.rng.usize(0..5)].to_string(),
            4 => "0".to_string(),
            5 => "N/A".to_string(),
            _ => self.rng.i64(1..=10).to_string(),
        }
    }

    fn junk_letters(&mut self, min: usize, max: usize) -> String {
        let len = self.rng.usize(min..=max);
        (0..len).map(|_| self.rng.alphabetic()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: usize, seed: u64, messiness: f64) -> GeneratorConfig {
        GeneratorConfig {
            rows,
            seed,
            messiness,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let a = Generator::with_config(config(50, 7, 0.8)).unwrap().generate();
        let b = Generator::with_config(config(50, 7, 0.8)).unwrap().generate();
        assert_eq!(a, b);

        let c = Generator::with_config(config(50, 8, 0.8)).unwrap().generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_duplicates_appended() {
        let records = Generator::with_config(config(100, 1, 0.5)).unwrap().generate();
        assert_eq!(records.len(), 102);

        // The appended rows are exact copies of earlier rows.
        let tail = &records[100..];
        for dup in tail {
            assert!(records[..100].contains(dup));
        }
    }

    #[test]
    fn test_zero_messiness_is_clean() {
        use crate::normalize::Field;

        let records = Generator::with_config(config(30, 3, 0.0)).unwrap().generate();
        for rec in &records {
            for field in Field::ALL {
                let raw = match field {
                    Field::Name => &rec.customer_name,
                    Field::Email => &rec.customer_email,
                    Field::Phone => &rec.customer_phone,
                    Field::OrderDate => &rec.order_date,
                    Field::ProductId => &rec.product_id,
                    Field::Price => &rec.price,
                    Field::Quantity => &rec.quantity,
                };
                let out = field.normalize(raw);
                assert!(out.issue.is_none(), "{:?} flagged clean value {raw:?}", field);
                assert!(out.value.is_some(), "{:?} nulled clean value {raw:?}", field);
            }
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(Generator::with_config(config(0, 1, 0.5)).is_err());
        assert!(Generator::with_config(config(10, 1, 1.5)).is_err());

        let mut bad_dates = config(10, 1, 0.5);
        bad_dates.start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        bad_dates.end_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(Generator::with_config(bad_dates).is_err());
    }

    #[test]
    fn test_dates_within_range() {
        let cfg = config(100, 11, 0.0);
        let (start, end) = (cfg.start_date, cfg.end_date);
        let records = Generator::with_config(cfg).unwrap().generate();

        for rec in records {
            let date = NaiveDate::parse_from_str(&rec.order_date, "%Y-%m-%d").unwrap();
            assert!(date >= start && date <= end);
        }
    }
}
