use crate::config::{Format, Series};
use crate::stats;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Aggregates of a single series.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub len: usize,
    #[serde(with = "float")]
    pub sum: f64,
    #[serde(with = "float")]
    pub average: f64,
    #[serde(with = "float")]
    pub max: f64,
}

impl Report {
    /// Compute the aggregates of a series.
    ///
    /// # Errors
    /// Returns an error if the series holds no numbers.
    pub fn new(series: &Series) -> Result<Self> {
        let numbers = &series.numbers;
        Ok(Self {
            name: series.name().to_owned(),
            len: numbers.len(),
            sum: stats::sum(numbers),
            average: stats::average(numbers).context("failed to compute average")?,
            max: stats::max(numbers).context("failed to compute max")?,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, file: P, format: Format) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = BufWriter::new(file);

        match format {
            Format::Json => serde_json::to_writer_pretty(&mut writer, self)
                .context("failed to serialize report")?,
            Format::Msgpack => rmp_serde::encode::write_named(&mut writer, self)
                .context("failed to serialize report")?,
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(file: P, format: Format) -> Result<Self> {
        let file = file.as_ref();
        let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        let reader = BufReader::new(file);

        let report = match format {
            Format::Json => serde_json::from_reader(reader).context("failed to deserialize report")?,
            Format::Msgpack => {
                rmp_serde::decode::from_read(reader).context("failed to deserialize report")?
            }
        };
        Ok(report)
    }
}

/// Floats that keep NaN and infinities, which JSON has no numbers for.
///
/// Non-finite values are written as the strings `"NaN"`, `"inf"` and `"-inf"`.
mod float {
    use serde::{Deserializer, Serializer, de};
    use std::fmt;

    pub fn serialize<S: Serializer>(val: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if val.is_nan() {
            serializer.serialize_str("NaN")
        } else if val.is_infinite() {
            serializer.serialize_str(if *val > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*val)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    struct FloatVisitor;

    impl de::Visitor<'_> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or one of \"NaN\", \"inf\", \"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, val: f64) -> Result<f64, E> {
            Ok(val)
        }

        fn visit_f32<E: de::Error>(self, val: f32) -> Result<f64, E> {
            Ok(val.into())
        }

        fn visit_i64<E: de::Error>(self, val: i64) -> Result<f64, E> {
            Ok(val as f64)
        }

        fn visit_u64<E: de::Error>(self, val: u64) -> Result<f64, E> {
            Ok(val as f64)
        }

        fn visit_str<E: de::Error>(self, val: &str) -> Result<f64, E> {
            match val {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                _ => Err(E::invalid_value(de::Unexpected::Str(val), &self)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    fn series(numbers: Vec<f64>) -> Series {
        Series {
            name: Some("test".to_owned()),
            numbers,
        }
    }

    #[test]
    fn report_of_series() {
        let report = Report::new(&series(vec![2.0, 6.0, 4.0])).unwrap();
        assert_eq!(
            report,
            Report {
                name: "test".to_owned(),
                len: 3,
                sum: 12.0,
                average: 4.0,
                max: 6.0,
            }
        );
    }

    #[test]
    fn report_of_empty_series_fails() {
        let err = Report::new(&series(Vec::new())).unwrap_err();
        assert_eq!(err.to_string(), "failed to compute average");
        assert_eq!(
            err.root_cause().to_string(),
            "cannot compute average of an empty sequence"
        );
    }

    #[test]
    fn saved_report_can_be_loaded() {
        let dir = env::temp_dir().join(format!("numagg-analysis-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let report = Report::new(&series(vec![-5.0, -1.0, -10.0])).unwrap();
        for format in [Format::Json, Format::Msgpack] {
            let file = dir.join(format!("test.results.{}", format.extension()));
            report.save(&file, format).unwrap();
            assert_eq!(Report::load(&file, format).unwrap(), report);
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn non_finite_values_survive_saving() {
        let dir = env::temp_dir().join(format!("numagg-non-finite-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let report = Report::new(&series(vec![1.0, f64::INFINITY])).unwrap();
        let file = dir.join("inf.results.json");
        report.save(&file, Format::Json).unwrap();
        let contents = fs::read_to_string(&file).unwrap();
        assert!(contents.contains("\"sum\": \"inf\""), "{contents}");
        assert_eq!(Report::load(&file, Format::Json).unwrap(), report);

        let report = Report::new(&series(vec![f64::NAN, 2.0, f64::NEG_INFINITY])).unwrap();
        for format in [Format::Json, Format::Msgpack] {
            let file = dir.join(format!("nan.results.{}", format.extension()));
            report.save(&file, format).unwrap();
            let loaded = Report::load(&file, format).unwrap();
            assert_eq!(loaded.len, 3);
            assert!(loaded.sum.is_nan());
            assert!(loaded.average.is_nan());
            assert!(loaded.max.is_nan());
        }

        let report = Report::new(&series(vec![-1.0, f64::NEG_INFINITY])).unwrap();
        let file = dir.join("neg.results.json");
        report.save(&file, Format::Json).unwrap();
        let loaded = Report::load(&file, Format::Json).unwrap();
        assert_eq!(loaded.sum, f64::NEG_INFINITY);
        assert_eq!(loaded.max, -1.0);

        fs::remove_dir_all(&dir).ok();
    }
}
