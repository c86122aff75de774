use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::warn;
use vision_foundry_core::{FoundryError, FoundryResult};

use crate::dataset::{check_index, Dataset};

/// One row of a [`CsvDataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub features: Vec<f64>,
    pub target: Option<f64>,
}

/// A numeric table read from CSV. The first row is treated as a header.
///
/// If `target_column` is given, that column is split off into
/// [`Record::target`] and the remaining columns form the features.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl CsvDataset {
    pub fn from_path<P: AsRef<Path>>(path: P, target_column: Option<usize>) -> FoundryResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, target_column)
    }

    pub fn from_reader<R: Read>(reader: R, target_column: Option<usize>) -> FoundryResult<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if let Some(t) = target_column {
            if t >= headers.len() {
                return Err(FoundryError::InvalidConfig(format!(
                    "target column {} out of range for {} columns",
                    t,
                    headers.len()
                )));
            }
        }

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(csv_error)?;
            let mut features = Vec::with_capacity(record.len());
            let mut target = None;
            for (col, field) in record.iter().enumerate() {
                let val: f64 = field.trim().parse().map_err(|_| {
                    FoundryError::Parse(format!(
                        "row {}, column {}: '{}' is not a number",
                        row + 1,
                        col,
                        field
                    ))
                })?;
                if Some(col) == target_column {
                    target = Some(val);
                } else {
                    features.push(val);
                }
            }
            records.push(Record { features, target });
        }

        if records.is_empty() {
            warn!("CSV source has a header but no data rows");
        }

        Ok(CsvDataset { headers, records })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

fn csv_error(e: csv::Error) -> FoundryError {
    if e.is_io_error() {
        FoundryError::Io(e.to_string())
    } else {
        FoundryError::Parse(e.to_string())
    }
}

impl Dataset for CsvDataset {
    type Item = Record;

    fn len(&self) -> usize {
        self.records.len()
    }

    fn get(&self, index: usize) -> FoundryResult<Record> {
        check_index(index, self.records.len())?;
        Ok(self.records[index].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const IRIS_HEAD: &str = "sepal_len,sepal_wid,label\n5.1,3.5,0\n7.0,3.2,1\n6.3,3.3,2\n";

    #[test]
    fn test_read_with_target() {
        let ds = CsvDataset::from_reader(IRIS_HEAD.as_bytes(), Some(2)).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.headers(), &["sepal_len", "sepal_wid", "label"]);

        let r = ds.get(1).unwrap();
        assert_eq!(r.features.len(), 2);
        assert_relative_eq!(r.features[0], 7.0);
        assert_relative_eq!(r.features[1], 3.2);
        assert_eq!(r.target, Some(1.0));
    }

    #[test]
    fn test_read_without_target() {
        let ds = CsvDataset::from_reader(IRIS_HEAD.as_bytes(), None).unwrap();
        let r = ds.get(2).unwrap();
        assert_eq!(r.features, vec![6.3, 3.3, 2.0]);
        assert_eq!(r.target, None);
    }

    #[test]
    fn test_out_of_range() {
        let ds = CsvDataset::from_reader(IRIS_HEAD.as_bytes(), None).unwrap();
        assert_eq!(
            ds.get(3),
            Err(FoundryError::IndexOutOfBounds { index: 3, size: 3 })
        );
    }

    #[test]
    fn test_non_numeric_field() {
        let src = "a,b\n1.0,x\n";
        let err = CsvDataset::from_reader(src.as_bytes(), None).unwrap_err();
        assert!(matches!(err, FoundryError::Parse(ref msg) if msg.contains("'x'")));
    }

    #[test]
    fn test_ragged_rows() {
        let src = "a,b\n1.0,2.0\n3.0\n";
        let err = CsvDataset::from_reader(src.as_bytes(), None).unwrap_err();
        assert!(matches!(err, FoundryError::Parse(_)));
    }

    #[test]
    fn test_bad_target_column() {
        let err = CsvDataset::from_reader(IRIS_HEAD.as_bytes(), Some(3)).unwrap_err();
        assert!(matches!(err, FoundryError::InvalidConfig(_)));
    }

    #[test]
    fn test_header_only() {
        let ds = CsvDataset::from_reader("a,b\n".as_bytes(), None).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = CsvDataset::from_path("/nonexistent/data.csv", None).unwrap_err();
        assert!(matches!(err, FoundryError::Io(_)));
    }
}
