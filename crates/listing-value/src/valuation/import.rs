use std::io::Read;
use std::path::Path;

use super::domain::ListingRow;

#[derive(Debug)]
pub enum ListingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ListingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingImportError::Io(err) => write!(f, "failed to read listing export: {}", err),
            ListingImportError::Csv(err) => write!(f, "invalid listing CSV data: {}", err),
        }
    }
}

impl std::error::Error for ListingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListingImportError::Io(err) => Some(err),
            ListingImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ListingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ListingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads ranked listing exports. Rows are kept raw; validation happens per evaluation.
pub struct ListingCsvImporter;

impl ListingCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ListingRow>, ListingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ListingRow>, ListingImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.deserialize::<ListingRow>() {
            rows.push(record?);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
listing_id,full_key,year,url,price_saving,actual_price,mileage_saving,y_pred,next_bin_avg_price,mileage,mileage_y_pred,price_per_km,heat_rank,mileage_bin,certified,accident_free,carfax,as_is,options,safety_features
1001,Honda Civic EX,2020,https://example.test/#listing=1001,1250.5,21000,300,22250,21500,48000,22000,0.08,14,40000-50000,True,0,,False,\"[\"\"Heated Seats\"\", \"\"Remote Start\"\"]\",\"[\"\"Backup Camera\"\"]\"
1002,Honda Civic EX,2020,https://example.test/#listing=1002,-400,23000,,22600,21900,61000,,0.07,220,60000-70000,,,,,,
";

    #[test]
    fn reads_rows_with_mixed_field_shapes() {
        let rows = ListingCsvImporter::from_reader(Cursor::new(SAMPLE)).expect("import succeeds");
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.listing_id.as_deref(), Some("1001"));
        assert_eq!(first.year, Some(2020));
        assert_eq!(first.price_saving, Some(1250.5));
        assert_eq!(first.mileage_bin.as_deref(), Some("40000-50000"));
        assert_eq!(first.certified, Some(true));
        assert_eq!(first.accident_free, Some(false));
        assert_eq!(first.carfax, None);
        assert_eq!(first.as_is, Some(false));
        assert_eq!(first.options, vec!["Heated Seats", "Remote Start"]);
        assert_eq!(first.safety_features, vec!["Backup Camera"]);

        let second = &rows[1];
        assert_eq!(second.mileage_saving, None);
        assert_eq!(second.mileage_y_pred, None);
        assert!(second.options.is_empty());
    }

    #[test]
    fn malformed_numbers_surface_as_csv_errors() {
        let data = "listing_id,year\n1001,twenty\n";
        let error = ListingCsvImporter::from_reader(Cursor::new(data)).expect_err("bad year");
        assert!(matches!(error, ListingImportError::Csv(_)));
        assert!(error.to_string().starts_with("invalid listing CSV data"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = ListingCsvImporter::from_path("/nonexistent/listings.csv")
            .expect_err("no such file");
        assert!(matches!(error, ListingImportError::Io(_)));
    }
}
