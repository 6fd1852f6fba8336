//! Spreadsheet report generation
//!
//! The aggregate is written to a single-worksheet xlsx file with columns
//! [Name, Price, URL], a header row, and a currency number format on every
//! price data cell.

use crate::harvest::Item;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

/// Number format applied to price data cells (symbol, thousands separator,
/// two decimals)
const PRICE_FORMAT: &str = "£#,##0.00";

/// Writes the harvested items to a spreadsheet file
///
/// One row per item in aggregate order, header row first. The price column
/// carries the currency format on data cells only. An empty aggregate
/// still produces a valid sheet with just the header.
///
/// # Arguments
///
/// * `items` - The ordered aggregate to write
/// * `path` - Destination file path
/// * `sheet_name` - Name of the single worksheet
///
/// # Returns
///
/// * `Ok(())` - Report written
/// * `Err(XlsxError)` - I/O or formatting failure; the caller decides how
///   loudly to fail
pub fn write_report(items: &[Item], path: &Path, sheet_name: &str) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    worksheet.write_string(0, 0, "Name")?;
    worksheet.write_string(0, 1, "Price")?;
    worksheet.write_string(0, 2, "URL")?;

    let currency = Format::new().set_num_format(PRICE_FORMAT);

    for (index, item) in items.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, &item.name)?;
        worksheet.write_number_with_format(row, 1, item.price, &currency)?;
        worksheet.write_string(row, 2, &item.detail_url)?;
    }

    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<Item> {
        vec![
            Item {
                name: "A Light in the Attic".to_string(),
                price: 51.77,
                detail_url: "http://books.toscrape.com/catalogue/a-light-in-the-attic_1000/index.html"
                    .to_string(),
            },
            Item {
                name: "Tipping the Velvet".to_string(),
                price: 53.74,
                detail_url: "http://books.toscrape.com/catalogue/tipping-the-velvet_999/index.html"
                    .to_string(),
            },
        ]
    }

    #[test]
    fn test_write_report_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.xlsx");

        write_report(&sample_items(), &path, "Products").unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_report_empty_aggregate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        write_report(&[], &path, "Products").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_report_to_invalid_path_errors() {
        let path = Path::new("/nonexistent-dir/items.xlsx");
        assert!(write_report(&sample_items(), path, "Products").is_err());
    }
}
