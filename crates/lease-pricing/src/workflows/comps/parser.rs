use csv::StringRecord;
use std::collections::BTreeMap;
use std::io::Read;

use super::CompImportError;
use crate::workflows::pricing::MarketComp;

const PROPERTY_HEADER: &str = "property";
const WEIGHT_HEADER: &str = "weight";
const QUALITY_HEADER: &str = "quality score";

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnLayout {
    property: usize,
    weight: usize,
    quality: Option<usize>,
    unit_types: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, CompImportError> {
        let mut property = None;
        let mut weight = None;
        let mut quality = None;
        let mut unit_types = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            match header.trim().to_ascii_lowercase().as_str() {
                PROPERTY_HEADER => property = Some(index),
                WEIGHT_HEADER => weight = Some(index),
                QUALITY_HEADER => quality = Some(index),
                "" => {}
                _ => unit_types.push((index, header.trim().to_string())),
            }
        }

        Ok(Self {
            property: property.ok_or(CompImportError::MissingColumn("Property"))?,
            weight: weight.ok_or(CompImportError::MissingColumn("Weight"))?,
            quality,
            unit_types,
        })
    }
}

pub(crate) fn parse_comps<R: Read>(reader: R) -> Result<Vec<MarketComp>, CompImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers)?;
    let mut comps = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header occupies line 1.
        let row = index + 2;

        let property_name = record.get(layout.property).unwrap_or_default().trim();
        if property_name.is_empty() {
            continue;
        }

        let weight_cell = record.get(layout.weight).unwrap_or_default();
        let weight = parse_amount(weight_cell).ok_or_else(|| CompImportError::InvalidNumber {
            row,
            column: "Weight".to_string(),
            value: weight_cell.to_string(),
        })?;

        let quality_score = match layout.quality.and_then(|column| record.get(column)) {
            Some(cell) if !cell.trim().is_empty() => {
                parse_amount(cell).ok_or_else(|| CompImportError::InvalidNumber {
                    row,
                    column: "Quality Score".to_string(),
                    value: cell.to_string(),
                })?
            }
            _ => 0.0,
        };

        let rent_by_unit_type: BTreeMap<String, f64> = layout
            .unit_types
            .iter()
            .filter_map(|(column, unit_type)| {
                record
                    .get(*column)
                    .and_then(parse_amount)
                    .map(|price| (unit_type.clone(), price))
            })
            .collect();

        comps.push(MarketComp {
            property_name: property_name.to_string(),
            rent_by_unit_type,
            weight,
            quality_score,
        });
    }

    Ok(comps)
}

/// Parses survey amounts such as `1,250`, `$1895.00` or `35%`.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
pub(crate) fn parse_amount_for_tests(raw: &str) -> Option<f64> {
    parse_amount(raw)
}
