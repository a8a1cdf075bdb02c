use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::Trim;
use thiserror::Error;

use crate::domain::ingredient::NewIngredient;

#[derive(MultipartForm)]
/// Multipart form for uploading a CSV file with reference ingredients.
pub struct UploadIngredientsForm {
    #[multipart(limit = "10MB")]
    /// Uploaded CSV file with headerless `name,measurement_unit` rows.
    pub csv: TempFile,
}

#[derive(Debug, Error)]
/// Errors that can occur while parsing an uploaded ingredients CSV file.
pub enum UploadIngredientsFormError {
    #[error("Error reading csv file")]
    FileReadError,
    #[error("Error parsing csv file")]
    CsvParseError,
}

impl From<std::io::Error> for UploadIngredientsFormError {
    fn from(_: std::io::Error) -> Self {
        UploadIngredientsFormError::FileReadError
    }
}

impl From<csv::Error> for UploadIngredientsFormError {
    fn from(_: csv::Error) -> Self {
        UploadIngredientsFormError::CsvParseError
    }
}

impl UploadIngredientsForm {
    /// Parse the uploaded CSV file into a list of [`NewIngredient`] records.
    pub fn into_new_ingredients(
        &mut self,
    ) -> Result<Vec<NewIngredient>, UploadIngredientsFormError> {
        self.csv.file.rewind()?;
        parse_ingredients(self.csv.file.by_ref())
    }
}

fn parse_ingredients<R: Read>(
    reader: R,
) -> Result<Vec<NewIngredient>, UploadIngredientsFormError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut ingredients = Vec::new();

    for row in csv_reader.records() {
        let record = row?;

        let name = record.get(0).unwrap_or("").trim();
        let measurement_unit = record.get(1).unwrap_or("").trim();

        if name.is_empty() || measurement_unit.is_empty() {
            continue;
        }

        ingredients.push(NewIngredient::new(name, measurement_unit));
    }

    Ok(ingredients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, SeekFrom, Write};

    use actix_multipart::form::tempfile::TempFile;
    use tempfile::NamedTempFile;

    #[test]
    fn upload_form_converts_rows() {
        let mut form = build_upload_form("Сахар,г\nМолоко,мл\n");

        let ingredients = form
            .into_new_ingredients()
            .expect("expected upload to succeed");

        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients[0].name, "Сахар");
        assert_eq!(ingredients[0].measurement_unit, "г");
        assert_eq!(ingredients[1].name, "Молоко");
    }

    #[test]
    fn upload_form_skips_incomplete_rows() {
        let mut form = build_upload_form("Сахар,г\nбез единицы\n,мл\n");

        let ingredients = form
            .into_new_ingredients()
            .expect("expected upload to succeed");

        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "Сахар");
    }

    #[test]
    fn upload_form_allows_empty_body() {
        let mut form = build_upload_form("");

        let ingredients = form
            .into_new_ingredients()
            .expect("expected empty but valid upload");

        assert!(ingredients.is_empty());
    }

    fn build_upload_form(csv: &str) -> UploadIngredientsForm {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(csv.as_bytes()).expect("write csv file");
        file.as_file_mut()
            .seek(SeekFrom::Start(0))
            .expect("seek to start");

        UploadIngredientsForm {
            csv: TempFile {
                file,
                content_type: None,
                file_name: Some("ingredients.csv".to_string()),
                size: csv.len(),
            },
        }
    }
}
