use std::panic;

use super::errors::CoreError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Decodes every page in order. Each page is returned as its non-empty,
    /// trimmed lines; pages without text are skipped.
    pub fn extract_pages(&self, data: &[u8]) -> Result<Vec<Vec<String>>, CoreError> {
        let pages = self.extract_pdf_pages(data)?;
        Ok(pages
            .iter()
            .map(|page| page_lines(page))
            .filter(|lines| !lines.is_empty())
            .collect())
    }

    fn extract_pdf_pages(&self, data: &[u8]) -> Result<Vec<String>, CoreError> {
        // pdf-extract panics on some malformed inputs.
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(data)) {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(err)) => Err(CoreError::ExtractionFailed(format!("pdf: {err}"))),
            Err(_) => Err(CoreError::ExtractionFailed(
                "pdf: decoder aborted on malformed document".to_string(),
            )),
        }
    }
}

fn page_lines(page: &str) -> Vec<String> {
    page.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_lines_are_trimmed_and_blank_lines_dropped() {
        assert_eq!(
            page_lines("\n\n  Jane Doe \n\n Engineer\n"),
            vec!["Jane Doe".to_string(), "Engineer".to_string()]
        );
        assert!(page_lines(" \n\t\n").is_empty());
    }

    #[test]
    fn garbage_input_is_an_extraction_failure() {
        let err = PdfTextExtractor::new()
            .extract_pages(b"definitely not a pdf")
            .unwrap_err();
        assert!(matches!(err, CoreError::ExtractionFailed(_)));
    }
}
