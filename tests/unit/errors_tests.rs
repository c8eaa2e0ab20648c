/*!
 * Tests for error types and their conversions
 */

use docxlate::errors::{AppError, DocumentError, GlossaryError, ProviderError, TranslationError};

#[test]
fn test_providerError_display_shouldIncludeStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 400,
        message: "Invalid target language".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "API responded with error: 400 - Invalid target language"
    );
}

#[test]
fn test_translationError_fromProviderError_shouldWrapIt() {
    let error: TranslationError = ProviderError::RateLimitExceeded("quota".to_string()).into();

    assert!(matches!(
        error,
        TranslationError::Provider(ProviderError::RateLimitExceeded(_))
    ));
    assert!(error.to_string().contains("quota"));
}

#[test]
fn test_batchLengthMismatch_display_shouldNameBatchAndCounts() {
    let error = TranslationError::BatchLengthMismatch {
        batch: 2,
        expected: 5,
        actual: 4,
    };

    assert_eq!(error.to_string(), "Batch 2 returned 4 texts, expected 5");
}

#[test]
fn test_appError_conversions_shouldPickMatchingVariant() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(AppError::from(io_error), AppError::File(_)));

    let glossary_error = GlossaryError::MalformedRow { line: 3 };
    let app_error = AppError::from(glossary_error);
    assert!(matches!(app_error, AppError::Glossary(GlossaryError::MalformedRow { line: 3 })));
    assert!(app_error.to_string().contains("line 3"));

    let document_error = DocumentError::StructureChanged {
        extracted: 4,
        found: 3,
    };
    assert!(matches!(AppError::from(document_error), AppError::Document(_)));

    let anyhow_error = anyhow::anyhow!("something odd");
    assert!(matches!(AppError::from(anyhow_error), AppError::Unknown(message) if message == "something odd"));
}
