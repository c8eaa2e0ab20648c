/*!
 * Tests for glossary loading from files and term protection
 */

use docxlate::errors::GlossaryError;
use docxlate::translation::glossary::GlossaryMap;

use crate::common;

#[test]
fn test_load_withCsvFile_shouldReadPairsInOrder() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "terms.csv",
        "Москва, Мәскеу\n\n , \nООН,БҰҰ,ignored column\n\"Газпром, ПАО\",Газпром\n",
    )
    .unwrap();

    let glossary = GlossaryMap::load(&path).unwrap();

    assert_eq!(glossary.len(), 3);
    let pairs: Vec<(&str, &str)> = glossary.iter().collect();
    assert_eq!(pairs[0], ("Москва", "Мәскеу"));
    assert_eq!(pairs[1], ("ООН", "БҰҰ"));
    assert_eq!(glossary.get("Газпром, ПАО"), Some("Газпром"));
}

#[test]
fn test_load_withDuplicateSource_shouldKeepLastTarget() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "terms.csv", "Paris,Париж\nRome,Рим\nParis,Парижъ\n")
        .unwrap();

    let glossary = GlossaryMap::load(&path).unwrap();

    assert_eq!(glossary.len(), 2);
    assert_eq!(glossary.get("Paris"), Some("Парижъ"));
}

#[test]
fn test_load_withHalfFilledRow_shouldReportLine() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "terms.csv", "Paris,Париж\nRome\nBerlin,Берлин\n")
        .unwrap();

    let result = GlossaryMap::load(&path);

    assert!(matches!(result, Err(GlossaryError::MalformedRow { line: 2 })));
}

#[test]
fn test_load_withMissingFile_shouldReturnIoError() {
    let dir = common::create_temp_dir().unwrap();

    let result = GlossaryMap::load(dir.path().join("absent.csv"));

    assert!(matches!(result, Err(GlossaryError::Io(_))));
}

#[test]
fn test_protectAndRestore_withUnrelatedText_shouldBeIdentity() {
    let glossary: GlossaryMap = [("Paris", "Париж"), ("UN", "ООН")].into_iter().collect();
    let text = "<span data-r=\"0\">Nothing to see here</span>";

    assert_eq!(glossary.protect(text), text);
    assert_eq!(glossary.restore(text), text);
}

#[test]
fn test_protect_shouldNotRespectWordBoundaries() {
    let glossary: GlossaryMap = [("UN", "ООН")].into_iter().collect();

    assert_eq!(glossary.protect("UNESCO"), "«ООН»ESCO");
}
