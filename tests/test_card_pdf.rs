//! End-to-end tests: word file in, card sheets out.

use std::fs;
use std::path::{Path, PathBuf};

use krucindiko::config::{AppConfig, GridSpec, OutputJob, DEFAULT_FONT_CANDIDATES};
use krucindiko::error::Error;
use krucindiko::pipeline::{self, render_pdf};
use krucindiko::words::WordList;
use krucindiko::writer::{CardFont, PdfWriterConfig};
use tempfile::tempdir;

fn write_words(dir: &Path, words: &[&str]) -> PathBuf {
    let mut content = String::from("n\tvorto\n");
    for (i, word) in words.iter().enumerate() {
        content.push_str(&format!("{}\t{}\n", i + 1, word));
    }
    let path = dir.join("vortoj.tsv");
    fs::write(&path, content).expect("Failed to write word file");
    path
}

fn config_for(dir: &Path, input: PathBuf) -> AppConfig {
    AppConfig::new()
        .with_input(input)
        .with_output_dir(dir)
        .with_font_candidates(Vec::new())
        .with_compress(false)
}

fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("vorto{}", i)).collect()
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path(), dir.path().join("vortoj.tsv"));

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, Error::InputNotFound { .. }));
    assert!(format!("{}", err).contains("vortoj.tsv"));

    for job in &config.jobs {
        assert!(!config.output_path(job).exists(), "{} should not exist", job.file_name);
    }
}

#[test]
fn test_three_files_written() {
    let dir = tempdir().unwrap();
    let words = numbered(30);
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let input = write_words(dir.path(), &refs);

    let summaries = pipeline::run(&config_for(dir.path(), input)).unwrap();
    assert_eq!(summaries.len(), 3);

    let names: Vec<_> = summaries
        .iter()
        .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["krucindiko-unuflanke.pdf", "krucindiko-duflanke.pdf", "krucindiko.pdf"]
    );

    assert_eq!(summaries[0].page_word_counts, vec![24, 6]);
    assert_eq!(summaries[1].page_word_counts, vec![15, 15]);
    assert_eq!(summaries[2].page_word_counts, vec![24, 6]);

    for summary in &summaries {
        let bytes = fs::read(&summary.path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains(&format!("/Count {}", summary.page_count)));
        assert!(text.contains("(vorto0) Tj"));
    }
}

#[test]
fn test_duplicates_are_dropped() {
    let dir = tempdir().unwrap();
    let input = write_words(dir.path(), &["kato", "hundo", "kato", "birdo"]);

    let words = WordList::load(&input).unwrap();
    assert_eq!(words.iter().collect::<Vec<_>>(), vec!["kato", "hundo", "birdo"]);
    assert_eq!(words.duplicates().len(), 1);
    assert_eq!(words.duplicates()[0].line, 4);

    let summaries = pipeline::run(&config_for(dir.path(), input)).unwrap();
    assert!(summaries.iter().all(|s| s.page_word_counts == vec![3]));
}

#[test]
fn test_output_is_deterministic() {
    let dir = tempdir().unwrap();
    let words = numbered(80);
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let input = write_words(dir.path(), &refs);
    let config = config_for(dir.path(), input).with_compress(true);

    let first: Vec<Vec<u8>> = pipeline::run(&config)
        .unwrap()
        .iter()
        .map(|s| fs::read(&s.path).unwrap())
        .collect();
    let second: Vec<Vec<u8>> = pipeline::run(&config)
        .unwrap()
        .iter()
        .map(|s| fs::read(&s.path).unwrap())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_zero_words() {
    let dir = tempdir().unwrap();
    let input = write_words(dir.path(), &[]);

    let summaries = pipeline::run(&config_for(dir.path(), input)).unwrap();
    for summary in &summaries {
        assert_eq!(summary.page_count, 0);
        let text = String::from_utf8_lossy(&fs::read(&summary.path).unwrap()).into_owned();
        assert!(text.contains("/Count 0"));
    }
}

#[test]
fn test_header_and_malformed_lines_skipped() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("vortoj.tsv");
    fs::write(&input, "1\tkapo\nsen tabo\n2\t   \n3\t  okulo  \textra\n").unwrap();

    let words = WordList::load(&input).unwrap();
    assert_eq!(words.iter().collect::<Vec<_>>(), vec!["okulo"]);
}

#[test]
fn test_embedded_font_when_available() {
    let Some(font_path) = DEFAULT_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
    else {
        return;
    };
    let Ok(font) = CardFont::load(&font_path) else {
        return;
    };

    let words: WordList = ["ĉevalo", "ŝafo"].into_iter().collect();
    let deck = render_pdf(
        &words,
        &GridSpec::standard(),
        &OutputJob::outlined(),
        &font,
        PdfWriterConfig::default().with_compress(false),
    )
    .unwrap();

    let text = String::from_utf8_lossy(&deck.bytes);
    assert!(text.contains("/Subtype /Type0"));
    assert!(text.contains("/Encoding /Identity-H"));
    assert!(text.contains("/FontFile2"));
    assert!(text.contains("/ToUnicode"));
}

#[test]
fn test_unwritable_output_dir_is_io_error() {
    let dir = tempdir().unwrap();
    let input = write_words(dir.path(), &["kato", "hundo"]);
    let config = config_for(&dir.path().join("missing"), input);

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "unexpected error: {}", err);
}

#[test]
fn test_invalid_utf8_input_is_io_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("vortoj.tsv");
    fs::write(&input, b"n\tvorto\n1\t\xFFkato\n").unwrap();

    let err = WordList::load(&input).unwrap_err();
    match err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
        other => panic!("unexpected error: {}", other),
    }
}
