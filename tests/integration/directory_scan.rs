use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::TempDir;
use wordtree::extract::extract_word_count;
use wordtree::format::DocumentFormat;
use wordtree::run::RunCoordinator;
use wordtree::tree::walker::{discover, WalkerConfig};
use wordtree::types::WordCount;
use zip::write::FileOptions;
use zip::ZipWriter;

fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A small library covering every supported format.
fn library(temp: &TempDir) -> std::path::PathBuf {
    let root = temp.path().join("library");
    let (cp1251, _, _) = encoding_rs::WINDOWS_1251.encode("Война и мир");
    write(&root, "russian/tolstoy.txt", &cp1251);
    write(
        &root,
        "russian/pushkin.fb2",
        "<FictionBook><description><title>Skip me</title></description>\
         <body><p>Я помню чудное мгновенье</p></body>\
         <binary id=\"c.jpg\">QUJDRA==</binary></FictionBook>"
            .as_bytes(),
    );
    write(&root, "notes.rtf", b"{\\rtf1\\ansi plain rtf words}");
    write(
        &root,
        "bundle.zip",
        &zip_bytes(&[
            ("a.txt", b"one two three"),
            ("nested/b.fb2", b"<p>four five</p>"),
            ("cover.png", b"\x89PNG"),
        ]),
    );
    write(
        &root,
        "paper.docx",
        &zip_bytes(&[
            ("[Content_Types].xml", b"<Types/>"),
            (
                "word/document.xml",
                b"<w:document><w:body><w:p><w:r><w:t>Docx body text</w:t></w:r></w:p>\
                  </w:body></w:document>",
            ),
        ]),
    );
    write(
        &root,
        "book.epub",
        &zip_bytes(&[
            ("mimetype", b"application/epub+zip"),
            ("OEBPS/ch1.xhtml", b"<html><body><p>Chapter one</p></body></html>"),
            ("OEBPS/ch2.xhtml", b"<html><body><p>Chapter two here</p></body></html>"),
        ]),
    );
    write(&root, "empty.zip", &zip_bytes(&[("image.png", b"\x89PNG")]));
    write(&root, "broken.zip", b"PK but not really");
    write(&root, ".hidden/secret.txt", b"hidden words");
    root
}

#[tokio::test]
async fn scan_counts_every_supported_format() {
    let temp = TempDir::new().unwrap();
    let root = library(&temp);

    let entries = discover(&root, &WalkerConfig::default()).unwrap();
    assert_eq!(entries.len(), 9);
    let report = RunCoordinator::default().run(entries).await.unwrap();
    let tree = &report.tree;

    assert_eq!(tree.name, "library");
    let count = |path: &[&str]| tree.find(path).unwrap().word_count;
    assert_eq!(count(&["russian", "tolstoy.txt"]), WordCount::Counted(3));
    assert_eq!(count(&["russian", "pushkin.fb2"]), WordCount::Counted(4));
    assert_eq!(count(&["russian"]), WordCount::Counted(7));
    assert_eq!(count(&["notes.rtf"]), WordCount::Counted(5));
    assert_eq!(count(&["bundle.zip"]), WordCount::Counted(5));
    // Zipped books are read as UTF-8 text without unpacking.
    let read = |name: &str| fs::read(root.join(name)).unwrap();
    let docx = extract_word_count(&read("paper.docx"), DocumentFormat::Docx);
    let epub = extract_word_count(&read("book.epub"), DocumentFormat::Epub);
    assert!(docx > 0 && epub > 0);
    assert_eq!(count(&["paper.docx"]), WordCount::Counted(docx));
    assert_eq!(count(&["book.epub"]), WordCount::Counted(epub));
    assert_eq!(count(&["empty.zip"]), WordCount::Unknown);
    assert_eq!(count(&["broken.zip"]), WordCount::Unknown);
    assert_eq!(count(&[".hidden", "secret.txt"]), WordCount::Counted(2));

    assert_eq!(report.stats.total_words, 7 + 5 + 5 + docx + epub + 2);
    assert_eq!(report.stats.files, 9);
    assert_eq!(report.stats.folders, 3);
}

#[tokio::test]
async fn hidden_entries_can_be_left_out() {
    let temp = TempDir::new().unwrap();
    let root = library(&temp);
    let config = WalkerConfig {
        include_hidden: false,
        ..WalkerConfig::default()
    };
    let entries = discover(&root, &config).unwrap();
    assert_eq!(entries.len(), 8);
    let report = RunCoordinator::default().run(entries).await.unwrap();
    assert!(report.tree.child(".hidden").is_none());
    assert_eq!(report.stats.folders, 2);
}

#[tokio::test]
async fn empty_directory_is_an_empty_run() {
    let temp = TempDir::new().unwrap();
    let entries = discover(temp.path(), &WalkerConfig::default()).unwrap();
    assert!(entries.is_empty());
    assert!(RunCoordinator::default().run(entries).await.is_err());
}
