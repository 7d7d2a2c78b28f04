use comics_downloader::comic::sanitize_filename;
use comics_downloader::{Comic, IssueId, Options};

fn naruto() -> Comic {
    Comic {
        source: String::from("www.mangatown.com"),
        url_source: String::from("https://www.mangatown.com/manga/naruto/v63/c693/"),
        name: String::from("Naruto Shippuden"),
        issue_number: String::from("c693"),
        links: vec![String::from("https://zjcdn.mangahere.org/n001.jpg")],
    }
}

#[test]
fn test_file_stem() {
    let comic = naruto();
    assert_eq!(comic.file_stem(), "naruto-shippuden-c693");
    assert_eq!(comic.issue_id(), IssueId::Number(693.0));
}

#[test]
fn test_file_stem_of_slashed_name() {
    let mut comic = naruto();
    comic.name = String::from("Fate/Zero");
    assert!(!comic.file_stem().contains('/'));
}

#[test]
fn test_sanitize_filename() {
    let filenames = vec![
        "Chapter 1: Test",
        "File/with/slashes",
        "Windows:reserved*chars?",
        ".hidden",
        "Very.long.file.name.that.should.be.truncated.if.it.exceeds.the.maximum.length.allowed.by.the.underlying.filesystem.which.varies.but.is.typically.around.255.characters.on.modern.systems.like.Windows.NTFS.or.Linux.ext4.this.helps.ensure.compatibility.across.different.platforms",
    ];

    for filename in filenames {
        let sanitized = sanitize_filename(filename);

        assert!(!sanitized.is_empty());
        assert!(sanitized.len() <= 255);
        assert!(!sanitized.contains('/'));
        assert!(!sanitized.starts_with('.'));
    }
}

#[test]
fn test_file_stem_of_page_derived_labels() {
    let mut comic = naruto();
    comic.name = String::from("Boruto: Naruto  Next Generations");
    comic.issue_number = String::from(" Vol.TBD Chapter 14 - Teamwork...!!");

    let stem = comic.file_stem();
    assert!(stem.starts_with("boruto"));
    assert!(!stem.contains(' '));
    assert!(!stem.contains("--"));
    assert!(stem.contains("chapter-14-teamwork"));

    assert_eq!(sanitize_filename("Naruto - c693"), "naruto-c693");
}

#[test]
fn test_sanitize_truncates_on_char_boundary() {
    let long = "漫".repeat(200);
    let sanitized = sanitize_filename(&long);
    assert!(sanitized.len() <= 255);
    assert!(sanitized.chars().all(|c| c == '漫'));
}

#[test]
fn test_comic_json_shape() {
    let value = serde_json::to_value(naruto()).unwrap();
    assert_eq!(value["source"], "www.mangatown.com");
    assert_eq!(value["issue_number"], "c693");
    assert_eq!(value["links"].as_array().unwrap().len(), 1);
}

#[test]
fn test_options_from_json_uses_defaults() {
    let options: Options = serde_json::from_str(
        r#"{"source": "www.comicextra.com", "url": "https://www.comicextra.com/daredevil/chapter-600/full", "issues_range": "5-7"}"#,
    )
    .unwrap();

    assert_eq!(options.source, "www.comicextra.com");
    assert!(!options.all);
    assert_eq!(options.concurrency, 5);
    assert_eq!(options.format, "pdf");
    assert_eq!(options.custom_name(), None);
}
