//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

const ARTICLE_HTML: &str = r#"<html>
<head><title>City News</title><style>p { color: red; }</style></head>
<body><h1>City news</h1><p>The city is building a new school.</p><script>alert(1)</script></body>
</html>"#;

/// Command isolated from any user dictionary and API key.
fn cmd(config_home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("khulasa");
    cmd.env("XDG_CONFIG_HOME", config_home.path()).env_remove("RAPIDAPI_KEY");
    cmd
}

#[test]
fn test_translate_argument() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["translate", "This is the summary."])
        .assert()
        .success()
        .stdout("یہ ہے دی خلاصہ.\n");
}

#[test]
fn test_translate_stdin() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .arg("translate")
        .write_stdin("Hello, world!\n")
        .assert()
        .success()
        .stdout("Hello, دنیا!\n");
}

#[test]
fn test_translate_with_dictionary_file() {
    let tmp = TempDir::new().unwrap();
    let dict = tmp.path().join("extra.json");
    std::fs::write(&dict, r#"{"cat": "بلی"}"#).unwrap();

    cmd(&tmp)
        .args(["translate", "--dictionary", dict.to_str().unwrap(), "The cat"])
        .assert()
        .success()
        .stdout("دی بلی\n");
}

#[test]
fn test_translate_uses_default_dictionary_location() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("khulasa");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("dictionary.json"), r#"{"happy": "خوش"}"#).unwrap();

    cmd(&tmp)
        .args(["translate", "happy day"])
        .assert()
        .success()
        .stdout("خوش دن\n");
}

#[test]
fn test_translate_bad_dictionary() {
    let tmp = TempDir::new().unwrap();
    let dict = tmp.path().join("broken.json");
    std::fs::write(&dict, "[1, 2, 3]").unwrap();

    cmd(&tmp)
        .args(["translate", "--dictionary", dict.to_str().unwrap(), "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load dictionary"));
}

#[test]
fn test_scrape_file() {
    let tmp = TempDir::new().unwrap();
    let page = tmp.path().join("page.html");
    std::fs::write(&page, ARTICLE_HTML).unwrap();

    cmd(&tmp)
        .args(["scrape", page.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("The city is building a new school."))
        .stdout(predicate::str::contains("alert").not())
        .stdout(predicate::str::contains("color").not());
}

#[test]
fn test_scrape_stdin_with_limit() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["scrape", "-", "--max-chars", "9"])
        .write_stdin(ARTICLE_HTML)
        .assert()
        .success()
        .stdout("City news\n");
}

#[test]
fn test_scrape_missing_file() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp).args(["scrape", "nonexistent.html"]).assert().failure();
}

#[test]
fn test_summarize_invalid_url() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["summarize", "ftp://example.com/file", "--api-key", "key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please provide a valid URL"));
}

#[test]
fn test_summarize_missing_api_key() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["summarize", "https://example.com/article"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RapidAPI key is missing"));
}

#[test]
fn test_verbose_banner() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["-v", "translate", "news"])
        .assert()
        .success()
        .stdout("خبر\n")
        .stderr(predicate::str::contains("Khulasa"));
}

#[test]
fn test_completions() {
    let tmp = TempDir::new().unwrap();
    cmd(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("khulasa"));
}
