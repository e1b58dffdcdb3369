// tests/golden_cli_tests.rs
// Golden tests driving the flickpick binary end to end: one-shot output is
// snapshotted, interactive transcripts are checked line by line

use assert_cmd::Command;
use insta::assert_snapshot;

fn write_catalog(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("movies.json");
    std::fs::write(
        &path,
        r#"{
            "Action": [
                {"title": "Heat of 95", "year": 1995, "director": "A. Director", "rating": 7.8, "tags": ["crime"]},
                {"title": "Turn of 01", "year": 2001, "director": "B. Director", "rating": 7.1, "tags": ["spy"]},
                {"title": "Peak of 10", "year": 2010, "director": "C. Director", "rating": 8.0, "tags": ["funny-action"]}
            ]
        }"#,
    )
    .unwrap();
    path
}

fn flickpick() -> Command {
    Command::cargo_bin("flickpick").expect("flickpick binary must be built")
}

#[test]
fn golden_one_shot_recent_query() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(&dir);

    let output = flickpick()
        .arg("recent action")
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_snapshot!(stdout.trim(), @r"
    Recommended movies:
    - Peak of 10 (2010) by C. Director (Rating: 8.0)
    - Turn of 01 (2001) by B. Director (Rating: 7.1)
    ");
}

#[test]
fn golden_one_shot_sample_recent_war() {
    let output = flickpick()
        .arg("recent war")
        .arg("--sample")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_snapshot!(stdout.trim(), @r"
    Recommended movies:
    - 1917 (2019) by Sam Mendes (Rating: 8.2)
    - Dunkirk (2017) by Christopher Nolan (Rating: 7.8)
    ");
}

#[test]
fn golden_one_shot_no_match_message() {
    let output = flickpick()
        .arg("documentary")
        .arg("--sample")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_snapshot!(stdout.trim(), @"No matches found for genre or keyword.");
}

#[test]
fn golden_missing_catalog_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();

    let output = flickpick()
        .arg("action")
        .arg("--catalog")
        .arg(dir.path().join("absent.json"))
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_snapshot!(stdout.trim(), @"No movies available for recommendation.");
}

#[test]
fn interactive_session_lists_and_quits() {
    let output = flickpick()
        .arg("--sample")
        .write_stdin("sci-fi\nquit\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Welcome to the Movie Recommender!"));
    assert!(stdout.contains("What would you like to watch?"));
    assert!(stdout.contains("Recommended movies:"));
    assert!(stdout.contains("- Arrival (2016) by Denis Villeneuve (Rating: 7.9)"));
    assert!(stdout.contains("- Blade Runner (1982) by Ridley Scott (Rating: 8.1)"));
    assert!(stdout.trim_end().ends_with("Goodbye!"));

    // Newest first
    let i_newest = stdout.find("Arrival (2016)").unwrap();
    let i_oldest = stdout.find("Blade Runner (1982)").unwrap();
    assert!(i_newest < i_oldest);
}

#[test]
fn interactive_empty_input_shows_guidance() {
    let output = flickpick()
        .arg("--sample")
        .write_stdin("\nquit\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please enter a genre, keyword, or 'quit'."));
    assert!(stdout.contains("Goodbye!"));
}

#[test]
fn interactive_disambiguation_merges_on_zero() {
    let output = flickpick()
        .arg("--sample")
        .write_stdin("com\n0\nquit\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Multiple genres match your search:"));
    assert!(stdout.contains("  1. Comedy"));
    assert!(stdout.contains("  2. Romantic-Comedy"));
    assert!(stdout.contains("Pick a number (0 searches all of them):"));

    // Merged across both genres, newest first
    let order = [
        "Crazy Rich Asians (2018)",
        "The Grand Budapest Hotel (2014)",
        "Superbad (2007)",
        "Notting Hill (1999)",
        "10 Things I Hate About You (1999)",
        "Groundhog Day (1993)",
    ];
    let mut last = 0;
    for title in order {
        let at = stdout
            .find(title)
            .unwrap_or_else(|| panic!("missing {}", title));
        assert!(at > last, "{} out of order", title);
        last = at;
    }
}

#[test]
fn interactive_non_numeric_choice_merges_too() {
    let output = flickpick()
        .arg("--sample")
        .write_stdin("com\nabc\nquit\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Same breadth as answering 0: both genre buckets appear
    assert!(stdout.contains("Superbad (2007)"));
    assert!(stdout.contains("Notting Hill (1999)"));
}

#[test]
fn one_shot_disambiguation_reads_reply_from_stdin() {
    let output = flickpick()
        .arg("com")
        .arg("--sample")
        .write_stdin("2\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("- Crazy Rich Asians (2018) by Jon M. Chu (Rating: 6.9)"));
    assert!(!stdout.contains("Superbad"));
}
