//! End-to-end tests for the itemvault binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEX_A: &str = "a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4";
const HEX_B: &str = "00000000000000000000000000000000";

struct Fixture {
    config: TempDir,
    source: TempDir,
    destination: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            config: TempDir::new().unwrap(),
            source: TempDir::new().unwrap(),
            destination: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("itemvault").unwrap();
        cmd.env("ITEMVAULT_DATA_DIR", self.config.path());
        cmd
    }

    fn populate_source(&self) {
        let nested = self.source.path().join("item1");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join(HEX_A), b"{\"title\":\"map\"}").unwrap();
        fs::write(nested.join("readme.txt"), b"skip me").unwrap();
        fs::write(self.source.path().join(HEX_B), b"{}").unwrap();
    }

    fn archives(&self) -> Vec<PathBuf> {
        let mut archives: Vec<PathBuf> = fs::read_dir(self.destination.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "zip"))
            .collect();
        archives.sort();
        archives
    }
}

fn write_old_archives(dir: &Path, count: u32) {
    for day in 1..=count {
        fs::write(
            dir.join(format!("items_2020_01_{:02}_0000.zip", day)),
            b"old",
        )
        .unwrap();
    }
}

#[test]
fn run_creates_archive_and_cleans_staging() {
    let fx = Fixture::new();
    fx.populate_source();

    fx.cmd()
        .args(["run", "--source"])
        .arg(fx.source.path())
        .arg("--destination")
        .arg(fx.destination.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 copied, 2 archived"));

    let archives = fx.archives();
    assert_eq!(archives.len(), 1);

    // Staging directory is gone; only the archive remains
    let entries: Vec<PathBuf> = fs::read_dir(fx.destination.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries, archives);

    // Archive holds exactly the two hex-named files, flat
    let file = fs::File::open(&archives[0]).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec![HEX_B.to_string(), HEX_A.to_string()]);
}

#[test]
fn run_with_missing_source_fails_with_config_error() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["run", "--source"])
        .arg(fx.source.path().join("missing"))
        .arg("--destination")
        .arg(fx.destination.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn run_without_config_or_flags_fails() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Settings file not found"));
}

#[test]
fn rerun_never_silently_overwrites() {
    let fx = Fixture::new();
    fx.populate_source();

    let run = |fx: &Fixture| {
        fx.cmd()
            .args(["run", "--source"])
            .arg(fx.source.path())
            .arg("--destination")
            .arg(fx.destination.path())
            .output()
            .unwrap()
    };

    let first = run(&fx);
    assert!(first.status.success());

    // Second run in the same minute window must fail with a staging error;
    // if the minute happened to roll over, it must produce a distinct name.
    let second = run(&fx);
    if second.status.success() {
        assert_eq!(fx.archives().len(), 2);
    } else {
        assert_eq!(second.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&second.stderr).contains("Staging error"));
        assert_eq!(fx.archives().len(), 1);
    }
}

#[test]
fn run_with_unwritable_journal_exits_2_but_archives() {
    let fx = Fixture::new();
    fx.populate_source();

    // A directory where the journal file should be makes every journal
    // write fail; the backup must still complete, with exit code 2.
    fs::create_dir_all(fx.config.path().join("journal.log")).unwrap();

    fx.cmd()
        .args(["run", "--source"])
        .arg(fx.source.path())
        .arg("--destination")
        .arg(fx.destination.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("2 copied, 2 archived"))
        .stderr(predicate::str::contains("warning:"));

    assert_eq!(fx.archives().len(), 1);
}

#[test]
fn run_applies_retention_limit() {
    let fx = Fixture::new();
    fx.populate_source();
    write_old_archives(fx.destination.path(), 12);

    fx.cmd()
        .args(["run", "--retention-limit", "10", "--source"])
        .arg(fx.source.path())
        .arg("--destination")
        .arg(fx.destination.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 pruned"));

    // 12 old + 1 new - 3 pruned = 10; the three oldest are gone
    let archives = fx.archives();
    assert_eq!(archives.len(), 10);
    assert!(!fx
        .destination
        .path()
        .join("items_2020_01_01_0000.zip")
        .exists());
    assert!(!fx
        .destination
        .path()
        .join("items_2020_01_03_0000.zip")
        .exists());
    assert!(fx
        .destination
        .path()
        .join("items_2020_01_04_0000.zip")
        .exists());
}

#[test]
fn prune_requires_force() {
    let fx = Fixture::new();
    write_old_archives(fx.destination.path(), 12);

    fx.cmd()
        .args(["prune", "--retention-limit", "10", "--destination"])
        .arg(fx.destination.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 to delete"));

    // Nothing deleted without --force
    assert_eq!(fx.archives().len(), 12);
}

#[test]
fn prune_force_deletes_oldest() {
    let fx = Fixture::new();
    write_old_archives(fx.destination.path(), 12);

    fx.cmd()
        .args(["prune", "--force", "--retention-limit", "10", "--destination"])
        .arg(fx.destination.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 archive(s)."));

    let archives = fx.archives();
    assert_eq!(archives.len(), 10);
    assert!(!fx
        .destination
        .path()
        .join("items_2020_01_01_0000.zip")
        .exists());
    assert!(!fx
        .destination
        .path()
        .join("items_2020_01_02_0000.zip")
        .exists());
}

#[test]
fn prune_under_limit_is_a_noop() {
    let fx = Fixture::new();
    write_old_archives(fx.destination.path(), 3);

    fx.cmd()
        .args(["prune", "--force", "--retention-limit", "10", "--destination"])
        .arg(fx.destination.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No archives to prune."));

    assert_eq!(fx.archives().len(), 3);
}

#[test]
fn list_shows_archives() {
    let fx = Fixture::new();
    write_old_archives(fx.destination.path(), 2);

    fx.cmd()
        .args(["list", "--destination"])
        .arg(fx.destination.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("items_2020_01_01_0000.zip")
                .and(predicate::str::contains("Total: 2 archive(s)")),
        );
}

#[test]
fn config_round_trip() {
    let fx = Fixture::new();

    fx.cmd()
        .args(["config", "--source"])
        .arg(fx.source.path())
        .arg("--destination")
        .arg(fx.destination.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written"));

    fx.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Retention limit: 10")
                .and(predicate::str::contains("Archive prefix:  items")),
        );

    // A run can now rely on the settings file alone
    fx.populate_source();
    fx.cmd().arg("run").assert().success();
    assert_eq!(fx.archives().len(), 1);
}

#[test]
fn config_unconfigured_shows_hint() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not configured yet"));
}
