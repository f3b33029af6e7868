#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use keg::areas::repository::Repository;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A freshly initialized repository over a temp working directory.
#[fixture]
pub fn repository(repository_dir: TempDir) -> (TempDir, Repository) {
    let repo = open_repository(repository_dir.path());
    repo.init().expect("Failed to initialize repository");

    (repository_dir, repo)
}

/// Open an engine handle over a directory, discarding human output.
pub fn open_repository(dir: &Path) -> Repository {
    Repository::new(&dir.to_string_lossy(), Box::new(std::io::sink()))
        .expect("Failed to open repository")
}

pub fn run_keg_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("keg").expect("Failed to find keg binary");
    cmd.current_dir(dir).args(args);
    cmd
}

/// Count the object files under `<workdir>/.keg/objects`.
pub fn count_objects(dir: &Path) -> usize {
    fn walk(dir: &Path, count: &mut usize) {
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(&path, count);
                } else {
                    *count += 1;
                }
            }
        }
    }

    let mut count = 0;
    walk(&dir.join(".keg").join("objects"), &mut count);
    count
}
