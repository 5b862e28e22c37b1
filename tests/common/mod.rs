#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

/// Compare `actual` against `tests/snapshots/<name>` line by line.
///
/// `RINGWALK_UPDATE_SNAPSHOTS=1` rewrites the file instead.
pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var_os("RINGWALK_UPDATE_SNAPSHOTS").is_some() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("golden file {} not found", path.display()));
    let expected: Vec<&str> = expected.lines().collect();
    let actual: Vec<&str> = actual.lines().collect();

    if let Some(line) = (0..expected.len().max(actual.len()))
        .find(|&i| expected.get(i) != actual.get(i))
    {
        panic!(
            "{} differs at line {}:\n  golden: {}\n  actual: {}\n\
             ({} golden lines, {} actual; RINGWALK_UPDATE_SNAPSHOTS=1 regenerates)",
            name,
            line + 1,
            expected.get(line).unwrap_or(&"<missing>"),
            actual.get(line).unwrap_or(&"<missing>"),
            expected.len(),
            actual.len()
        );
    }
}

/// Straightforward `Vec`-backed version of the step rule, used as the
/// reference model for the tree-backed simulator.
#[derive(Debug, Clone)]
pub struct VecModel {
    pub values: Vec<i64>,
    pub pointer: usize,
}

impl VecModel {
    pub fn new(values: &[i64]) -> Self {
        Self {
            values: values.to_vec(),
            pointer: 0,
        }
    }

    pub fn step(&mut self) {
        if self.values.is_empty() {
            return;
        }
        let len = self.values.len();
        self.pointer %= len;
        let x = self.values[self.pointer];

        if x.rem_euclid(2) == 1 {
            self.values.insert(self.pointer + 1, x - 1);
            self.pointer = wrap(self.pointer as i128 + x as i128, self.values.len());
        } else {
            let at = (self.pointer + 1) % len;
            let removed = self.values.remove(at);
            let len = self.values.len();
            if len == 0 {
                self.pointer = 0;
                return;
            }
            if at <= self.pointer {
                self.pointer = wrap(self.pointer as i128 - 1, len);
            }
            self.pointer = wrap(self.pointer as i128 + removed as i128, len);
        }
    }

    pub fn render(&self) -> Vec<i64> {
        let (head, tail) = self.values.split_at(self.pointer.min(self.values.len()));
        tail.iter().chain(head.iter()).copied().collect()
    }
}

fn wrap(value: i128, len: usize) -> usize {
    value.rem_euclid(len as i128) as usize
}
