//! Solves are reproducible across processes.
//!
//! `solve_fixture` prints digests of the depth-14 solve. Each run below
//! changes something a solve must not depend on (working directory, locale,
//! unrelated environment, log filter) and must print the same lines.

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// One process launch: where it runs and what it adds to the environment.
struct Launch {
    name: &'static str,
    cwd: PathBuf,
    env: &'static [(&'static str, &'static str)],
}

/// Environment a bare launch starts without, so the host shell cannot leak in.
const SCRUBBED: [&str; 5] = ["LC_ALL", "LC_COLLATE", "LANG", "LANGUAGE", "RUST_LOG"];

/// `target/<profile>/solve_fixture`, next to the `deps/` dir holding this test.
fn fixture_binary() -> PathBuf {
    let exe = env::current_exe().expect("test binary path");
    let profile_dir = exe
        .ancestors()
        .nth(2)
        .expect("test binary lives in target/<profile>/deps");
    profile_dir.join(format!("solve_fixture{}", env::consts::EXE_SUFFIX))
}

fn launches() -> Vec<Launch> {
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
    vec![
        Launch {
            name: "workspace",
            cwd: workspace.clone(),
            env: &[],
        },
        Launch {
            name: "temp_dir",
            cwd: env::temp_dir(),
            env: &[],
        },
        Launch {
            name: "c_locale",
            cwd: workspace.clone(),
            env: &[("LC_ALL", "C"), ("LANG", "C")],
        },
        Launch {
            name: "noisy_env",
            cwd: workspace,
            env: &[
                ("TILESLIDE_NOISE", "ignored"),
                ("TZ", "Pacific/Auckland"),
                ("HOME", "/nonexistent"),
                ("RUST_LOG", "trace"),
            ],
        },
    ]
}

/// Runs the fixture and parses its `key=value` lines.
fn run(launch: &Launch) -> BTreeMap<String, String> {
    let binary = fixture_binary();
    let mut command = Command::new(&binary);
    command.current_dir(&launch.cwd);
    for key in SCRUBBED {
        command.env_remove(key);
    }
    command.envs(launch.env.iter().copied());

    let output = command
        .output()
        .unwrap_or_else(|e| panic!("{}: cannot spawn {}: {e}", launch.name, binary.display()));
    assert!(
        output.status.success(),
        "{}: fixture exited with {}: {}",
        launch.name,
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout)
        .expect("fixture prints UTF-8")
        .lines()
        .map(|line| {
            let (key, value) = line
                .split_once('=')
                .unwrap_or_else(|| panic!("{}: malformed line {line:?}", launch.name));
            (key.to_string(), value.to_string())
        })
        .collect()
}

#[test]
fn fixture_output_is_independent_of_process_environment() {
    let runs: Vec<(&str, BTreeMap<String, String>)> =
        launches().iter().map(|l| (l.name, run(l))).collect();
    let (_, reference) = &runs[0];

    assert_eq!(reference["termination_reason"], "goal_reached");
    assert_eq!(reference["depth"], "14");
    for key in ["graph_digest", "transcript_digest", "policy_digest"] {
        assert!(
            reference[key].starts_with("sha256:"),
            "{key} is not a digest: {}",
            reference[key]
        );
    }

    for (name, lines) in &runs[1..] {
        assert_eq!(lines, reference, "{name} launch diverged from workspace launch");
    }
}
