use faceoff::game::{Answer, Player, Question};
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Question used across the flow tests, listed in display order
pub fn breakfast_question() -> Question {
    Question::new(
        "q-breakfast",
        "Name something people eat for breakfast",
        vec![
            Answer::new("eggs", "Eggs", 38),
            Answer::new("cereal", "Cereal", 27),
            Answer::new("pancakes", "Pancakes", 15),
            Answer::new("toast", "Toast", 12),
            Answer::new("bacon", "Bacon", 8),
        ],
    )
    .expect("Failed to build question")
}

pub fn players() -> [Player; 2] {
    [Player::new("1", "Ada"), Player::new("2", "Grace")]
}

/// Runs the CLI binary with an isolated config location
pub struct TestContext {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.json");
        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_faceoff"))
            .args(args)
            .env("FACEOFF_CONFIG", &self.config_path)
            .env("XDG_CONFIG_HOME", self.temp_dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run faceoff binary")
    }
}

impl TestContext {
    /// Run with `input` piped to stdin
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        use std::io::Write;
        use std::process::Stdio;

        let mut child = Command::new(env!("CARGO_BIN_EXE_faceoff"))
            .args(args)
            .env("FACEOFF_CONFIG", &self.config_path)
            .env("XDG_CONFIG_HOME", self.temp_dir.path())
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn faceoff binary");

        child
            .stdin
            .take()
            .expect("Missing stdin")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");

        child.wait_with_output().expect("Failed to wait for faceoff")
    }
}
