//! Integration tests for the coursetree binary.
//!
//! Each test runs the real binary against an isolated config file and data
//! file in a temp directory. Credentials come from the environment so no
//! prompt is ever shown.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

use coursetree::auth::PasswordHash;

const ADMIN: &str = "admin";
const PASSWORD: &str = "hunter2";

// =============================================================================
// Test Fixtures
// =============================================================================

struct Env {
    dir: TempDir,
}

impl Env {
    /// A temp home with a config file that defines the admin account.
    fn new() -> Self {
        let env = Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        };
        env.write_config("");
        env
    }

    /// Rewrite the config file with extra top-level lines.
    fn write_config(&self, extra: &str) {
        let hash = PasswordHash::derive(PASSWORD, "fixedtestsalt", 1_000).expect("derive hash");
        self.dir
            .child("config.toml")
            .write_str(&format!(
                "data_file = \"{}\"\n{extra}\n[admin]\nusername = \"{ADMIN}\"\npassword_hash = \"{hash}\"\n",
                self.data().path().display()
            ))
            .expect("write config");
    }

    /// The binary with environment isolated to this fixture.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("coursetree").expect("binary");
        cmd.env("COURSETREE_CONFIG", self.dir.child("config.toml").path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("COURSETREE_DATA")
            .env_remove("COURSETREE_ADMIN_USER")
            .env_remove("COURSETREE_ADMIN_PASSWORD")
            .env_remove("RUST_LOG")
            .arg("--no-interactive");
        cmd
    }

    /// The binary with valid admin credentials in the environment.
    fn admin(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("COURSETREE_ADMIN_USER", ADMIN)
            .env("COURSETREE_ADMIN_PASSWORD", PASSWORD);
        cmd
    }

    fn data(&self) -> assert_fs::fixture::ChildPath {
        self.dir.child("catalogue.json")
    }

    /// Math > Algebra > Linear Eq.
    fn seed(&self) {
        self.admin()
            .args(["subject", "add", "Math", "-d", "desc"])
            .assert()
            .success();
        self.admin()
            .args(["section", "add", "1", "Algebra"])
            .assert()
            .success();
        self.admin()
            .args(["topic", "add", "1", "Linear Eq", "--text", "ax+b=0"])
            .assert()
            .success();
    }
}

// =============================================================================
// Browsing
// =============================================================================

#[test]
fn list_on_empty_catalogue() {
    let env = Env::new();

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No subjects yet."));
    env.data().assert(predicate::path::missing());
}

#[test]
fn list_shows_tree_after_seeding() {
    let env = Env::new();
    env.seed();

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] Math"))
        .stdout(predicate::str::contains("  [1] Algebra"))
        .stdout(predicate::str::contains("    [1] Linear Eq (text)"));
}

#[test]
fn list_json_wraps_subjects() {
    let env = Env::new();
    env.seed();

    let output = env.cmd().args(["list", "--json"]).output().expect("run");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["subjects"][0]["name"], "Math");
    assert_eq!(value["subjects"][0]["sections"][0]["topics"][0]["id"], 1);
}

#[test]
fn show_unknown_subject_fails() {
    let env = Env::new();

    env.cmd()
        .args(["show", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Subject not found"));
}

#[test]
fn check_commands_print_booleans() {
    let env = Env::new();
    env.seed();

    env.cmd()
        .args(["subject", "check", "1"])
        .assert()
        .success()
        .stdout("true\n");
    env.cmd()
        .args(["section", "check", "99"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn topic_show_prints_text() {
    let env = Env::new();
    env.seed();

    env.cmd()
        .args(["topic", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ax+b=0"));
}

// =============================================================================
// Mutations
// =============================================================================

#[test]
fn duplicate_subject_is_rejected_and_file_unchanged() {
    let env = Env::new();
    env.seed();
    let before = std::fs::read(env.data().path()).expect("read before");

    env.admin()
        .args(["subject", "add", "MATH"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A subject with this name already exists",
        ));

    assert_eq!(std::fs::read(env.data().path()).expect("read after"), before);
}

#[test]
fn subject_with_sections_cannot_be_removed() {
    let env = Env::new();
    env.seed();
    let before = std::fs::read(env.data().path()).expect("read before");

    env.admin()
        .args(["subject", "rm", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot delete subject with sections"));

    assert_eq!(std::fs::read(env.data().path()).expect("read after"), before);
}

#[test]
fn section_with_topics_cannot_be_removed() {
    let env = Env::new();
    env.seed();
    let before = std::fs::read(env.data().path()).expect("read before");

    env.admin()
        .args(["section", "rm", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot delete section with topics"));

    assert_eq!(std::fs::read(env.data().path()).expect("read after"), before);
}

#[test]
fn padded_subject_name_is_stored_trimmed() {
    let env = Env::new();
    env.seed();

    env.admin()
        .args(["subject", "add", "  Math  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A subject with this name already exists",
        ));

    env.admin()
        .args(["subject", "add", " Physics "])
        .assert()
        .success();
    env.data().assert(predicate::str::contains("\"Physics\""));
}

#[test]
fn bottom_up_removal_empties_catalogue() {
    let env = Env::new();
    env.seed();

    env.admin().args(["topic", "rm", "1"]).assert().success();
    env.admin().args(["section", "rm", "1"]).assert().success();
    env.admin()
        .args(["subject", "rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subject deleted successfully"));

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No subjects yet."));
}

#[test]
fn edit_keeps_omitted_fields() {
    let env = Env::new();
    env.seed();

    env.admin()
        .args(["subject", "edit", "1", "--name", "Mathematics"])
        .assert()
        .success();

    env.cmd()
        .args(["show", "Mathematics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    desc"));
}

#[test]
fn quiet_suppresses_success_messages() {
    let env = Env::new();

    env.admin()
        .args(["-q", "subject", "add", "Physics"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn data_flag_overrides_config() {
    let env = Env::new();
    let other = env.dir.child("elsewhere").child("other.json");

    env.admin()
        .arg("--data")
        .arg(other.path())
        .args(["subject", "add", "Chemistry"])
        .assert()
        .success();

    other.assert(predicate::str::contains("Chemistry"));
    env.data().assert(predicate::path::missing());
}

// =============================================================================
// Authorization
// =============================================================================

#[test]
fn wrong_password_is_unauthorized() {
    let env = Env::new();

    env.cmd()
        .env("COURSETREE_ADMIN_USER", ADMIN)
        .env("COURSETREE_ADMIN_PASSWORD", "wrong")
        .args(["subject", "add", "Math"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unauthorized"));
    env.data().assert(predicate::path::missing());
}

#[test]
fn missing_password_without_terminal_fails() {
    let env = Env::new();

    env.cmd()
        .args(["--user", ADMIN, "subject", "add", "Math"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("COURSETREE_ADMIN_PASSWORD"));
}

#[test]
fn reads_need_no_credentials() {
    let env = Env::new();
    env.seed();

    env.cmd().arg("list").assert().success();
    env.cmd().args(["show", "Math"]).assert().success();
}

#[test]
fn hash_password_output_is_accepted_by_parser() {
    let env = Env::new();

    let output = env
        .cmd()
        .env("COURSETREE_ADMIN_PASSWORD", "s3cret")
        .arg("hash-password")
        .output()
        .expect("run");
    assert!(output.status.success());

    let printed = String::from_utf8(output.stdout).expect("utf8");
    let hash = PasswordHash::parse(printed.trim()).expect("parse printed hash");
    assert!(hash.verify("s3cret"));
    assert!(!printed.contains("s3cret"));
}

#[test]
fn log_dir_receives_rotating_log_file() {
    let env = Env::new();
    let log_dir = env.dir.child("logs");
    env.write_config(&format!("log_dir = \"{}\"\n", log_dir.path().display()));

    env.admin()
        .args(["subject", "add", "Math"])
        .assert()
        .success()
        .stderr(predicate::str::contains("subject created").not());

    let files: Vec<_> = std::fs::read_dir(log_dir.path())
        .expect("log dir created")
        .map(|entry| entry.expect("dir entry").path())
        .collect();
    assert_eq!(files.len(), 1);

    let name = files[0].file_name().and_then(|n| n.to_str()).unwrap_or("");
    assert!(name.starts_with("coursetree.") && name.ends_with(".log"), "{name}");

    let contents = std::fs::read_to_string(&files[0]).expect("read log");
    assert!(contents.contains("subject created"));
    assert!(contents.contains("loading catalogue"));
}

#[test]
fn werkzeug_hash_in_config_is_accepted() {
    // pbkdf2_hmac("sha256", b"hunter2", b"fixedtestsalt", 1000)
    let env = Env::new();
    let config = env.dir.child("config.toml");
    config
        .write_str(&format!(
            "data_file = \"{}\"\n\n[admin]\nusername = \"{ADMIN}\"\npassword_hash = \"pbkdf2:sha256:1000$fixedtestsalt$46451035336d19dad8790d7635324bceb6c075556682b0c081461a6cddf02c1e\"\n",
            env.data().path().display()
        ))
        .expect("write config");

    env.admin()
        .args(["subject", "add", "Math"])
        .assert()
        .success();
}

#[test]
fn completion_generates_script() {
    let env = Env::new();

    env.cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("coursetree"));
}
