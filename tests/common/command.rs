use assert_cmd::Command;
use std::path::Path;

/// `lbit` acting as `user` against the storage at `storage`
pub fn run_lbit_command(storage: &Path, user: &str, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("lbit").expect("Failed to find lbit binary");
    cmd.envs(vec![("NO_COLOR", "1"), ("RUST_LOG", "off")]);
    cmd.env_remove("LBIT_STORAGE");
    cmd.env_remove("LBIT_USER");
    cmd.arg("--storage").arg(storage);
    cmd.arg("--user").arg(user);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
