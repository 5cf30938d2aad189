/// End-to-end tests for the CLI
///
/// None of these reach a live SDS API: every invocation either stops before
/// the first request or points at a closed local port.
use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// The binary with a private key store and no ambient credentials
fn sds_client(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("sds-client");
    cmd.env("SDS_CLIENT_HOME", home)
        .env_remove("SDS_API_KEY")
        .env_remove("SDS_API_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("sds-client")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("upload"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("sds-client").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("sds-client")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing subcommand
    #[test]
    fn test_exit_code_missing_subcommand() {
        cargo_bin_cmd!("sds-client").assert().code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("sds-client")
            .args(["-f", "xml", "search", "acetone"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Unknown search type
    #[test]
    fn test_exit_code_invalid_search_type() {
        cargo_bin_cmd!("sds-client")
            .args(["search", "acetone", "--search-type", "fuzzy"])
            .assert()
            .code(2);
    }

    /// Exit code 4: details without any identifier
    #[test]
    fn test_exit_code_details_without_identifier() {
        let home = TempDir::new().unwrap();
        sds_client(home.path())
            .arg("details")
            .assert()
            .code(4)
            .stderr(predicate::str::contains("Either an SDS ID or a PDF MD5 is required"));
    }

    /// Exit code 4: upload of something that is not a PDF
    #[test]
    fn test_exit_code_upload_not_pdf() {
        let home = TempDir::new().unwrap();
        let file = home.path().join("notes.txt");
        fs::write(&file, "plain text, not a PDF").unwrap();

        sds_client(home.path())
            .arg("upload")
            .arg(&file)
            .assert()
            .code(4)
            .stderr(predicate::str::contains("is not a PDF document"));
    }

    /// Exit code 4: upload larger than the configured limit
    #[test]
    fn test_exit_code_upload_too_large() {
        let home = TempDir::new().unwrap();
        let file = home.path().join("big.pdf");
        let mut content = b"%PDF-1.7\n".to_vec();
        content.resize(512, b' ');
        fs::write(&file, content).unwrap();
        let config = home.path().join("limits.yml");
        fs::write(&config, "max_upload_bytes: 100\n").unwrap();

        sds_client(home.path())
            .arg("--config")
            .arg(&config)
            .arg("upload")
            .arg(&file)
            .assert()
            .code(4)
            .stderr(predicate::str::contains("is too large"));
    }

    /// Exit code 3: upload file does not exist
    #[test]
    fn test_exit_code_upload_missing_file() {
        let home = TempDir::new().unwrap();
        sds_client(home.path())
            .args(["upload", "/nonexistent/path/sheet.pdf"])
            .assert()
            .code(3);
    }

    /// Exit code 3: base URL that is not http(s)
    #[test]
    fn test_exit_code_invalid_base_url() {
        let home = TempDir::new().unwrap();
        sds_client(home.path())
            .args(["--base-url", "ftp://sds.example.com", "search", "acetone"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Invalid API base URL"));
    }

    /// Exit code 3: nothing listening at the API address
    #[test]
    fn test_exit_code_unreachable_api() {
        let home = TempDir::new().unwrap();
        sds_client(home.path())
            .args([
                "--base-url",
                "http://127.0.0.1:9",
                "--timeout",
                "5",
                "search",
                "acetone",
            ])
            .assert()
            .code(3);
    }
}

mod api_key_tests {
    use super::*;

    #[test]
    fn test_api_key_set_show_clear() {
        let home = TempDir::new().unwrap();

        sds_client(home.path())
            .args(["api-key", "show"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("No API key stored"));

        sds_client(home.path())
            .args(["api-key", "set", "sk-live-0123456789"])
            .assert()
            .code(0)
            .stderr(predicate::str::contains("sk-l…6789"));

        let stored = home.path().join(".sds-client").join("api_key");
        assert_eq!(fs::read_to_string(&stored).unwrap().trim(), "sk-live-0123456789");

        sds_client(home.path())
            .args(["api-key", "show"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("sk-l…6789"))
            .stdout(predicate::str::contains("sk-live-0123456789").not());

        sds_client(home.path())
            .args(["api-key", "clear"])
            .assert()
            .code(0);

        sds_client(home.path())
            .args(["api-key", "show"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("No API key stored"));
    }

    #[test]
    fn test_api_key_set_rejects_blank_key() {
        let home = TempDir::new().unwrap();
        sds_client(home.path())
            .args(["api-key", "set", "   "])
            .assert()
            .code(4)
            .stderr(predicate::str::contains("API key must not be empty"));
    }

    #[test]
    fn test_api_key_clear_without_stored_key() {
        let home = TempDir::new().unwrap();
        sds_client(home.path())
            .args(["api-key", "clear"])
            .assert()
            .code(0);
    }
}

mod output_tests {
    use super::*;

    /// A failing command must not create the output file
    #[test]
    fn test_output_file_not_written_on_error() {
        let home = TempDir::new().unwrap();
        let output = home.path().join("result.json");

        sds_client(home.path())
            .arg("-o")
            .arg(&output)
            .arg("details")
            .assert()
            .code(4);

        assert!(!output.exists());
    }
}
