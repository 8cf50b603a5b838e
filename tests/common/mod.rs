use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch working directory laid out like a matching checkout:
/// `input/reportgen.config.json` plus `output/<id>/` run folders.
pub struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        fs::create_dir_all(tmp.path().join("input")).expect("create input dir");
        fs::create_dir_all(tmp.path().join("output")).expect("create output dir");
        let env = Self { tmp };
        env.write_config(json!({"smtp.enabled": false}));
        env
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn run_dir(&self, run_id: i64) -> PathBuf {
        self.root().join("output").join(run_id.to_string())
    }

    pub fn write_config(&self, config: Value) {
        fs::write(
            self.root().join("input/reportgen.config.json"),
            serde_json::to_string_pretty(&config).expect("serialize config"),
        )
        .expect("write config");
    }

    pub fn add_run(&self, run_id: i64, label: &str, donations: Value, unmatched: Value) {
        let dir = self.run_dir(run_id);
        fs::create_dir_all(&dir).expect("create run dir");
        fs::write(
            dir.join("summary.json"),
            json!({
                "date": "2021-04-01 09:30:00",
                "label": label,
                "importedDonations": donations.as_array().map(Vec::len).unwrap_or_default(),
                "unmatchedAccounts": unmatched.as_array().map(Vec::len).unwrap_or_default(),
                "duplicateCrmKeyDonors": 0,
                "errors": 0
            })
            .to_string(),
        )
        .expect("write summary");
        fs::write(dir.join("donations.json"), donations.to_string()).expect("write donations");
        fs::write(dir.join("unmatched_accounts.json"), unmatched.to_string()).expect("write unmatched");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("reportgen");
        cmd.current_dir(self.root())
            .env_remove("REPORTGEN_CONFIG")
            .env_remove("REPORTGEN_SMTP_PASSWORD")
            .env("RUST_LOG", "off");
        cmd
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root().join(relative)).expect("read output file")
    }
}

pub fn one_donation() -> Value {
    json!([{
        "bbDonorName": "A B",
        "bbDonorId": "bb1",
        "rdDonorId": "rd1",
        "donation": {"amount": 10},
        "rdDonationStatus": {"name": "matched"}
    }])
}

pub fn two_unmatched() -> Value {
    json!([
        {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "id": "rd7",
            "addresses": [{"address1": "12 St James Sq", "city": "London", "state": "LN", "zip": "SW1"}],
            "donations": [{"amount": "20"}, {"amount": "5.5"}]
        },
        {
            "firstName": "Bo",
            "lastName": "Kim",
            "id": "rd8",
            "addresses": [],
            "donations": []
        }
    ])
}
