use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Employees used by most end-to-end tests.
pub const EMPLOYEES_CSV: &str = "\
1,Alice,NY
2,Bob,LA
3,Carol,NY
";

/// Issues used by most end-to-end tests; dates are dd/MM/yyyy.
pub const ISSUES_CSV: &str = "\
IS001,Software,01/04/2019,10/04/2019,HIGH,OPEN,1
IS002,Hardware,02/04/2019,05/04/2019,LOW,CLOSED,2
IS003,Network,20/04/2019,28/04/2019,MEDIUM,OPEN,2
IS004,Software,25/04/2019,20/05/2019,LOW,OPEN,
IS005,Hardware,15/03/2019,01/04/2019,High,open,3
";

/// Scratch directory with a `data/` folder and a working directory for `itr`.
pub struct ItrWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub data_dir: PathBuf,
}

impl ItrWorkspace {
    /// Empty workspace; `data/` exists but holds no files.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        let data_dir = root.join("data");
        fs::create_dir_all(&data_dir).expect("create data dir");
        Self {
            temp_dir,
            root,
            data_dir,
        }
    }

    /// Workspace seeded with [`EMPLOYEES_CSV`] and [`ISSUES_CSV`].
    pub fn with_sample_data() -> Self {
        let workspace = Self::new();
        workspace.write_data(EMPLOYEES_CSV, ISSUES_CSV);
        workspace
    }

    pub fn write_data(&self, employees: &str, issues: &str) {
        fs::write(self.data_dir.join("employees.csv"), employees).expect("write employees");
        fs::write(self.data_dir.join("issues.csv"), issues).expect("write issues");
    }

    pub fn write_config(&self, yaml: &str) {
        let dir = self.root.join(".issue-tracker");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("config.yaml"), yaml).expect("write config");
    }
}

pub struct CmdOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Run `itr` inside the workspace with a clean environment.
pub fn run_itr<I, S>(workspace: &ItrWorkspace, args: I, label: &str) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_itr_with_env(workspace, args, std::iter::empty::<(&str, &str)>(), label)
}

pub fn run_itr_with_env<I, S, E, K, V>(
    workspace: &ItrWorkspace,
    args: I,
    env: E,
    label: &str,
) -> CmdOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::cargo_bin("itr").expect("itr binary");
    cmd.current_dir(&workspace.root)
        .env_remove("ITR_REFERENCE_DATE")
        .env_remove("ITR_DATA_DIR")
        .env_remove("RUST_LOG")
        .args(args)
        .envs(env);

    let output = cmd.output().expect("run itr");
    let result = CmdOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !result.status.success() {
        eprintln!("[{label}] itr exited with {}: {}", result.status, result.stderr);
    }
    result
}

/// Parse stdout as JSON, failing the test with context on error.
pub fn parse_json(output: &CmdOutput, label: &str) -> serde_json::Value {
    serde_json::from_str(&output.stdout)
        .unwrap_or_else(|e| panic!("[{label}] stdout is not JSON ({e}): {}", output.stdout))
}
