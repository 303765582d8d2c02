use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// I/O towards the CI runner hosting the installer.
pub trait Runner {
    /// Value of the named input, empty when not provided.
    fn input(&self, name: &str) -> String;

    /// Prepends `path` to `PATH` for later steps of the job and sets the
    /// `version` output. Either both are recorded or neither is.
    fn publish(&mut self, path: &Path, version: &str) -> std::io::Result<()>;

    /// Marks the step as failed with a message.
    fn set_failed(&mut self, message: &str);

    fn failed(&self) -> bool;
}

/// [`Runner`] speaking the GitHub Actions file and workflow-command protocol.
///
/// Outputs and PATH entries go to the files named by `GITHUB_OUTPUT` and
/// `GITHUB_PATH`; without those, the legacy stdout commands are used.
#[derive(Debug, Default)]
pub struct ActionsRunner {
    inputs: HashMap<String, String>,
    output_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
    failed: bool,
}

impl ActionsRunner {
    pub fn new(output_file: Option<PathBuf>, path_file: Option<PathBuf>) -> Self {
        Self {
            inputs: HashMap::new(),
            output_file,
            path_file,
            failed: false,
        }
    }

    pub fn with_input(mut self, name: &str, value: &str) -> Self {
        self.inputs.insert(name.to_string(), value.trim().to_string());
        self
    }
}

impl Runner for ActionsRunner {
    fn input(&self, name: &str) -> String {
        self.inputs.get(name).cloned().unwrap_or_default()
    }

    fn publish(&mut self, path: &Path, version: &str) -> std::io::Result<()> {
        // Both files are opened before either is written.
        let output_file = self.output_file.as_deref().map(open_append).transpose()?;
        let path_file = self.path_file.as_deref().map(open_append).transpose()?;

        match path_file {
            Some(mut file) => writeln!(file, "{}", path.display())?,
            None => println!("::add-path::{}", path.display()),
        }
        match output_file {
            Some(mut file) => {
                let delimiter = format!("ghadelimiter_{}", std::process::id());
                writeln!(file, "version<<{delimiter}\n{version}\n{delimiter}")?;
            }
            None => println!("::set-output name=version::{}", escape_data(version)),
        }
        Ok(())
    }

    fn set_failed(&mut self, message: &str) {
        self.failed = true;
        println!("::error::{}", escape_data(message));
    }

    fn failed(&self) -> bool {
        self.failed
    }
}

fn open_append(file: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(file)
}

/// Escapes a workflow-command payload.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
