//! Reporter
//!
//! Human-readable summary of a run, printed by the CLI on stdout.

use std::fmt;

use crate::exports::GeneratedDirs;

/// What an optional updater did to its target file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The file (or manifest section) did not exist and was created
    Created,
    /// These names were appended
    Appended(Vec<String>),
    /// Every generated directory was already listed
    Unchanged,
}

impl UpdateOutcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub generated: GeneratedDirs,
    pub gitignore: Option<UpdateOutcome>,
    pub files: Option<UpdateOutcome>,
}

impl Report {
    pub fn new(generated: GeneratedDirs) -> Self {
        Self {
            generated,
            ..Self::default()
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "New dirs:")?;
        writeln!(f)?;
        for dir in self.generated.iter() {
            writeln!(f, "./{}", dir)?;
        }

        if let Some(outcome) = &self.gitignore {
            writeln!(f)?;
            match outcome {
                UpdateOutcome::Created => writeln!(f, "Created .gitignore")?,
                UpdateOutcome::Appended(added) => {
                    writeln!(f, "Added rules to .gitignore: {}", added.join(", "))?
                }
                UpdateOutcome::Unchanged => writeln!(f, ".gitignore was not changed")?,
            }
        }

        if let Some(outcome) = &self.files {
            writeln!(f)?;
            match outcome {
                UpdateOutcome::Created => {
                    writeln!(f, "Created `files` section in `package.json`")?
                }
                UpdateOutcome::Appended(added) => writeln!(
                    f,
                    "Added directories to `files` section: {}",
                    added.join(", ")
                )?,
                UpdateOutcome::Unchanged => writeln!(f, "`files` section was not changed")?,
            }
        }

        Ok(())
    }
}
