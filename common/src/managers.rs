//! Employer → manager dropdown synchronisation.

use log::{debug, error};

use crate::api::ManagerDirectory;
use crate::error::Result;
use crate::model::manager::{Manager, SelectOption};
use crate::sequence::RequestSequence;

pub const PLACEHOLDER_LABEL: &str = "Select a manager";

/// A `<select>` whose options are always rebuilt as a whole.
pub trait OptionList {
    fn replace_options(&self, options: &[SelectOption]);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No employer selected; only the placeholder remains.
    Cleared,
    Populated(usize),
    /// The employer selection changed before the managers arrived.
    Superseded,
}

/// Placeholder followed by the managers in server order.
pub fn manager_options(managers: &[Manager]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new("", PLACEHOLDER_LABEL))
        .chain(managers.iter().map(SelectOption::from))
        .collect()
}

pub struct ManagerDropdown<D, L> {
    directory: D,
    list: L,
    sequence: RequestSequence,
}

impl<D: ManagerDirectory, L: OptionList> ManagerDropdown<D, L> {
    pub fn new(directory: D, list: L) -> Self {
        Self {
            directory,
            list,
            sequence: RequestSequence::new(),
        }
    }

    /// Leaves only the placeholder option.
    pub fn reset(&self) {
        self.list.replace_options(&manager_options(&[]));
    }

    /// Rebuilds the dropdown for the newly selected employer.
    ///
    /// The list is reset before any request is made, so a failed fetch leaves
    /// just the placeholder.
    pub async fn sync(&self, employer_id: &str) -> Result<SyncOutcome> {
        let ticket = self.sequence.issue();
        self.reset();

        let employer_id = employer_id.trim();
        if employer_id.is_empty() {
            return Ok(SyncOutcome::Cleared);
        }

        let managers = match self.directory.managers_for(employer_id).await {
            Ok(managers) => managers,
            Err(e) => {
                error!("Error fetching managers for employer {}: {}", employer_id, e);
                return Err(e);
            }
        };

        if !self.sequence.is_current(ticket) {
            debug!("discarding managers for employer {}", employer_id);
            return Ok(SyncOutcome::Superseded);
        }

        self.list.replace_options(&manager_options(&managers));
        Ok(SyncOutcome::Populated(managers.len()))
    }
}
