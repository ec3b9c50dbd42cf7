use serde::{Deserialize, Serialize};

use super::{optional, parse_capacity, required, FormError};
use crate::models::{Lab, LabId, LabInput};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabForm {
    pub name: String,
    pub location: String,
    pub capacity: String,
    pub description: String,
}

impl LabForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_lab(lab: &Lab) -> Self {
        Self {
            name: lab.name.clone(),
            location: lab.location.clone(),
            capacity: lab.capacity.to_string(),
            description: lab.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<LabInput, FormError> {
        Ok(LabInput {
            name: required(&self.name, "name")?,
            location: required(&self.location, "location")?,
            capacity: parse_capacity(&self.capacity)?,
            description: optional(&self.description),
        })
    }
}

/// What the lab modal hands to the management view.
#[derive(Debug, Clone, PartialEq)]
pub enum LabSubmission {
    Create(LabInput),
    Update(LabId, LabInput),
}

#[derive(Debug, Clone, Default)]
pub struct LabModal {
    open: bool,
    editing: Option<LabId>,
    pub form: LabForm,
}

impl LabModal {
    pub fn open_create(&mut self) {
        self.open = true;
        self.editing = None;
        self.form = LabForm::blank();
    }

    pub fn open_edit(&mut self, lab: &Lab) {
        self.open = true;
        self.editing = Some(lab.id);
        self.form = LabForm::from_lab(lab);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
        self.form = LabForm::blank();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<LabId> {
        self.editing
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit laboratory"
        } else {
            "New laboratory"
        }
    }

    /// Validate and close. An invalid form stays open with its input intact.
    pub fn submit(&mut self) -> Result<LabSubmission, FormError> {
        if !self.open {
            return Err(FormError::NotOpen);
        }
        let input = self.form.validate()?;
        let submission = match self.editing {
            Some(id) => LabSubmission::Update(id, input),
            None => LabSubmission::Create(input),
        };
        self.close();
        Ok(submission)
    }
}
