use serde::Deserialize;

/// One entry of the managers-by-employer response.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Manager {
    pub id: u64,
    pub username: String,
}

/// A `<option>` as the glue writes it: submitted value and visible label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl From<&Manager> for SelectOption {
    fn from(manager: &Manager) -> Self {
        Self::new(manager.id.to_string(), manager.username.clone())
    }
}
