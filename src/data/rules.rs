use serde::Deserialize;
use serde::de::IgnoredAny;

pub const WILDCARD: &str = "*";

/// One configured mapping from extensions to candidate applications.
///
/// Missing or mistyped fields deserialize to `Invalid` variants so one bad
/// rule never rejects the rest of the file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigRule {
    #[serde(default, alias = "extensionName")]
    pub extension_name: ExtensionName,
    #[serde(default)]
    pub apps: Apps,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExtensionName {
    One(String),
    Many(Vec<String>),
    /// Never matches anything.
    Invalid(IgnoredAny),
}

impl Default for ExtensionName {
    fn default() -> Self {
        ExtensionName::Invalid(IgnoredAny)
    }
}

impl ExtensionName {
    /// Exact membership test. The wildcard only matches itself here.
    pub fn matches(&self, extension: &str) -> bool {
        match self {
            ExtensionName::One(name) => name == extension,
            ExtensionName::Many(names) => names.iter().any(|name| name == extension),
            ExtensionName::Invalid(_) => false,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ExtensionName::One(name) if name == WILDCARD)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Apps {
    Named(String),
    Single(AppDescriptor),
    List(Vec<AppDescriptor>),
    Invalid(IgnoredAny),
}

impl Default for Apps {
    fn default() -> Self {
        Apps::Invalid(IgnoredAny)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppDescriptor {
    pub title: String,
    #[serde(default, alias = "openCommand")]
    pub open_command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, alias = "shellCommand")]
    pub shell_command: Option<String>,
}

/// A launchable entry of a rule, after the shape of `apps` is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate<'a> {
    /// Bare application name; has no title and is never offered in a picker.
    Named(&'a str),
    App(&'a AppDescriptor),
}

impl<'a> Candidate<'a> {
    pub fn title(self) -> Option<&'a str> {
        match self {
            Candidate::Named(_) => None,
            Candidate::App(app) => Some(&app.title),
        }
    }
}

impl Apps {
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        match self {
            Apps::Named(name) => vec![Candidate::Named(name)],
            Apps::Single(app) => vec![Candidate::App(app)],
            Apps::List(apps) => apps.iter().map(Candidate::App).collect(),
            Apps::Invalid(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
pub(crate) fn app(title: &str) -> AppDescriptor {
    AppDescriptor {
        title: title.to_string(),
        open_command: Some(title.to_lowercase()),
        args: Vec::new(),
        shell_command: None,
    }
}

#[cfg(test)]
pub(crate) fn rule(extensions: &[&str], apps: Apps) -> ConfigRule {
    let extension_name = match extensions {
        [one] => ExtensionName::One(one.to_string()),
        many => ExtensionName::Many(many.iter().map(|s| s.to_string()).collect()),
    };
    ConfigRule {
        extension_name,
        apps,
    }
}
