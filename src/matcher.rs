use crate::data::ConfigRule;

/// Finds the rule that applies to a file extension.
///
/// The first rule naming the extension wins. A `*` rule is consulted only
/// when nothing names it, wherever the wildcard sits in the list.
pub fn match_rule<'a>(extension: Option<&str>, rules: &'a [ConfigRule]) -> Option<&'a ConfigRule> {
    let extension = extension.filter(|ext| !ext.is_empty() && *ext != ".")?;

    rules
        .iter()
        .find(|rule| rule.extension_name.matches(extension))
        .or_else(|| rules.iter().find(|rule| rule.extension_name.is_wildcard()))
}
