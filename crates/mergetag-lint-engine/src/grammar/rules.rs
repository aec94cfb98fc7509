use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What an attribute value must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Any string.
    #[default]
    Text,
    /// Lowercase `true` or `false`.
    Boolean,
    /// An XPath 1.0 expression, checked after the attribute set is valid.
    Xpath,
}

#[derive(Debug, Clone)]
pub struct AttributeRule {
    pub name: String,
    pub required: bool,
    pub value: ValueKind,
    pub(crate) pattern: Option<Regex>,
    /// Rejected value prefix, compared ignoring ASCII case.
    pub forbidden_prefix: Option<String>,
    /// Attributes that must be present whenever this one is.
    pub requires: Vec<String>,
}

impl AttributeRule {
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    fn check_value(&self, value: &str) -> Result<(), String> {
        if self.value == ValueKind::Boolean && value != "true" && value != "false" {
            return Err(format!(
                "attribute '{}' value '{value}' is not true or false",
                self.name
            ));
        }

        if let Some(pattern) = &self.pattern
            && !pattern.is_match(value)
        {
            return Err(format!(
                "attribute '{}' value '{value}' does not match {}",
                self.name,
                pattern.as_str()
            ));
        }

        if let Some(prefix) = &self.forbidden_prefix
            && value
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        {
            return Err(format!(
                "attribute '{}' value '{value}' must not start with '{prefix}'",
                self.name
            ));
        }

        Ok(())
    }
}

/// The attribute rules for one tag type.
#[derive(Debug, Clone)]
pub struct TagRule {
    pub name: String,
    /// The tag is only allowed in bullet or numbered list paragraphs.
    pub requires_list: bool,
    pub(crate) attributes: Vec<AttributeRule>,
    /// Groups of attributes of which exactly one must be present.
    pub(crate) one_of: Vec<Vec<String>>,
}

impl TagRule {
    pub fn attribute(&self, name: &str) -> Option<&AttributeRule> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Declared attributes, in declaration order.
    pub fn attributes(&self) -> &[AttributeRule] {
        &self.attributes
    }

    pub fn one_of_groups(&self) -> &[Vec<String>] {
        &self.one_of
    }

    /// Declared XPath-valued attributes, in declaration order.
    pub fn xpath_attributes(&self) -> impl Iterator<Item = &AttributeRule> {
        self.attributes
            .iter()
            .filter(|a| a.value == ValueKind::Xpath)
    }

    /// Check an element's attribute set against this rule.
    ///
    /// Stops at the first violation and returns a diagnostic describing it.
    /// Unknown attributes are reported first, then missing required ones,
    /// `one_of` groups, `requires` dependencies and finally values.
    pub fn check_attributes(&self, attributes: &BTreeMap<String, String>) -> Result<(), String> {
        let tag = &self.name;

        if let Some(unknown) = attributes.keys().find(|k| self.attribute(k).is_none()) {
            return Err(format!(
                "Element {tag}: attribute '{unknown}' is not allowed"
            ));
        }

        if let Some(missing) = self
            .attributes
            .iter()
            .find(|a| a.required && !attributes.contains_key(&a.name))
        {
            return Err(format!(
                "Element {tag}: missing required attribute '{}'",
                missing.name
            ));
        }

        for group in &self.one_of {
            let present: Vec<&String> = group
                .iter()
                .filter(|name| attributes.contains_key(*name))
                .collect();
            if present.len() != 1 {
                let found = if present.is_empty() {
                    "none".to_string()
                } else {
                    quoted_list(present)
                };
                return Err(format!(
                    "Element {tag}: expected exactly one of {}, found {found}",
                    quoted_list(group)
                ));
            }
        }

        for rule in self
            .attributes
            .iter()
            .filter(|a| attributes.contains_key(&a.name))
        {
            if let Some(needed) = rule.requires.iter().find(|r| !attributes.contains_key(*r)) {
                return Err(format!(
                    "Element {tag}: attribute '{}' requires '{needed}'",
                    rule.name
                ));
            }
        }

        for rule in &self.attributes {
            if let Some(value) = attributes.get(&rule.name) {
                rule.check_value(value)
                    .map_err(|message| format!("Element {tag}: {message}"))?;
            }
        }

        Ok(())
    }
}

fn quoted_list<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> String {
    names
        .into_iter()
        .map(|name| format!("'{}'", name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
