//! The tag grammar: which directive types exist and what they accept.
//!
//! A grammar is a declarative TOML table interpreted by one generic
//! validator, so adding a directive type is a data change. The built-in
//! grammar ([`BUILTIN_GRAMMAR`]) is embedded in the crate; a custom one can
//! be loaded from disk with [`TagGrammar::load`].
//!
//! ```toml
//! [delimiters]
//! open = "<#"
//! close = "#>"
//!
//! [[tag]]
//! name = "Conditional"
//! one_of = [["Select", "Test"]]
//!
//! [[tag.attribute]]
//! name = "Select"
//! value = "xpath"
//!
//! [[link]]
//! family = "Conditional"
//! open = "Conditional"
//! close = "EndConditional"
//! ```
//!
//! Loading checks the table for internal consistency and fails with a
//! [`GrammarError`] before any document is processed.

mod rules;

pub use rules::{AttributeRule, TagRule, ValueKind};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The TOML source of the built-in grammar.
pub const BUILTIN_GRAMMAR: &str = include_str!("builtin.toml");

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("Failed to read grammar file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse grammar: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Delimiters must be non-empty and different (open {open:?}, close {close:?})")]
    InvalidDelimiters { open: String, close: String },

    #[error("Tag type '{0}' is declared more than once")]
    DuplicateTag(String),

    #[error("Tag type '{tag}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute { tag: String, attribute: String },

    #[error("Tag type '{tag}' refers to undeclared attribute '{attribute}' in {context}")]
    UnknownAttribute {
        tag: String,
        attribute: String,
        context: &'static str,
    },

    #[error("Tag type '{tag}' has an empty one_of group")]
    EmptyGroup { tag: String },

    #[error("Tag type '{tag}' attribute '{attribute}' is required and also in a one_of group")]
    RequiredInGroup { tag: String, attribute: String },

    #[error("Tag type '{tag}' attribute '{attribute}' has an invalid pattern: {source}")]
    InvalidPattern {
        tag: String,
        attribute: String,
        source: regex::Error,
    },

    #[error("Link family '{0}' is declared more than once")]
    DuplicateFamily(String),

    #[error("Link family '{family}' refers to undeclared tag type '{tag}'")]
    UnknownLinkTag { family: String, tag: String },

    #[error("Link family '{0}' uses the same tag type to open and close")]
    SelfLinkedFamily(String),

    #[error("Tag type '{0}' belongs to more than one link family")]
    TagInSeveralFamilies(String),
}

/// The strings that bound a directive in paragraph text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "<#".to_string(),
            close: "#>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    Open,
    Close,
}

/// A tag type's place in a link family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMember {
    pub family: String,
    pub role: LinkRole,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GrammarFile {
    #[serde(default)]
    delimiters: Delimiters,
    #[serde(default, rename = "tag")]
    tags: Vec<TagDef>,
    #[serde(default, rename = "link")]
    links: Vec<LinkDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TagDef {
    name: String,
    #[serde(default)]
    requires_list: bool,
    #[serde(default, rename = "attribute")]
    attributes: Vec<AttributeDef>,
    #[serde(default)]
    one_of: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AttributeDef {
    name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    value: ValueKind,
    pattern: Option<String>,
    forbidden_prefix: Option<String>,
    #[serde(default)]
    requires: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LinkDef {
    family: String,
    open: String,
    close: String,
}

/// A validated, read-only tag grammar.
///
/// Immutable after loading, so one grammar can be shared by any number of
/// concurrent lint runs.
#[derive(Debug, Clone)]
pub struct TagGrammar {
    delimiters: Delimiters,
    tags: BTreeMap<String, TagRule>,
    links: HashMap<String, LinkMember>,
}

impl TagGrammar {
    /// The grammar embedded in this crate.
    pub fn builtin() -> Result<Self, GrammarError> {
        Self::from_toml_str(BUILTIN_GRAMMAR)
    }

    /// Load and validate a grammar file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GrammarError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GrammarError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let grammar = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded grammar from {} ({} tag types)",
            path.display(),
            grammar.tags.len()
        );
        Ok(grammar)
    }

    /// Parse and validate a grammar from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, GrammarError> {
        let file: GrammarFile = toml::from_str(source)?;
        Self::compile(file)
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// The rule for a tag type, if the grammar declares it.
    pub fn rule(&self, tag_type: &str) -> Option<&TagRule> {
        self.tags.get(tag_type)
    }

    /// Declared tag type names, sorted.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    /// The link family a tag type opens or closes, if any.
    pub fn link_member(&self, tag_type: &str) -> Option<&LinkMember> {
        self.links.get(tag_type)
    }

    fn compile(file: GrammarFile) -> Result<Self, GrammarError> {
        let Delimiters { open, close } = &file.delimiters;
        if open.is_empty() || close.is_empty() || open == close {
            return Err(GrammarError::InvalidDelimiters {
                open: open.clone(),
                close: close.clone(),
            });
        }

        let mut tags = BTreeMap::new();
        for def in file.tags {
            let rule = compile_tag(def)?;
            if tags.contains_key(&rule.name) {
                return Err(GrammarError::DuplicateTag(rule.name));
            }
            tags.insert(rule.name.clone(), rule);
        }

        let mut families = HashSet::new();
        let mut links = HashMap::new();
        for def in file.links {
            if !families.insert(def.family.clone()) {
                return Err(GrammarError::DuplicateFamily(def.family));
            }
            if def.open == def.close {
                return Err(GrammarError::SelfLinkedFamily(def.family));
            }
            for (tag, role) in [(def.open, LinkRole::Open), (def.close, LinkRole::Close)] {
                if !tags.contains_key(&tag) {
                    return Err(GrammarError::UnknownLinkTag {
                        family: def.family,
                        tag,
                    });
                }
                if links.contains_key(&tag) {
                    return Err(GrammarError::TagInSeveralFamilies(tag));
                }
                let member = LinkMember {
                    family: def.family.clone(),
                    role,
                };
                links.insert(tag, member);
            }
        }

        Ok(Self {
            delimiters: file.delimiters,
            tags,
            links,
        })
    }
}

fn compile_tag(def: TagDef) -> Result<TagRule, GrammarError> {
    let tag = def.name;
    let declared: HashSet<&str> = def.attributes.iter().map(|a| a.name.as_str()).collect();
    if declared.len() != def.attributes.len() {
        let mut seen = HashSet::new();
        if let Some(dup) = def.attributes.iter().find(|a| !seen.insert(a.name.as_str())) {
            return Err(GrammarError::DuplicateAttribute {
                tag,
                attribute: dup.name.clone(),
            });
        }
    }

    let unknown = |attribute: &str, context| GrammarError::UnknownAttribute {
        tag: tag.clone(),
        attribute: attribute.to_string(),
        context,
    };

    for group in &def.one_of {
        if group.is_empty() {
            return Err(GrammarError::EmptyGroup { tag: tag.clone() });
        }
        for name in group {
            let Some(attribute) = def.attributes.iter().find(|a| &a.name == name) else {
                return Err(unknown(name, "one_of"));
            };
            if attribute.required {
                return Err(GrammarError::RequiredInGroup {
                    tag: tag.clone(),
                    attribute: name.clone(),
                });
            }
        }
    }

    for attribute in &def.attributes {
        if let Some(missing) = attribute
            .requires
            .iter()
            .find(|r| !declared.contains(r.as_str()))
        {
            return Err(unknown(missing, "requires"));
        }
    }

    let mut attributes = Vec::with_capacity(def.attributes.len());
    for attribute in def.attributes {
        let pattern = match &attribute.pattern {
            Some(pattern) => Some(Regex::new(pattern).map_err(|source| {
                GrammarError::InvalidPattern {
                    tag: tag.clone(),
                    attribute: attribute.name.clone(),
                    source,
                }
            })?),
            None => None,
        };
        attributes.push(AttributeRule {
            name: attribute.name,
            required: attribute.required,
            value: attribute.value,
            pattern,
            forbidden_prefix: attribute.forbidden_prefix,
            requires: attribute.requires,
        });
    }

    Ok(TagRule {
        name: tag,
        requires_list: def.requires_list,
        attributes,
        one_of: def.one_of,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_grammar_loads() {
        let grammar = TagGrammar::builtin().unwrap();

        assert_eq!(grammar.delimiters(), &Delimiters::default());
        assert_eq!(
            grammar.tag_names().collect::<Vec<_>>(),
            vec![
                "Conditional",
                "Content",
                "EndConditional",
                "SuppressListItem",
                "TableRow"
            ]
        );
        assert!(grammar.rule("SuppressListItem").unwrap().requires_list);
        assert_eq!(
            grammar.link_member("Conditional"),
            Some(&LinkMember {
                family: "Conditional".to_string(),
                role: LinkRole::Open
            })
        );
        assert_eq!(
            grammar.link_member("EndConditional").map(|m| m.role),
            Some(LinkRole::Close)
        );
        assert_eq!(grammar.link_member("Content"), None);
    }

    #[test]
    fn builtin_content_rule() {
        let grammar = TagGrammar::builtin().unwrap();
        let content = grammar.rule("Content").unwrap();

        let select = content.attribute("Select").unwrap();
        assert!(select.required);
        assert_eq!(select.value, ValueKind::Xpath);

        let optional = content.attribute("Optional").unwrap();
        assert!(!optional.required);
        assert_eq!(optional.value, ValueKind::Boolean);
        assert!(grammar.rule("TableRow").unwrap().attribute("Optional").unwrap().required);

        let track = content.attribute("TrackName").unwrap();
        assert!(!track.required);
        assert_eq!(track.pattern(), Some("^[A-Za-z][A-Za-z0-9 .]*$"));
        assert_eq!(track.forbidden_prefix, None);
    }

    #[test]
    fn tag_names_are_case_sensitive() {
        let grammar = TagGrammar::builtin().unwrap();
        assert!(grammar.rule("content").is_none());
    }

    #[test]
    fn empty_grammar_uses_default_delimiters() {
        let grammar = TagGrammar::from_toml_str("").unwrap();
        assert_eq!(grammar.delimiters().open, "<#");
        assert_eq!(grammar.tag_names().count(), 0);
    }

    fn load_err(source: &str) -> String {
        TagGrammar::from_toml_str(source).unwrap_err().to_string()
    }

    #[test]
    fn rejects_duplicate_tag() {
        let err = load_err("[[tag]]\nname = \"A\"\n[[tag]]\nname = \"A\"\n");
        assert_eq!(err, "Tag type 'A' is declared more than once");
    }

    #[test]
    fn rejects_duplicate_attribute() {
        let err = load_err(
            r#"
[[tag]]
name = "A"
[[tag.attribute]]
name = "x"
[[tag.attribute]]
name = "x"
"#,
        );
        assert_eq!(err, "Tag type 'A' declares attribute 'x' more than once");
    }

    #[test]
    fn rejects_dangling_group_member() {
        let err = load_err(
            r#"
[[tag]]
name = "A"
one_of = [["x", "y"]]
[[tag.attribute]]
name = "x"
"#,
        );
        assert_eq!(err, "Tag type 'A' refers to undeclared attribute 'y' in one_of");
    }

    #[test]
    fn rejects_required_group_member() {
        let err = load_err(
            r#"
[[tag]]
name = "A"
one_of = [["x"]]
[[tag.attribute]]
name = "x"
required = true
"#,
        );
        assert_eq!(
            err,
            "Tag type 'A' attribute 'x' is required and also in a one_of group"
        );
    }

    #[test]
    fn rejects_dangling_requires() {
        let err = load_err(
            r#"
[[tag]]
name = "A"
[[tag.attribute]]
name = "x"
requires = ["z"]
"#,
        );
        assert_eq!(err, "Tag type 'A' refers to undeclared attribute 'z' in requires");
    }

    #[test]
    fn rejects_bad_pattern() {
        let err = load_err(
            r#"
[[tag]]
name = "A"
[[tag.attribute]]
name = "x"
pattern = "(unclosed"
"#,
        );
        assert!(err.starts_with("Tag type 'A' attribute 'x' has an invalid pattern"));
    }

    #[test]
    fn rejects_dangling_link_tag() {
        let err = load_err(
            r#"
[[tag]]
name = "If"
[[link]]
family = "If"
open = "If"
close = "EndIf"
"#,
        );
        assert_eq!(err, "Link family 'If' refers to undeclared tag type 'EndIf'");
    }

    #[test]
    fn rejects_self_linked_family() {
        let err = load_err(
            r#"
[[tag]]
name = "If"
[[link]]
family = "If"
open = "If"
close = "If"
"#,
        );
        assert_eq!(err, "Link family 'If' uses the same tag type to open and close");
    }

    #[test]
    fn rejects_tag_in_two_families() {
        let err = load_err(
            r#"
[[tag]]
name = "A"
[[tag]]
name = "B"
[[tag]]
name = "C"
[[link]]
family = "AB"
open = "A"
close = "B"
[[link]]
family = "CB"
open = "C"
close = "B"
"#,
        );
        assert_eq!(err, "Tag type 'B' belongs to more than one link family");
    }

    #[test]
    fn rejects_bad_delimiters() {
        let err = load_err("[delimiters]\nopen = \"##\"\nclose = \"##\"\n");
        assert!(err.starts_with("Delimiters must be non-empty and different"));

        let err = load_err("[delimiters]\nopen = \"\"\n");
        assert!(err.starts_with("Delimiters must be non-empty and different"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = load_err("[[tag]]\nname = \"A\"\nrequired_list = true\n");
        assert!(err.starts_with("Failed to parse grammar"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let err = TagGrammar::load(&path).unwrap_err();
        assert!(matches!(err, GrammarError::Read { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("grammar.toml");
        std::fs::write(&path, BUILTIN_GRAMMAR).unwrap();
        let grammar = TagGrammar::load(&path).unwrap();
        assert!(grammar.rule("TableRow").is_some());
    }

    #[test]
    fn grammar_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TagGrammar>();
    }
}
