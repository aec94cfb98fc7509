use super::{MergeTag, TagError, TagId, element::parse_element};
use crate::grammar::{Delimiters, TagGrammar};
use crate::scanning::Span;

/// Parse and validate one directive.
///
/// Checks run in a fixed order and stop at the first failure, which becomes
/// the tag's error. `in_list` is only called for tags that must sit in a
/// list paragraph.
pub fn parse_directive(
    grammar: &TagGrammar,
    id: TagId,
    span: Span,
    directive: &str,
    in_list: impl FnOnce() -> bool,
) -> MergeTag {
    let mut tag = MergeTag::new(id, span, directive);
    if let Err(error) = validate(grammar, &mut tag, in_list) {
        log::trace!("tag {:?} rejected: {}", id, error.message);
        tag.error = Some(error);
    }
    tag
}

fn validate(
    grammar: &TagGrammar,
    tag: &mut MergeTag,
    in_list: impl FnOnce() -> bool,
) -> Result<(), TagError> {
    let body = normalize_quotes(strip_delimiters(&tag.directive, grammar.delimiters()).trim());

    if !body.ends_with("/>") {
        return Err(TagError::missing_self_closing());
    }

    let element = parse_element(&body).map_err(|e| TagError::malformed(&e))?;
    tag.tag_type = Some(element.name.clone());
    tag.attributes = element.attributes;

    let Some(rule) = grammar.rule(&element.name) else {
        return Err(TagError::unrecognized(&element.name, grammar.tag_names()));
    };

    rule.check_attributes(&tag.attributes)
        .map_err(TagError::invalid_attributes)?;

    for attribute in rule.xpath_attributes() {
        if let Some(expression) = tag.attributes.get(&attribute.name) {
            mergetag_lint_xpath::check(expression)
                .map_err(|e| TagError::invalid_xpath(&attribute.name, &e))?;
        }
    }

    if rule.requires_list && !in_list() {
        return Err(TagError::requires_list(&rule.name));
    }

    Ok(())
}

/// The text between the delimiters. A directive too short to hold both,
/// such as `<#>`, has none.
fn strip_delimiters<'a>(directive: &'a str, delimiters: &Delimiters) -> &'a str {
    let end = directive.len().saturating_sub(delimiters.close.len());
    directive.get(delimiters.open.len()..end).unwrap_or("")
}

/// Word processors replace straight quotes as you type.
fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}
