/// A byte cursor for delimiter search over one paragraph.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The paragraph text being scanned.
    text: &'a str,
    /// Current byte offset into `text`.
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Checks if the remaining input starts with `pat`.
    pub fn at(&self, pat: &str) -> bool {
        self.text
            .as_bytes()
            .get(self.pos..)
            .is_some_and(|rest| rest.starts_with(pat.as_bytes()))
    }

    /// Advances by one byte.
    pub fn bump(&mut self) {
        if !self.eof() {
            self.pos += 1;
        }
    }

    /// Advances by `n` bytes, stopping at the end of the text.
    pub fn bump_n(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }
}

/// Byte offsets of every non-overlapping occurrence of `needle`, left to
/// right. An empty needle occurs nowhere.
pub fn find_all(text: &str, needle: &str) -> Vec<usize> {
    let mut found = Vec::new();
    if needle.is_empty() {
        return found;
    }

    let mut cur = Cursor::new(text);
    while !cur.eof() {
        if cur.at(needle) {
            found.push(cur.pos());
            cur.bump_n(needle.len());
        } else {
            cur.bump();
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("<#x");
        assert_eq!(cur.pos(), 0);
        assert!(cur.at("<#"));
        cur.bump_n(2);
        assert!(!cur.at("<#"));
        assert!(cur.at("x"));
        cur.bump();
        assert!(cur.eof());
    }

    #[test]
    fn bump_stops_at_end() {
        let mut cur = Cursor::new("hi");
        cur.bump_n(10);
        assert!(cur.eof());
        assert_eq!(cur.pos(), 2);
        cur.bump();
        assert_eq!(cur.pos(), 2);
        assert!(!cur.at("h"));
        assert!(cur.at(""));
    }

    #[rstest]
    #[case("no directives", "<#", vec![])]
    #[case("<# a #> <# b #>", "<#", vec![0, 8])]
    #[case("<# a #> <# b #>", "#>", vec![5, 13])]
    #[case("<#<#<#", "<#", vec![0, 2, 4])]
    // Occurrences never overlap
    #[case("###>", "##", vec![0, 2])]
    #[case("<#>", "#>", vec![1])]
    #[case("anything", "", vec![])]
    #[case("café <# x #>", "<#", vec![6])]
    fn find_all_cases(#[case] text: &str, #[case] needle: &str, #[case] expected: Vec<usize>) {
        assert_eq!(find_all(text, needle), expected);
    }
}
